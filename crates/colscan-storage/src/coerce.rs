//! Operand validation: turns `(FilterOp, SqlValue)` into a comparison against
//! a value of the column's element type, or a verdict that needs no data.
//!
//! Policy:
//! - `IsNull` never matches a dense column; `IsNotNull` matches every row.
//! - A `Null` operand matches nothing (comparisons with NULL are unknown).
//! - Numbers order before strings: a `String` operand satisfies `<`, `<=`
//!   and `!=` for every row, and nothing else.
//! - Integer operands outside the column type's domain collapse to all/none
//!   depending on which side they fall.
//! - Fractional operands against integer columns are rounded toward the
//!   side that keeps the predicate exact (`x < 2.5` becomes `x <= 2`).
//! - NaN operands match nothing.

use colscan_core::prelude::{FilterOp, SqlValue};

use crate::numeric::Numeric;

/// Which side of an integer type's domain an operand falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfRange {
    Below,
    Above,
}

/// Result of converting an `f64` operand to a column element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FromDouble<T> {
    Exact(T),
    /// Non-integral value strictly between `floor` and `ceil`; `ceil` is
    /// `None` when it would exceed the type's maximum.
    Fractional { floor: T, ceil: Option<T> },
    OutOfRange(OutOfRange),
    NaN,
}

/// Comparison operators that survive validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    #[inline]
    pub fn eval<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validated<T> {
    Compare(CmpOp, T),
    AllRows,
    NoRows,
}

pub fn validate<T: Numeric>(op: FilterOp, value: &SqlValue) -> Validated<T> {
    let cmp = match op {
        FilterOp::IsNull => return Validated::NoRows,
        FilterOp::IsNotNull => return Validated::AllRows,
        FilterOp::Eq => CmpOp::Eq,
        FilterOp::Ne => CmpOp::Ne,
        FilterOp::Lt => CmpOp::Lt,
        FilterOp::Le => CmpOp::Le,
        FilterOp::Gt => CmpOp::Gt,
        FilterOp::Ge => CmpOp::Ge,
    };

    match value {
        SqlValue::Null => Validated::NoRows,
        SqlValue::String(_) => match cmp {
            CmpOp::Lt | CmpOp::Le | CmpOp::Ne => Validated::AllRows,
            CmpOp::Gt | CmpOp::Ge | CmpOp::Eq => Validated::NoRows,
        },
        SqlValue::Long(v) => match T::from_long(*v) {
            Ok(t) => Validated::Compare(cmp, t),
            Err(side) => out_of_range(cmp, side),
        },
        SqlValue::Double(v) => match T::from_double(*v) {
            FromDouble::Exact(t) => Validated::Compare(cmp, t),
            FromDouble::Fractional { floor, ceil } => match cmp {
                CmpOp::Eq => Validated::NoRows,
                CmpOp::Ne => Validated::AllRows,
                CmpOp::Lt | CmpOp::Le => Validated::Compare(CmpOp::Le, floor),
                CmpOp::Gt | CmpOp::Ge => match ceil {
                    Some(c) => Validated::Compare(CmpOp::Ge, c),
                    None => Validated::NoRows,
                },
            },
            FromDouble::OutOfRange(side) => out_of_range(cmp, side),
            FromDouble::NaN => Validated::NoRows,
        },
    }
}

fn out_of_range<T>(cmp: CmpOp, side: OutOfRange) -> Validated<T> {
    let all = match side {
        OutOfRange::Above => matches!(cmp, CmpOp::Lt | CmpOp::Le | CmpOp::Ne),
        OutOfRange::Below => matches!(cmp, CmpOp::Gt | CmpOp::Ge | CmpOp::Ne),
    };
    if all {
        Validated::AllRows
    } else {
        Validated::NoRows
    }
}
