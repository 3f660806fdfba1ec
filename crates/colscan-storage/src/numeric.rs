//! Non-owning numeric column storage.
//!
//! `NumericStorage` borrows a slice of one of the supported element types.
//! The borrow is the lifetime contract: the column outlives the storage and
//! cannot be mutated while any search or sort runs against it. Element type
//! dispatch happens once per call through the closed `ColumnData` enum; the
//! per-row loops underneath are monomorphized.

use std::cmp::Ordering;
use std::fmt::Debug;

use colscan_core::prelude::{Builder, ColumnType, FilterOp, Range, SqlValue};

use crate::coerce::{validate, FromDouble, OutOfRange};
use crate::search::{binary, linear};
use crate::sort;
use crate::traits::Storage;

/// Element types a numeric column can hold.
pub trait Numeric: Copy + PartialOrd + Debug + Send + Sync + 'static {
    const COLUMN_TYPE: ColumnType;

    fn wrap(data: &[Self]) -> ColumnData<'_>;

    /// Exact conversion of an integer operand.
    fn from_long(v: i64) -> Result<Self, OutOfRange>;

    /// Conversion of a floating-point operand (see `coerce` for the policy).
    fn from_double(v: f64) -> FromDouble<Self>;

    /// Total order used by sorting. Agrees with `PartialOrd` on comparable
    /// values; NaN sorts after every number.
    fn sort_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_integer {
    ($t:ty, $variant:ident, $min_f64:expr, $upper_f64:expr) => {
        impl Numeric for $t {
            const COLUMN_TYPE: ColumnType = ColumnType::$variant;

            fn wrap(data: &[Self]) -> ColumnData<'_> {
                ColumnData::$variant(data)
            }

            fn from_long(v: i64) -> Result<Self, OutOfRange> {
                <$t>::try_from(v).map_err(|_| {
                    if v < 0 {
                        OutOfRange::Below
                    } else {
                        OutOfRange::Above
                    }
                })
            }

            fn from_double(v: f64) -> FromDouble<Self> {
                if v.is_nan() {
                    return FromDouble::NaN;
                }
                if v < $min_f64 {
                    return FromDouble::OutOfRange(OutOfRange::Below);
                }
                if v >= $upper_f64 {
                    return FromDouble::OutOfRange(OutOfRange::Above);
                }
                let floor = v.floor();
                if floor == v {
                    return FromDouble::Exact(v as $t);
                }
                let ceil = floor + 1.0;
                FromDouble::Fractional {
                    floor: floor as $t,
                    ceil: (ceil < $upper_f64).then(|| ceil as $t),
                }
            }

            fn sort_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }
    };
}

// Bounds are exact in f64: MIN and MAX + 1 are powers of two (or zero).
impl_integer!(i32, Int32, -2_147_483_648.0, 2_147_483_648.0);
impl_integer!(u32, Uint32, 0.0, 4_294_967_296.0);
impl_integer!(i64, Int64, -9_223_372_036_854_775_808.0, 9_223_372_036_854_775_808.0);

impl Numeric for f64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Double;

    fn wrap(data: &[Self]) -> ColumnData<'_> {
        ColumnData::Double(data)
    }

    fn from_long(v: i64) -> Result<Self, OutOfRange> {
        Ok(v as f64)
    }

    fn from_double(v: f64) -> FromDouble<Self> {
        if v.is_nan() {
            FromDouble::NaN
        } else {
            FromDouble::Exact(v)
        }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .unwrap_or_else(|| self.is_nan().cmp(&other.is_nan()))
    }
}

/// Borrowed column buffer tagged with its element type.
#[derive(Debug, Clone, Copy)]
pub enum ColumnData<'a> {
    Int32(&'a [i32]),
    Uint32(&'a [u32]),
    Int64(&'a [i64]),
    Double(&'a [f64]),
}

impl<'a, T: Numeric> From<&'a [T]> for ColumnData<'a> {
    fn from(data: &'a [T]) -> Self {
        T::wrap(data)
    }
}

impl<'a, T: Numeric> From<&'a Vec<T>> for ColumnData<'a> {
    fn from(data: &'a Vec<T>) -> Self {
        T::wrap(data.as_slice())
    }
}

/// Runs `$body` with `$d` bound to the typed slice of `$data`.
macro_rules! dispatch {
    ($data:expr, $d:ident => $body:expr) => {
        match $data {
            $crate::numeric::ColumnData::Int32($d) => $body,
            $crate::numeric::ColumnData::Uint32($d) => $body,
            $crate::numeric::ColumnData::Int64($d) => $body,
            $crate::numeric::ColumnData::Double($d) => $body,
        }
    };
}
pub(crate) use dispatch;

impl<'a> ColumnData<'a> {
    pub fn len(&self) -> usize {
        dispatch!(self, d => d.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        fn tag<T: Numeric>(_: &[T]) -> ColumnType {
            T::COLUMN_TYPE
        }
        dispatch!(*self, d => tag(d))
    }

    /// The rows `range` of this buffer, renumbered from 0.
    pub fn slice(&self, range: Range) -> ColumnData<'a> {
        let (start, end) = (range.start as usize, range.end as usize);
        dispatch!(*self, d => ColumnData::from(&d[start..end]))
    }
}

/// Read-only view over a dense numeric column.
#[derive(Debug, Clone, Copy)]
pub struct NumericStorage<'a> {
    data: ColumnData<'a>,
}

impl<'a> NumericStorage<'a> {
    /// Bind an existing buffer. No copy is made.
    pub fn new(data: impl Into<ColumnData<'a>>) -> Self {
        let data = data.into();
        debug_assert!(data.len() <= u32::MAX as usize, "row ids are u32");
        Self { data }
    }

    pub fn data(&self) -> ColumnData<'a> {
        self.data
    }
}

impl Storage for NumericStorage<'_> {
    fn len(&self) -> u32 {
        self.data.len() as u32
    }

    fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    fn linear_search_unaligned(
        &self,
        op: FilterOp,
        value: &SqlValue,
        range: Range,
        builder: &mut Builder,
    ) {
        debug_assert!(range.end <= self.len());
        dispatch!(self.data, d => linear::scan_unaligned(d, validate(op, value), range, builder));

        #[cfg(feature = "tracing")]
        tracing::trace!(%op, %value, %range, ty = ?self.column_type(), "linear search (unaligned)");
    }

    fn linear_search_aligned(
        &self,
        op: FilterOp,
        value: &SqlValue,
        range: Range,
        builder: &mut Builder,
    ) {
        debug_assert!(range.end <= self.len());
        dispatch!(self.data, d => linear::scan_aligned(d, validate(op, value), range, builder));

        #[cfg(feature = "tracing")]
        tracing::trace!(%op, %value, %range, ty = ?self.column_type(), "linear search (aligned)");
    }

    fn binary_search(&self, op: FilterOp, value: &SqlValue, range: Range) -> Option<Range> {
        debug_assert!(range.end <= self.len());
        if range.is_empty() {
            return Some(range);
        }
        let found = dispatch!(self.data, d => {
            binary::bound_search(validate(op, value), range, |i| d[i as usize])
        });

        #[cfg(feature = "tracing")]
        tracing::trace!(%op, %value, %range, ?found, "binary search");

        found
    }

    fn binary_search_with_index(
        &self,
        op: FilterOp,
        value: &SqlValue,
        index: &[u32],
        range: Range,
    ) -> Option<Range> {
        debug_assert!(range.end as usize <= index.len());
        if range.is_empty() {
            return Some(range);
        }
        let found = dispatch!(self.data, d => {
            binary::bound_search(validate(op, value), range, |pos| {
                d[index[pos as usize] as usize]
            })
        });

        #[cfg(feature = "tracing")]
        tracing::trace!(%op, %value, %range, ?found, "binary search with index");

        found
    }

    fn stable_sort(&self, indices: &mut [u32]) {
        dispatch!(self.data, d => sort::stable_sort_by_key(indices, |row| d[row as usize]));

        #[cfg(feature = "tracing")]
        tracing::trace!(rows = indices.len(), "stable sort");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(n: u32) -> Vec<u32> {
        (0..n).collect()
    }

    #[test]
    fn test_stable_sort_trivial() {
        let data: Vec<u32> = vec![0, 1, 2, 0, 1, 2, 0, 1, 2];
        let mut out = iota(9);
        NumericStorage::new(&data).stable_sort(&mut out);
        assert_eq!(out, vec![0, 3, 6, 1, 4, 7, 2, 5, 8]);
    }

    #[test]
    fn test_stable_sort_keeps_input_order_of_ties() {
        let data: Vec<u32> = vec![0, 1, 2, 0, 1, 2, 0, 1, 2];
        let mut out = vec![1, 7, 4, 0, 6, 3, 2, 5, 8];
        NumericStorage::new(&data).stable_sort(&mut out);
        assert_eq!(out, vec![0, 6, 3, 1, 7, 4, 2, 5, 8]);
    }

    #[test]
    fn test_compare_slow() {
        let data = iota(10);
        let storage = NumericStorage::new(&data);
        let mut builder = Builder::new(10);
        storage.linear_search_unaligned(
            FilterOp::Ge,
            &SqlValue::Long(5),
            Range::new(0, 10),
            &mut builder,
        );
        let bv = builder.build();
        assert_eq!(bv.count_set_bits(), 5);
        assert_eq!(bv.index_of_nth_set(0), 5);
    }

    #[test]
    fn test_compare_slow_large() {
        let data = iota(1025);
        let storage = NumericStorage::new(&data);
        let mut builder = Builder::new(1025);
        storage.linear_search_unaligned(
            FilterOp::Ge,
            &SqlValue::Long(5),
            Range::new(0, 1025),
            &mut builder,
        );
        let bv = builder.build();
        assert_eq!(bv.count_set_bits(), 1020);
        assert_eq!(bv.index_of_nth_set(0), 5);
    }

    #[test]
    fn test_compare_fast() {
        let data = iota(128);
        let storage = NumericStorage::new(&data);
        let mut builder = Builder::new(128);
        storage.linear_search_aligned(
            FilterOp::Ge,
            &SqlValue::Long(100),
            Range::new(0, 128),
            &mut builder,
        );
        let bv = builder.build();
        assert_eq!(bv.count_set_bits(), 28);
        assert_eq!(bv.index_of_nth_set(0), 100);
    }

    #[test]
    fn test_compare_sorted() {
        let data = iota(128);
        let storage = NumericStorage::new(&data);
        let range = storage
            .binary_search(FilterOp::Ge, &SqlValue::Long(100), Range::new(0, 128))
            .unwrap();
        assert_eq!(range.size(), 28);
        assert_eq!(range, Range::new(100, 128));
    }

    #[test]
    fn test_sorted_indexes() {
        let data: Vec<u32> = vec![30, 40, 50, 60, 90, 80, 70, 0, 10, 20];
        let order: Vec<u32> = vec![7, 8, 9, 0, 1, 2, 3, 6, 5, 4];
        let storage = NumericStorage::new(&data);
        let full = Range::new(0, 10);
        let v = SqlValue::Long(60);

        let ge = storage.binary_search_with_index(FilterOp::Ge, &v, &order, full);
        assert_eq!(ge, Some(Range::new(6, 10)));
        let lt = storage.binary_search_with_index(FilterOp::Lt, &v, &order, full);
        assert_eq!(lt, Some(Range::new(0, 6)));
        let eq = storage.binary_search_with_index(FilterOp::Eq, &v, &order, full);
        assert_eq!(eq, Some(Range::new(6, 7)));
    }

    #[test]
    fn test_binary_search_ne_has_no_single_range() {
        let data = iota(16);
        let storage = NumericStorage::new(&data);
        assert_eq!(
            storage.binary_search(FilterOp::Ne, &SqlValue::Long(3), Range::new(0, 16)),
            None
        );
    }

    #[test]
    fn test_binary_search_duplicates() {
        let data: Vec<i64> = vec![1, 2, 2, 2, 5, 5, 9];
        let storage = NumericStorage::new(&data);
        let full = Range::new(0, 7);
        let v = SqlValue::Long(2);
        assert_eq!(storage.binary_search(FilterOp::Eq, &v, full), Some(Range::new(1, 4)));
        assert_eq!(storage.binary_search(FilterOp::Le, &v, full), Some(Range::new(0, 4)));
        assert_eq!(storage.binary_search(FilterOp::Gt, &v, full), Some(Range::new(4, 7)));
        assert_eq!(storage.binary_search(FilterOp::Lt, &v, full), Some(Range::new(0, 1)));
    }

    #[test]
    fn test_binary_search_subrange_stays_inside() {
        let data = iota(100);
        let storage = NumericStorage::new(&data);
        let found = storage
            .binary_search(FilterOp::Lt, &SqlValue::Long(90), Range::new(20, 40))
            .unwrap();
        assert_eq!(found, Range::new(20, 40));
        let found = storage
            .binary_search(FilterOp::Gt, &SqlValue::Long(5), Range::new(20, 40))
            .unwrap();
        assert_eq!(found, Range::new(20, 40));
    }

    #[test]
    fn test_empty_range_reads_nothing() {
        let data: Vec<f64> = vec![];
        let storage = NumericStorage::new(&data);
        let mut builder = Builder::new(0);
        storage.linear_search_aligned(
            FilterOp::Ne,
            &SqlValue::Long(1),
            Range::new(0, 0),
            &mut builder,
        );
        assert_eq!(builder.build().count_set_bits(), 0);
        assert_eq!(
            storage.binary_search(FilterOp::Ne, &SqlValue::Long(1), Range::new(0, 0)),
            Some(Range::new(0, 0))
        );
    }

    #[test]
    fn test_double_column_with_long_operand() {
        let data: Vec<f64> = vec![0.5, 1.0, 1.5, 2.0, 2.5];
        let storage = NumericStorage::new(&data);
        let found = storage
            .binary_search(FilterOp::Ge, &SqlValue::Long(2), Range::new(0, 5))
            .unwrap();
        assert_eq!(found, Range::new(3, 5));
    }

    #[test]
    fn test_int_column_with_fractional_operand() {
        let data: Vec<i32> = vec![-3, -1, 0, 2, 4];
        let storage = NumericStorage::new(&data);
        let full = Range::new(0, 5);
        let v = SqlValue::Double(-0.5);
        assert_eq!(storage.binary_search(FilterOp::Gt, &v, full), Some(Range::new(2, 5)));
        assert_eq!(storage.binary_search(FilterOp::Le, &v, full), Some(Range::new(0, 2)));
        assert_eq!(storage.binary_search(FilterOp::Eq, &v, full), Some(Range::new(0, 0)));
    }

    #[test]
    fn test_column_type_tag() {
        let data: Vec<i64> = vec![1, 2];
        let storage = NumericStorage::new(&data);
        assert_eq!(storage.column_type(), ColumnType::Int64);
        assert_eq!(storage.len(), 2);

        let ints: Vec<i32> = vec![-1];
        let uints: Vec<u32> = vec![1];
        let doubles: Vec<f64> = vec![0.5];
        assert_eq!(ColumnData::from(&ints).column_type(), ColumnType::Int32);
        assert_eq!(ColumnData::from(&uints).column_type(), ColumnType::Uint32);
        assert_eq!(ColumnData::from(&doubles).column_type(), ColumnType::Double);
    }

    #[test]
    fn test_slice_renumbers_rows() {
        let data = iota(100);
        let window = NumericStorage::new(ColumnData::from(&data).slice(Range::new(90, 95)));
        assert_eq!(window.len(), 5);
        assert_eq!(window.column_type(), ColumnType::Uint32);

        let mut builder = Builder::new(5);
        window.linear_search_aligned(
            FilterOp::Ge,
            &SqlValue::Long(93),
            Range::new(0, 5),
            &mut builder,
        );
        assert_eq!(builder.build().iter_set_bits().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_is_not_null_on_dense_column_matches_range() {
        let data = iota(70);
        let storage = NumericStorage::new(&data);
        let mut builder = Builder::new(70);
        storage.linear_search_aligned(
            FilterOp::IsNotNull,
            &SqlValue::Null,
            Range::new(3, 66),
            &mut builder,
        );
        let bv = builder.build();
        assert_eq!(bv.count_set_bits(), 63);
        assert_eq!(bv.index_of_nth_set(0), 3);
    }
}
