//! Boundary searches over sorted rows.
//!
//! Both the plain sorted search and the index-based search reduce to
//! `bound_search` with a different key accessor: `i -> data[i]` or
//! `pos -> data[index[pos]]`. Results are in the accessor's position space.

use colscan_core::prelude::Range;

use crate::coerce::{CmpOp, Validated};
use crate::numeric::Numeric;

/// First position in `range` where `pred` is false. `pred` must be true on a
/// prefix of `range` and false on the rest.
pub fn partition_point(range: Range, mut pred: impl FnMut(u32) -> bool) -> u32 {
    let (mut lo, mut hi) = (range.start, range.end);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Answers a validated predicate over positions whose keys ascend across
/// `range`. `Ne` has no single-range answer and yields `None`.
pub fn bound_search<T: Numeric>(
    validated: Validated<T>,
    range: Range,
    key: impl Fn(u32) -> T,
) -> Option<Range> {
    let (cmp, v) = match validated {
        Validated::NoRows => return Some(Range::empty_at(range.start)),
        Validated::AllRows => return Some(range),
        Validated::Compare(cmp, v) => (cmp, v),
    };

    let lower_bound = |r: Range| partition_point(r, |i| key(i) < v);
    let upper_bound = |r: Range| partition_point(r, |i| key(i) <= v);

    let found = match cmp {
        CmpOp::Ge => Range::new(lower_bound(range), range.end),
        CmpOp::Gt => Range::new(upper_bound(range), range.end),
        CmpOp::Lt => Range::new(range.start, lower_bound(range)),
        CmpOp::Le => Range::new(range.start, upper_bound(range)),
        CmpOp::Eq => {
            let lo = lower_bound(range);
            Range::new(lo, upper_bound(Range::new(lo, range.end)))
        }
        CmpOp::Ne => return None,
    };
    Some(found)
}
