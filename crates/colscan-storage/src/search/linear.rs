//! Linear scans writing matches into a bitmap builder.

use colscan_core::prelude::{Builder, Range};

use crate::coerce::{CmpOp, Validated};
use crate::numeric::Numeric;

/// Rows per bitmap word; the block size of the aligned scan.
pub const BLOCK_ROWS: usize = 64;

/// Reference scan: evaluates the predicate row by row and sets each match.
/// Correct for any range and ordering.
pub fn scan_unaligned<T: Numeric>(
    data: &[T],
    validated: Validated<T>,
    range: Range,
    builder: &mut Builder,
) {
    let (cmp, value) = match validated {
        Validated::NoRows => return,
        Validated::AllRows => {
            builder.set_range(range);
            return;
        }
        Validated::Compare(cmp, value) => (cmp, value),
    };

    let rows = &data[range.start as usize..range.end as usize];
    for (row, &x) in range.iter().zip(rows) {
        if cmp.eval(x, value) {
            builder.set(row);
        }
    }
}

/// Block scan: packs 64 comparisons into one word and ORs whole words into
/// the builder. Partial blocks at either end of the range are packed the same
/// way with an offset, so unaligned bounds stay correct.
pub fn scan_aligned<T: Numeric>(
    data: &[T],
    validated: Validated<T>,
    range: Range,
    builder: &mut Builder,
) {
    let (cmp, v) = match validated {
        Validated::NoRows => return,
        Validated::AllRows => {
            builder.set_range(range);
            return;
        }
        Validated::Compare(cmp, v) => (cmp, v),
    };

    // Resolve the operator once so the block loop is branch-free.
    match cmp {
        CmpOp::Eq => scan_blocks(data, range, builder, |x: T| x == v),
        CmpOp::Ne => scan_blocks(data, range, builder, |x: T| x != v),
        CmpOp::Lt => scan_blocks(data, range, builder, |x: T| x < v),
        CmpOp::Le => scan_blocks(data, range, builder, |x: T| x <= v),
        CmpOp::Gt => scan_blocks(data, range, builder, |x: T| x > v),
        CmpOp::Ge => scan_blocks(data, range, builder, |x: T| x >= v),
    }
}

fn scan_blocks<T: Copy, F: Fn(T) -> bool>(
    data: &[T],
    range: Range,
    builder: &mut Builder,
    pred: F,
) {
    let start = range.start as usize;
    let end = range.end as usize;

    let head_end = end.min(start.next_multiple_of(BLOCK_ROWS));
    pack_partial(data, start, head_end, builder, &pred);

    let body_end = head_end.max(end - end % BLOCK_ROWS);
    let first_word = head_end / BLOCK_ROWS;
    for (i, block) in data[head_end..body_end]
        .chunks_exact(BLOCK_ROWS)
        .enumerate()
    {
        builder.or_word(first_word + i, pack_block(block, &pred));
    }

    pack_partial(data, body_end, end, builder, &pred);
}

#[inline]
fn pack_block<T: Copy, F: Fn(T) -> bool>(block: &[T], pred: &F) -> u64 {
    let mut bits = 0u64;
    for (i, &x) in block.iter().enumerate() {
        bits |= (pred(x) as u64) << i;
    }
    bits
}

/// Rows `[lo, hi)` lie within a single block.
fn pack_partial<T: Copy, F: Fn(T) -> bool>(
    data: &[T],
    lo: usize,
    hi: usize,
    builder: &mut Builder,
    pred: &F,
) {
    if lo == hi {
        return;
    }
    let word = lo / BLOCK_ROWS;
    let offset = lo % BLOCK_ROWS;
    debug_assert!(hi - word * BLOCK_ROWS <= BLOCK_ROWS);
    builder.or_word(word, pack_block(&data[lo..hi], pred) << offset);
}
