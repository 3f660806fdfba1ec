//! Nullable column: a non-null bitmap layered over a dense numeric storage.
//!
//! Row `r` is non-null iff `non_null.is_set(r)`, and its value lives at
//! `inner[non_null.count_set_bits_until(r)]`. The inner storage holds one
//! value per non-null row, so `inner.len() == non_null.count_set_bits()`.
//!
//! Sorted nullable data is ordered NULLS FIRST: every null row precedes every
//! non-null row, and the non-null values ascend.

use std::cmp::Ordering;

use colscan_core::prelude::{BitVector, Builder, ColumnType, FilterOp, Range, SqlValue};

use crate::coerce::validate;
use crate::numeric::{dispatch, Numeric, NumericStorage};
use crate::search::binary::{bound_search, partition_point};
use crate::traits::Storage;

#[derive(Debug, Clone, Copy)]
pub struct NullOverlay<'a> {
    inner: NumericStorage<'a>,
    non_null: &'a BitVector,
}

impl<'a> NullOverlay<'a> {
    pub fn new(inner: NumericStorage<'a>, non_null: &'a BitVector) -> Self {
        debug_assert_eq!(inner.len(), non_null.count_set_bits());
        Self { inner, non_null }
    }

    pub fn non_null(&self) -> &'a BitVector {
        self.non_null
    }

    /// Inner (dense) index of a non-null row.
    #[inline]
    fn dense_index(&self, row: u32) -> usize {
        self.non_null.count_set_bits_until(row) as usize
    }

    fn null_check(&self, op: FilterOp, range: Range, builder: &mut Builder) {
        let want_non_null = op == FilterOp::IsNotNull;
        for row in range {
            if self.non_null.is_set(row) == want_non_null {
                builder.set(row);
            }
        }
    }

    /// Runs `search` over the dense rows backing `range`, then projects the
    /// dense matches back onto row ids.
    fn linear_search(
        &self,
        op: FilterOp,
        range: Range,
        builder: &mut Builder,
        search: impl FnOnce(&NumericStorage<'a>, Range, &mut Builder),
    ) {
        if !op.is_comparison() {
            self.null_check(op, range, builder);
            return;
        }
        let dense = Range::new(
            self.non_null.count_set_bits_until(range.start),
            self.non_null.count_set_bits_until(range.end),
        );
        if dense.is_empty() {
            return;
        }

        // Scratch rows are window-relative: dense row `dense.start + i` is `i`.
        let window = NumericStorage::new(self.inner.data().slice(dense));
        let mut scratch = Builder::new(dense.size());
        search(&window, Range::new(0, dense.size()), &mut scratch);
        let matched = scratch.build();

        let mut dense_idx = 0;
        for row in range {
            if self.non_null.is_set(row) {
                if matched.is_set(dense_idx) {
                    builder.set(row);
                }
                dense_idx += 1;
            }
        }
    }
}

impl Storage for NullOverlay<'_> {
    fn len(&self) -> u32 {
        self.non_null.size()
    }

    fn column_type(&self) -> ColumnType {
        self.inner.column_type()
    }

    fn linear_search_unaligned(
        &self,
        op: FilterOp,
        value: &SqlValue,
        range: Range,
        builder: &mut Builder,
    ) {
        self.linear_search(op, range, builder, |window, rows, scratch| {
            window.linear_search_unaligned(op, value, rows, scratch)
        });
    }

    fn linear_search_aligned(
        &self,
        op: FilterOp,
        value: &SqlValue,
        range: Range,
        builder: &mut Builder,
    ) {
        self.linear_search(op, range, builder, |window, rows, scratch| {
            window.linear_search_aligned(op, value, rows, scratch)
        });
    }

    fn binary_search(&self, op: FilterOp, value: &SqlValue, range: Range) -> Option<Range> {
        if range.is_empty() {
            return Some(range);
        }
        let first_non_null = partition_point(range, |r| !self.non_null.is_set(r));
        match op {
            FilterOp::IsNull => Some(Range::new(range.start, first_non_null)),
            FilterOp::IsNotNull => Some(Range::new(first_non_null, range.end)),
            _ => {
                // Non-null rows of a NULLS FIRST range are contiguous, and so
                // are their dense indices.
                let base = self.non_null.count_set_bits_until(first_non_null);
                let dense = Range::new(base, base + (range.end - first_non_null));
                let found = self.inner.binary_search(op, value, dense)?;
                Some(Range::new(
                    first_non_null + (found.start - base),
                    first_non_null + (found.end - base),
                ))
            }
        }
    }

    fn binary_search_with_index(
        &self,
        op: FilterOp,
        value: &SqlValue,
        index: &[u32],
        range: Range,
    ) -> Option<Range> {
        if range.is_empty() {
            return Some(range);
        }
        let boundary = partition_point(range, |pos| !self.non_null.is_set(index[pos as usize]));
        match op {
            FilterOp::IsNull => Some(Range::new(range.start, boundary)),
            FilterOp::IsNotNull => Some(Range::new(boundary, range.end)),
            _ => {
                let values = Range::new(boundary, range.end);
                if values.is_empty() {
                    return Some(values);
                }
                dispatch!(self.inner.data(), d => {
                    bound_search(validate(op, value), values, |pos| {
                        d[self.dense_index(index[pos as usize])]
                    })
                })
            }
        }
    }

    fn stable_sort(&self, indices: &mut [u32]) {
        dispatch!(self.inner.data(), d => {
            indices.sort_by(|&a, &b| {
                match (self.non_null.is_set(a), self.non_null.is_set(b)) {
                    (false, false) => Ordering::Equal,
                    (false, true) => Ordering::Less,
                    (true, false) => Ordering::Greater,
                    (true, true) => d[self.dense_index(a)].sort_cmp(&d[self.dense_index(b)]),
                }
            })
        });
    }
}
