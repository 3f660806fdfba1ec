//! Storage trait shared by dense and nullable numeric columns.
//!
//! The executor calls these through `&dyn Storage`, once per predicate; the
//! per-row work underneath is statically dispatched on the element type.
//!
//! Preconditions are the caller's responsibility and are only checked with
//! `debug_assert!`. Violating them yields unspecified (but memory-safe)
//! results rather than an error:
//! - `range.end <= len()` (and `<= index.len()` for index searches),
//! - builders are at least `len()` rows,
//! - binary searches require ascending rows (or index) over `range`.

use colscan_core::prelude::{Builder, ColumnType, FilterOp, Range, SqlValue};

pub trait Storage {
    /// Number of rows.
    fn len(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn column_type(&self) -> ColumnType;

    /// Row-at-a-time scan of `range`, setting matching rows in `builder`.
    fn linear_search_unaligned(
        &self,
        op: FilterOp,
        value: &SqlValue,
        range: Range,
        builder: &mut Builder,
    );

    /// Block scan of `range`. Produces exactly the bits of
    /// [`Storage::linear_search_unaligned`].
    fn linear_search_aligned(
        &self,
        op: FilterOp,
        value: &SqlValue,
        range: Range,
        builder: &mut Builder,
    );

    /// Contiguous sub-range of `range` satisfying the predicate, given that
    /// the rows in `range` are sorted ascending. `None` when the operator
    /// does not reduce to one range (`Ne`).
    fn binary_search(&self, op: FilterOp, value: &SqlValue, range: Range) -> Option<Range>;

    /// Like [`Storage::binary_search`] but ordered through `index`, where
    /// `value(index[i])` ascends for `i` in `range`. The result is in index
    /// position space: map it through `index` to recover rows.
    fn binary_search_with_index(
        &self,
        op: FilterOp,
        value: &SqlValue,
        index: &[u32],
        range: Range,
    ) -> Option<Range>;

    /// Stable ascending sort of row ids in `indices` by column value.
    fn stable_sort(&self, indices: &mut [u32]);
}
