//! Query executor: evaluates constraint lists and sort orders over columns.
//!
//! Per constraint the executor picks the cheapest search the column's order
//! allows:
//! - `Sorted` columns are binary searched over the bounding range of the
//!   current selection.
//! - `SortedByIndex` columns are binary searched through their index over all
//!   rows; matching positions are mapped back to rows.
//! - Everything else, and any operator binary search cannot answer as one
//!   range (`Ne`), falls back to the configured linear scan.
//!
//! Results are intersected with the running selection, so constraints are
//! ANDed in order.

use std::fmt;

use serde::{Deserialize, Serialize};

use colscan_core::prelude::{
    Builder, Error, FilterOp, LinearScan, QueryConfig, Range, Result, SqlValue,
};
use colscan_storage::Storage;

use crate::metrics::emit_span;
use crate::row_map::RowMap;

/// What the executor may assume about a column's order.
#[derive(Debug, Clone, Copy, Default)]
pub enum SortState<'a> {
    #[default]
    Unsorted,
    /// Values ascend by row id.
    Sorted,
    /// `value(index[i])` ascends over `i`; `index` is a permutation of all rows.
    SortedByIndex(&'a [u32]),
}

/// A named column bound for one query.
pub struct Column<'a> {
    pub name: String,
    pub storage: &'a dyn Storage,
    pub sort_state: SortState<'a>,
}

impl<'a> Column<'a> {
    pub fn new(name: impl Into<String>, storage: &'a dyn Storage) -> Self {
        Self {
            name: name.into(),
            storage,
            sort_state: SortState::Unsorted,
        }
    }

    pub fn with_sort_state(mut self, sort_state: SortState<'a>) -> Self {
        self.sort_state = sort_state;
        self
    }
}

/// `columns[column] op value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub column: usize,
    pub op: FilterOp,
    pub value: SqlValue,
}

impl Constraint {
    pub fn new(column: usize, op: FilterOp, value: impl Into<SqlValue>) -> Self {
        Self {
            column,
            op,
            value: value.into(),
        }
    }
}

/// Ascending sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub column: usize,
}

/// How a constraint was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BinarySearch,
    IndexBinarySearch,
    LinearAligned,
    LinearUnaligned,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::BinarySearch => "binary",
            Strategy::IndexBinarySearch => "index_binary",
            Strategy::LinearAligned => "linear_aligned",
            Strategy::LinearUnaligned => "linear_unaligned",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryExecutor {
    cfg: QueryConfig,
}

impl QueryExecutor {
    pub fn new(cfg: QueryConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.cfg
    }

    /// Rows satisfying every constraint.
    pub fn filter(&self, columns: &[Column<'_>], constraints: &[Constraint]) -> Result<RowMap> {
        let row_count = check_columns(columns)?;
        let mut rows = RowMap::Range(Range::new(0, row_count));

        for c in constraints {
            let col = column(columns, c.column)?;
            if rows.is_empty() {
                continue;
            }
            let (next, strategy) = self.apply(col, c, &rows);
            tracing::debug!(
                column = %col.name,
                op = %c.op,
                value = %c.value,
                %strategy,
                before = rows.size(),
                after = next.size(),
                "applied constraint"
            );
            rows = next;
        }

        emit_span(
            "filter",
            &[
                ("constraints", constraints.len().to_string()),
                ("rows", rows.size().to_string()),
            ],
        );
        Ok(rows)
    }

    /// Row ids of `rows` ordered by `orders` (first key most significant).
    /// Ties on every key keep `rows`' iteration order.
    pub fn sort(
        &self,
        columns: &[Column<'_>],
        orders: &[Order],
        rows: &RowMap,
    ) -> Result<Vec<u32>> {
        let row_count = check_columns(columns)?;
        let bounds = rows.bounds();
        if bounds.end > row_count {
            return Err(Error::RangeOutOfBounds {
                range: bounds,
                len: row_count,
            });
        }

        let keys = orders
            .iter()
            .map(|o| column(columns, o.column))
            .collect::<Result<Vec<_>>>()?;

        let mut out = rows.to_index_vector();
        // Least significant key first; stability carries earlier passes.
        for col in keys.iter().rev() {
            col.storage.stable_sort(&mut out);
            tracing::debug!(column = %col.name, rows = out.len(), "sorted by key");
        }

        let names = key_names(&keys);
        tracing::debug!(columns = %names, rows = out.len(), "sorted rows");
        emit_span("sort", &[("columns", names), ("rows", out.len().to_string())]);
        Ok(out)
    }

    fn apply(&self, col: &Column<'_>, c: &Constraint, current: &RowMap) -> (RowMap, Strategy) {
        if let Some(answer) = self.try_binary(col, c, current) {
            return answer;
        }
        self.linear(col, c, current)
    }

    fn try_binary(
        &self,
        col: &Column<'_>,
        c: &Constraint,
        current: &RowMap,
    ) -> Option<(RowMap, Strategy)> {
        let min_rows = self.cfg.binary_search_min_rows;
        match col.sort_state {
            SortState::Unsorted => None,
            SortState::Sorted => {
                let bounds = current.bounds();
                if bounds.size() < min_rows {
                    return None;
                }
                let found = col.storage.binary_search(c.op, &c.value, bounds)?;
                let next = match current {
                    RowMap::Range(_) => RowMap::Range(found),
                    _ => current.intersect(&RowMap::Range(found)),
                };
                Some((next, Strategy::BinarySearch))
            }
            SortState::SortedByIndex(index) => {
                let n = col.storage.len();
                if !self.cfg.use_sorted_index || n < min_rows {
                    return None;
                }
                let positions = col.storage.binary_search_with_index(
                    c.op,
                    &c.value,
                    index,
                    Range::new(0, n),
                )?;
                let mut builder = Builder::new(n);
                for pos in positions {
                    builder.set(index[pos as usize]);
                }
                let matched = RowMap::BitVector(builder.build());
                Some((current.intersect(&matched), Strategy::IndexBinarySearch))
            }
        }
    }

    fn linear(&self, col: &Column<'_>, c: &Constraint, current: &RowMap) -> (RowMap, Strategy) {
        let bounds = current.bounds();
        let mut builder = Builder::new(col.storage.len());
        let strategy = match self.cfg.linear_scan {
            LinearScan::Aligned => {
                col.storage.linear_search_aligned(c.op, &c.value, bounds, &mut builder);
                Strategy::LinearAligned
            }
            LinearScan::Unaligned => {
                col.storage.linear_search_unaligned(c.op, &c.value, bounds, &mut builder);
                Strategy::LinearUnaligned
            }
        };
        let matched = RowMap::BitVector(builder.build());
        let next = match current {
            // The scan already stayed inside the range.
            RowMap::Range(_) => matched,
            _ => current.intersect(&matched),
        };
        (next, strategy)
    }
}

fn column<'c, 'a>(columns: &'c [Column<'a>], index: usize) -> Result<&'c Column<'a>> {
    columns.get(index).ok_or(Error::ColumnIndexOutOfBounds {
        index,
        columns: columns.len(),
    })
}

/// Sort key column names, most significant first.
fn key_names(keys: &[&Column<'_>]) -> String {
    keys.iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// All columns must have the same row count, and every sort index must cover
/// all rows. Returns the row count (0 for no columns).
fn check_columns(columns: &[Column<'_>]) -> Result<u32> {
    let Some(first) = columns.first() else {
        return Ok(0);
    };
    let expected = first.storage.len();
    for col in columns {
        let actual = col.storage.len();
        if actual != expected {
            return Err(Error::LengthMismatch {
                column: col.name.clone(),
                expected,
                actual,
            });
        }
        if let SortState::SortedByIndex(index) = col.sort_state {
            if index.len() != expected as usize {
                return Err(Error::IndexLengthMismatch {
                    column: col.name.clone(),
                    expected,
                    actual: index.len() as u32,
                });
            }
        }
    }
    Ok(expected)
}
