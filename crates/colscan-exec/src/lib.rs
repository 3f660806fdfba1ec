#![forbid(unsafe_code)]
//! colscan-exec: selection handoff and the query executor glue.
//!
//! The executor binds named columns, chooses linear or binary search per
//! constraint from what it knows about each column's order, and composes the
//! results into one `RowMap`. It is also where caller preconditions that are
//! cheap to check get reported as errors instead of unspecified results.

pub mod executor;
pub mod metrics;
pub mod row_map;

pub use executor::{Column, Constraint, Order, QueryExecutor, SortState, Strategy};
pub use row_map::RowMap;
