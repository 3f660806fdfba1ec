#![forbid(unsafe_code)]
//! colscan-core: value types shared by the column engine.
//!
//! - `Range`: half-open row interval, bound and result of searches.
//! - `BitVector` / `Builder`: row bitmaps with count and rank queries.
//! - `ColumnType`, `SqlValue`, `FilterOp`: the type and predicate model.
//! - `QueryConfig` and the crate-wide `Error`.
//!
//! No storage access and no allocation policy here.

pub mod bit_vector;
pub mod config;
pub mod error;
pub mod prelude;
pub mod range;
pub mod types;
