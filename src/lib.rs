#![forbid(unsafe_code)]
//! colscan: filter, search and sort over in-memory numeric columns.
//!
//! Facade over the workspace crates:
//! - [`colscan_core`]: row ranges, bit vectors, value and operator types, config.
//! - [`colscan_storage`]: typed numeric storage with linear/binary search and sort.
//! - [`colscan_exec`]: row selections and the query executor.

pub use colscan_core;
pub use colscan_exec;
pub use colscan_storage;
