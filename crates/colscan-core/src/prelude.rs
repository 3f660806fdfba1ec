//! Convenient re-exports for downstream crates.

pub use crate::bit_vector::{BitVector, Builder};
pub use crate::config::{LinearScan, QueryConfig};
pub use crate::error::{Error, Result};
pub use crate::range::Range;
pub use crate::types::{ColumnType, FilterOp, NumericKind, SqlValue};
