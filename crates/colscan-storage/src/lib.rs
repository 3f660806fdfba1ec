#![forbid(unsafe_code)]
//! colscan-storage: numeric column storage and the search/sort engine.
//!
//! Design intent:
//! - Storages are non-owning views; nothing here copies a column.
//! - Every operation is synchronous and runs to completion over its range.
//! - The only allocation a search makes is the caller's `Builder`; the null
//!   overlay adds one scratch builder per call, never per row.
//! - Operand/column type mismatches resolve through `coerce`, never an error.

pub mod coerce;
pub mod null_overlay;
pub mod numeric;
pub mod search;
pub mod sort;
pub mod traits;

pub use null_overlay::NullOverlay;
pub use numeric::{ColumnData, Numeric, NumericStorage};
pub use traits::Storage;
