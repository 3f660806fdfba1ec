//! Predicate evaluation over a row range.
//!
//! `linear` holds two deliberately separate scans: a row-at-a-time reference
//! scan and a 64-row block scan. They share no code; their only link is that
//! they must produce identical bitmaps. `binary` answers the same predicates
//! as a contiguous range when the rows (or an index over them) are sorted.

pub mod binary;
pub mod linear;
