//! Half-open row-index interval used as search bound and search result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows `[start, end)`.
///
/// Any `Range` handed to or returned from a storage search satisfies
/// `start <= end <= storage.len()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    pub const fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Empty range positioned at `at`.
    pub const fn empty_at(at: u32) -> Self {
        Self { start: at, end: at }
    }

    pub const fn size(&self) -> u32 {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn contains(&self, row: u32) -> bool {
        row >= self.start && row < self.end
    }

    /// True when `other` lies entirely inside `self`. Empty ranges are
    /// contained when their position is within bounds.
    pub const fn contains_range(&self, other: &Range) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Intersection of two ranges; empty (at `max(start)`) when disjoint.
    pub fn intersect(&self, other: &Range) -> Range {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end).max(start);
        Range { start, end }
    }

    pub fn iter(&self) -> std::ops::Range<u32> {
        self.start..self.end
    }
}

impl From<std::ops::Range<u32>> for Range {
    fn from(r: std::ops::Range<u32>) -> Self {
        Range::new(r.start, r.end)
    }
}

impl IntoIterator for Range {
    type Item = u32;
    type IntoIter = std::ops::Range<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.start..self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
