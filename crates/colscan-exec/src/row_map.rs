//! Row selections handed between searches.
//!
//! A selection is whatever representation the producing search returned:
//! a contiguous range (binary search), a bitmap (linear search) or an explicit
//! list of row ids (sorted output). Consumers never need to know which
//! search produced it.

use colscan_core::prelude::{BitVector, Builder, Range};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMap {
    Range(Range),
    BitVector(BitVector),
    /// Row ids in caller-meaningful order (not necessarily ascending).
    IndexVector(Vec<u32>),
}

impl RowMap {
    /// Number of selected rows.
    pub fn size(&self) -> u32 {
        match self {
            RowMap::Range(r) => r.size(),
            RowMap::BitVector(bv) => bv.count_set_bits(),
            RowMap::IndexVector(v) => v.len() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Row id of the `i`-th selected row. Requires `i < size()`.
    pub fn get(&self, i: u32) -> u32 {
        match self {
            RowMap::Range(r) => r.start + i,
            RowMap::BitVector(bv) => bv.index_of_nth_set(i),
            RowMap::IndexVector(v) => v[i as usize],
        }
    }

    pub fn contains(&self, row: u32) -> bool {
        match self {
            RowMap::Range(r) => r.contains(row),
            RowMap::BitVector(bv) => row < bv.size() && bv.is_set(row),
            RowMap::IndexVector(v) => v.contains(&row),
        }
    }

    pub fn iter(&self) -> RowMapIter<'_> {
        match self {
            RowMap::Range(r) => RowMapIter::Range(r.iter()),
            RowMap::BitVector(bv) => RowMapIter::BitVector(bv.iter_set_bits()),
            RowMap::IndexVector(v) => RowMapIter::IndexVector(v.iter()),
        }
    }

    /// Smallest range covering every selected row.
    pub fn bounds(&self) -> Range {
        match self {
            RowMap::Range(r) => *r,
            RowMap::BitVector(bv) => match bv.count_set_bits() {
                0 => Range::empty_at(0),
                n => Range::new(bv.index_of_nth_set(0), bv.index_of_nth_set(n - 1) + 1),
            },
            RowMap::IndexVector(v) => match (v.iter().min(), v.iter().max()) {
                (Some(&lo), Some(&hi)) => Range::new(lo, hi + 1),
                _ => Range::empty_at(0),
            },
        }
    }

    /// Rows selected by both. Keeps `self`'s order when `self` is an index
    /// vector; otherwise the result ascends.
    pub fn intersect(&self, other: &RowMap) -> RowMap {
        match (self, other) {
            (RowMap::Range(a), RowMap::Range(b)) => RowMap::Range(a.intersect(b)),
            (RowMap::Range(r), RowMap::BitVector(bv))
            | (RowMap::BitVector(bv), RowMap::Range(r)) => {
                let clipped = r.intersect(&Range::new(0, bv.size()));
                RowMap::BitVector(bv.and(&BitVector::from_range(bv.size(), clipped)))
            }
            (RowMap::BitVector(a), RowMap::BitVector(b)) if a.size() == b.size() => {
                RowMap::BitVector(a.and(b))
            }
            (RowMap::IndexVector(v), RowMap::IndexVector(w)) => {
                let mut lookup = w.clone();
                lookup.sort_unstable();
                RowMap::IndexVector(
                    v.iter()
                        .copied()
                        .filter(|r| lookup.binary_search(r).is_ok())
                        .collect(),
                )
            }
            (RowMap::IndexVector(v), other) => {
                RowMap::IndexVector(v.iter().copied().filter(|&r| other.contains(r)).collect())
            }
            (this, RowMap::IndexVector(v)) => {
                let mut rows: Vec<u32> = v.iter().copied().filter(|&r| this.contains(r)).collect();
                rows.sort_unstable();
                rows.dedup();
                RowMap::IndexVector(rows)
            }
            (RowMap::BitVector(a), RowMap::BitVector(b)) => {
                // Different sizes: only rows inside both can match.
                let size = a.size().min(b.size());
                let mut builder = Builder::new(size);
                for row in a.iter_set_bits().take_while(|&r| r < size) {
                    if b.is_set(row) {
                        builder.set(row);
                    }
                }
                RowMap::BitVector(builder.build())
            }
        }
    }

    /// Selected row ids in iteration order.
    pub fn to_index_vector(&self) -> Vec<u32> {
        match self {
            RowMap::IndexVector(v) => v.clone(),
            _ => self.iter().collect(),
        }
    }
}

impl From<Range> for RowMap {
    fn from(r: Range) -> Self {
        RowMap::Range(r)
    }
}

impl From<BitVector> for RowMap {
    fn from(bv: BitVector) -> Self {
        RowMap::BitVector(bv)
    }
}

impl From<Vec<u32>> for RowMap {
    fn from(v: Vec<u32>) -> Self {
        RowMap::IndexVector(v)
    }
}

pub enum RowMapIter<'a> {
    Range(std::ops::Range<u32>),
    BitVector(colscan_core::bit_vector::SetBits<'a>),
    IndexVector(std::slice::Iter<'a, u32>),
}

impl Iterator for RowMapIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        match self {
            RowMapIter::Range(it) => it.next(),
            RowMapIter::BitVector(it) => it.next(),
            RowMapIter::IndexVector(it) => it.next().copied(),
        }
    }
}
