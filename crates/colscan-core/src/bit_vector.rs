//! Immutable row bitmap with count and rank queries, plus its builder.
//!
//! A [`Builder`] is owned by exactly one in-progress search. Consuming it via
//! [`Builder::build`] freezes the bits and precomputes per-word prefix counts,
//! after which the [`BitVector`] can be shared freely.

use crate::range::Range;

const WORD_BITS: u32 = 64;

#[inline]
fn word_count(size: u32) -> usize {
    size.div_ceil(WORD_BITS) as usize
}

/// Mask with the low `bits` bits set (`bits < 64`).
#[inline]
fn low_mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

/// Position of the `n`-th (0-indexed) set bit of `word`. `n < popcount`.
#[inline]
fn select_in_word(mut word: u64, n: u32) -> u32 {
    for _ in 0..n {
        word &= word - 1;
    }
    word.trailing_zeros()
}

/// Accumulates bits for rows `[0, size)`.
#[derive(Debug)]
pub struct Builder {
    words: Vec<u64>,
    size: u32,
}

impl Builder {
    /// All bits start unset. This is the only allocation a search makes.
    pub fn new(size: u32) -> Self {
        Self {
            words: vec![0; word_count(size)],
            size,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn set(&mut self, row: u32) {
        debug_assert!(row < self.size, "row {} outside builder of {}", row, self.size);
        self.words[(row / WORD_BITS) as usize] |= 1u64 << (row % WORD_BITS);
    }

    /// Set every row of `range`.
    pub fn set_range(&mut self, range: Range) {
        debug_assert!(range.end <= self.size);
        if range.is_empty() {
            return;
        }
        let first = (range.start / WORD_BITS) as usize;
        let last = ((range.end - 1) / WORD_BITS) as usize;
        let head = !low_mask(range.start % WORD_BITS);
        let tail = match range.end % WORD_BITS {
            0 => u64::MAX,
            r => low_mask(r),
        };
        if first == last {
            self.words[first] |= head & tail;
            return;
        }
        self.words[first] |= head;
        for w in &mut self.words[first + 1..last] {
            *w = u64::MAX;
        }
        self.words[last] |= tail;
    }

    /// OR a whole 64-row block into word `word_idx` (rows `word_idx * 64 ..`).
    #[inline]
    pub fn or_word(&mut self, word_idx: usize, bits: u64) {
        self.words[word_idx] |= bits;
    }

    /// Freeze into an immutable bit vector.
    pub fn build(mut self) -> BitVector {
        let rem = self.size % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= low_mask(rem);
            }
        }

        let mut prefix = Vec::with_capacity(self.words.len() + 1);
        let mut acc = 0u32;
        prefix.push(0);
        for w in &self.words {
            acc += w.count_ones();
            prefix.push(acc);
        }

        BitVector {
            words: self.words,
            prefix,
            size: self.size,
        }
    }
}

/// Immutable bitmap over rows `[0, size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVector {
    words: Vec<u64>,
    /// `prefix[w]` = set bits in words `[0, w)`; one extra trailing entry.
    prefix: Vec<u32>,
    size: u32,
}

impl BitVector {
    /// Bit vector of `size` rows with `range` set.
    pub fn from_range(size: u32, range: Range) -> Self {
        let mut b = Builder::new(size);
        b.set_range(range);
        b.build()
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_set(&self, row: u32) -> bool {
        debug_assert!(row < self.size);
        (self.words[(row / WORD_BITS) as usize] >> (row % WORD_BITS)) & 1 == 1
    }

    pub fn count_set_bits(&self) -> u32 {
        self.prefix[self.words.len()]
    }

    /// Number of set bits in rows `[0, row)`.
    pub fn count_set_bits_until(&self, row: u32) -> u32 {
        debug_assert!(row <= self.size);
        let w = (row / WORD_BITS) as usize;
        let rem = row % WORD_BITS;
        if rem == 0 {
            return self.prefix[w];
        }
        self.prefix[w] + (self.words[w] & low_mask(rem)).count_ones()
    }

    /// Row of the `n`-th (0-indexed) set bit: the smallest row whose prefix
    /// `[0, row]` contains `n + 1` set bits. Requires `n < count_set_bits()`.
    pub fn index_of_nth_set(&self, n: u32) -> u32 {
        debug_assert!(n < self.count_set_bits());
        // Last word whose preceding count is <= n holds the answer.
        let w = self.prefix.partition_point(|&c| c <= n) - 1;
        let in_word = select_in_word(self.words[w], n - self.prefix[w]);
        w as u32 * WORD_BITS + in_word
    }

    /// Rows with their bit set, ascending.
    pub fn iter_set_bits(&self) -> SetBits<'_> {
        SetBits {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Bitwise AND. Both vectors must have the same size.
    pub fn and(&self, other: &BitVector) -> BitVector {
        debug_assert_eq!(self.size, other.size);
        let mut b = Builder::new(self.size);
        for (i, (x, y)) in self.words.iter().zip(&other.words).enumerate() {
            b.or_word(i, x & y);
        }
        b.build()
    }
}

/// Iterator over set rows of a [`BitVector`].
pub struct SetBits<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for SetBits<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.current == 0 {
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
        let bit = self.current.trailing_zeros();
        self.current &= self.current - 1;
        Some(self.word_idx as u32 * WORD_BITS + bit)
    }
}
