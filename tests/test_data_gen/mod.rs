//! Seeded column generators shared by the integration tests.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn identity(len: u32) -> Vec<u32> {
    (0..len).collect()
}

/// Unsorted `u32` values in `[0, max)`.
pub fn random_u32(len: usize, max: u32, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0..max)).collect()
}

/// Ascending `u32` values with runs of duplicates.
pub fn sorted_u32(len: usize, max: u32, seed: u64) -> Vec<u32> {
    let mut v = random_u32(len, max, seed);
    v.sort_unstable();
    v
}

pub fn random_i64(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1_000..1_000)).collect()
}

/// Halves in `[-50, 50)` so equality hits are common.
pub fn random_f64(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| f64::from(rng.random_range(-100i32..100)) / 2.0)
        .collect()
}

/// Non-null flags with roughly `null_pct` percent nulls.
pub fn random_nulls(len: usize, null_pct: u32, seed: u64) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0..100) >= null_pct).collect()
}
