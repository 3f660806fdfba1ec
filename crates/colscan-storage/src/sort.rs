//! Stable index sort.

use crate::numeric::Numeric;

/// Reorders `indices` so `key(indices[i])` is non-decreasing. Rows with equal
/// keys keep the relative order they had in `indices` on input, which lets
/// callers build multi-key orders by sorting on the least significant key
/// first.
pub fn stable_sort_by_key<T: Numeric>(indices: &mut [u32], key: impl Fn(u32) -> T) {
    // `sort_by` is a stable merge sort.
    indices.sort_by(|&a, &b| key(a).sort_cmp(&key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floats_with_nan_sort_last() {
        let data = [2.0, f64::NAN, -1.0, 2.0, 0.0];
        let mut idx: Vec<u32> = vec![4, 3, 2, 1, 0];
        stable_sort_by_key(&mut idx, |r| data[r as usize]);
        assert_eq!(idx, vec![2, 4, 3, 0, 1]);
    }

    #[test]
    fn test_subset_of_rows() {
        let data = [5i64, 4, 3, 2, 1];
        let mut idx: Vec<u32> = vec![0, 2, 4];
        stable_sort_by_key(&mut idx, |r| data[r as usize]);
        assert_eq!(idx, vec![4, 2, 0]);
    }
}
