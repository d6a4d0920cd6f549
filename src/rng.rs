//! Deterministic hashing based on splitmix64. Evaluated once per feature at
//! generator construction, never inside a height query.

use crate::features::ThrowSense;

const SALT_FAULT_SENSE: u64 = 0xFA17_5E45_E000_D0D0;

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[inline]
pub fn hash_index(seed: u64, salt: u64, index: usize) -> u64 {
    splitmix64(splitmix64(seed ^ salt) ^ index as u64)
}

/// Coin flip for the throw direction of fault `index` under `seed`.
pub fn throw_sense(seed: u64, index: usize) -> ThrowSense {
    if hash_index(seed, SALT_FAULT_SENSE, index) >> 63 == 0 {
        ThrowSense::Up
    } else {
        ThrowSense::Down
    }
}
