//! MinHash signatures over byte shingles.
//!
//! The hash family is FNV-1 at 32 bits (multiply, then XOR; *not* FNV-1a).
//! Position `i` hashes the ASCII decimal rendering of `i` followed by the
//! shingle bytes, starting from a fresh offset basis:
//!
//! ```text
//! h_i(s) = fnv1_32(offset_basis, ascii_decimal(i) || s)
//! ```
//!
//! Feeding the raw integer bytes of `i` instead would produce different
//! signatures, so the decimal seed is part of the format.

use rayon::prelude::*;

use crate::fingerprint::Signature;
use crate::shingles::ShingleSet;

pub const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;
pub const FNV32_PRIME: u32 = 0x0100_0193;

/// Absorb `bytes` into an FNV-1/32 state.
#[inline]
pub fn fnv1_32(mut state: u32, bytes: &[u8]) -> u32 {
    for &b in bytes {
        state = state.wrapping_mul(FNV32_PRIME);
        state ^= u32::from(b);
    }
    state
}

/// Compute an `n`-position signature from a shingle set.
///
/// An empty set yields the all-`u32::MAX` sentinel.
pub fn minhash_signature(shingles: &ShingleSet, n: usize, use_parallel: bool) -> Signature {
    if shingles.is_empty() {
        return Signature::sentinel(n);
    }

    let mut values = Vec::with_capacity(n);
    if use_parallel {
        (0..n)
            .into_par_iter()
            .map(|i| compute_slot(shingles, i))
            .collect_into_vec(&mut values);
    } else {
        values.extend((0..n).map(|i| compute_slot(shingles, i)));
    }
    Signature::from_values(values)
}

/// Minimum of `h_i` over the shingle set.
#[inline]
pub(crate) fn compute_slot(shingles: &ShingleSet, i: usize) -> u32 {
    // FNV is sequential, so the seed prefix is absorbed once per position.
    let seeded = fnv1_32(FNV32_OFFSET_BASIS, i.to_string().as_bytes());
    shingles
        .iter()
        .map(|s| fnv1_32(seeded, s))
        .min()
        .unwrap_or(u32::MAX)
}
