//! Band hashing.
//!
//! A band is a contiguous run of `rows_per_band` signature positions. Its
//! fingerprint is FNV-1a/64 over the ASCII decimal rendering of each
//! position, concatenated without separators, and it is rendered as
//! lowercase hex without leading zeros. Stored band keys depend on this
//! exact recipe.

use std::fmt;
use std::hash::Hasher;

use fnv::FnvHasher;
use serde::{Deserialize, Serialize};

/// 64-bit fingerprint of one signature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BandHash(pub u64);

impl BandHash {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BandHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// Hash one band of signature rows.
pub fn band_hash(rows: &[u32]) -> BandHash {
    let mut hasher = FnvHasher::default();
    for row in rows {
        hasher.write(row.to_string().as_bytes());
    }
    BandHash(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_band_is_offset_basis() {
        assert_eq!(band_hash(&[]).as_u64(), 0xcbf2_9ce4_8422_2325);
    }

    #[test]
    fn decimal_rows_concatenated() {
        // "1" "2" "3" "4" "5" absorbed back to back == FNV-1a("12345").
        let h = band_hash(&[1, 2, 3, 4, 5]);
        assert_eq!(h.to_string(), "e575e8883c0f89f8");
        assert_eq!(h, band_hash(&[12, 3, 45]));
    }

    #[test]
    fn hex_rendering_drops_leading_zeros() {
        let h = band_hash(&[27, 0, 0, 0, 0]);
        assert_eq!(h.as_u64(), 0x0ab1_0cea_9875_3326);
        assert_eq!(h.to_string(), "ab10cea98753326");
    }

    #[test]
    fn order_sensitive() {
        assert_ne!(band_hash(&[1, 2]), band_hash(&[2, 1]));
    }
}
