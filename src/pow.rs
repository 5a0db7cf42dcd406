//! SHA-256 proof-of-work harness.
//!
//! A proof for `data` at difficulty `d` is the smallest nonce `n` such that
//! the lowercase hex of `SHA-256(data || decimal(n))` starts with `d` zeros.

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

/// Hex length of a SHA-256 digest; no digest has more leading zeros.
pub const MAX_DIFFICULTY: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PowError {
    #[error("difficulty {0} exceeds {MAX_DIFFICULTY} hex digits")]
    Difficulty(usize),
    #[error("no nonce in 0..={max_nonce} meets difficulty {difficulty}")]
    Exhausted { difficulty: usize, max_nonce: u64 },
}

/// A nonce and the digest it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub nonce: u64,
    /// Lowercase hex of the SHA-256 digest.
    pub digest: String,
}

/// `SHA-256(data || decimal(nonce))`.
pub fn digest(data: &[u8], nonce: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.update(nonce.to_string().as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Number of leading `'0'` characters in the hex rendering of `digest`.
pub fn leading_zero_nibbles(digest: &[u8]) -> usize {
    let mut zeros = 0;
    for byte in digest {
        if *byte == 0 {
            zeros += 2;
            continue;
        }
        if byte >> 4 == 0 {
            zeros += 1;
        }
        break;
    }
    zeros
}

/// Scan nonces `0..=max_nonce` in order and return the first proof.
pub fn solve(data: &[u8], difficulty: usize, max_nonce: u64) -> Result<Proof, PowError> {
    if difficulty > MAX_DIFFICULTY {
        return Err(PowError::Difficulty(difficulty));
    }
    for nonce in 0..=max_nonce {
        let hash = digest(data, nonce);
        if leading_zero_nibbles(&hash) >= difficulty {
            debug!(nonce, difficulty, "pow_solved");
            return Ok(Proof {
                nonce,
                digest: hex::encode(hash),
            });
        }
    }
    Err(PowError::Exhausted {
        difficulty,
        max_nonce,
    })
}

/// Whether `nonce` meets `difficulty` for `data`.
pub fn verify(data: &[u8], nonce: u64, difficulty: usize) -> bool {
    difficulty <= MAX_DIFFICULTY && leading_zero_nibbles(&digest(data, nonce)) >= difficulty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_difficulty_four() {
        let proof = solve(b"Hello, world!", 4, 100_000).unwrap();
        assert_eq!(proof.nonce, 4250);
        assert_eq!(
            proof.digest,
            "0000c3af42fc31103f1fdc0151fa747ff87349a4714df7cc52ea464e12dcd4e9"
        );
        assert!(verify(b"Hello, world!", 4250, 4));
        assert!(!verify(b"Hello, world!", 4249, 4));
    }

    #[test]
    fn difficulty_zero_accepts_first_nonce() {
        let proof = solve(b"anything", 0, 0).unwrap();
        assert_eq!(proof.nonce, 0);
        assert_eq!(proof.digest, hex::encode(digest(b"anything", 0)));
    }

    #[test]
    fn counts_half_bytes() {
        assert_eq!(leading_zero_nibbles(&[0x00, 0x00, 0xc3]), 4);
        assert_eq!(leading_zero_nibbles(&[0x00, 0x0f]), 3);
        assert_eq!(leading_zero_nibbles(&[0x10]), 0);
        assert_eq!(leading_zero_nibbles(&[0x00, 0x00]), 4);
        assert_eq!(leading_zero_nibbles(&[]), 0);
    }

    #[test]
    fn search_is_bounded() {
        assert_eq!(
            solve(b"Hello, world!", 4, 4249),
            Err(PowError::Exhausted {
                difficulty: 4,
                max_nonce: 4249
            })
        );
        assert_eq!(solve(b"x", 65, 10), Err(PowError::Difficulty(65)));
        assert!(!verify(b"x", 0, 65));
    }
}
