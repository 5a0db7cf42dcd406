//! # Perceptual signatures for short identities
//!
//! Turns a normalized identity (email address, personal name) into a
//! fixed-length MinHash signature whose agreement rate with another
//! signature estimates the Jaccard similarity of their shingle sets.
//!
//! ## Contract
//!
//! - Input is already normalized upstream; the shingler only trims and
//!   lowercases defensively.
//! - The API is a pure function of `(text, config)`: no I/O, no global state.
//!
//! Invariant: for the same text and the same [`PerceptualConfig`] the
//! signature is bit-identical across runs, threads and platforms.
//!
//! ## Pipeline
//!
//! 1.  **Shingling**: the UTF-8 bytes are cut into overlapping k-byte
//!     windows and collected into a set.
//! 2.  **MinHashing**: each of the `num_hashes` positions takes the minimum
//!     of a seeded FNV-1/32 hash over the set.
//!
//! ```
//! use perceptual::{signature_of, PerceptualConfig};
//!
//! let cfg = PerceptualConfig::default();
//! let a = signature_of("test@gmail.com", &cfg).unwrap();
//! let b = signature_of("tset@gmail.com", &cfg).unwrap();
//!
//! assert_eq!(a.len(), 100);
//! assert!(a.jaccard_estimate(&b) >= 0.6);
//! ```
pub mod config;
pub mod fingerprint;
mod minhash;
mod shingles;

pub use crate::config::{PerceptualConfig, PerceptualError, DEFAULT_K, DEFAULT_NUM_HASHES};
pub use crate::fingerprint::Signature;
pub use crate::minhash::{fnv1_32, minhash_signature, FNV32_OFFSET_BASIS, FNV32_PRIME};
pub use crate::shingles::{shingle, ShingleSet};

/// Current signature algorithm version for this crate.
pub const PERCEPTUAL_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const PERCEPTUAL_ALGORITHM: &str = "byteshingle+fnv1minhash_v1";

/// Compute the signature of `text` (shingle → MinHash).
///
/// Text shorter than `k` bytes produces the all-`u32::MAX` sentinel. It never
/// shares a band with a real signature, but every sentinel shares every band
/// with every other sentinel, so callers bucketing by LSH must special-case it.
pub fn signature_of(text: &str, cfg: &PerceptualConfig) -> Result<Signature, PerceptualError> {
    cfg.validate()?;
    let shingles = shingle(text, cfg.k);
    Ok(minhash_signature(&shingles, cfg.num_hashes, cfg.use_parallel))
}
