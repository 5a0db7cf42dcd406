//! Configuration and error types for shingling and MinHash.
//!
//! The perceptual layer is a pure function of `(normalized_text, config)`:
//! no I/O, no environment lookups, no clocks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default shingle length in bytes.
pub const DEFAULT_K: usize = 3;

/// Default signature length.
pub const DEFAULT_NUM_HASHES: usize = 100;

/// Configuration for signature generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerceptualConfig {
    /// Configuration schema version.
    ///
    /// Any change that can alter a signature must bump this version so that
    /// stored signatures are never compared across incompatible generations.
    pub version: u32,
    /// Shingle length in bytes (k-shingling).
    pub k: usize,
    /// Number of MinHash positions in a signature.
    pub num_hashes: usize,
    /// Compute signature positions on the rayon pool.
    ///
    /// Output is bit-identical either way; only useful for large shingle sets.
    pub use_parallel: bool,
}

impl PerceptualConfig {
    /// Create a new configuration with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shingle length.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the signature length.
    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    /// Enable or disable parallel signature computation.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.version < 1 {
            return Err(PerceptualError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.k < 1 {
            return Err(PerceptualError::InvalidConfigK { k: self.k });
        }
        if self.num_hashes < 1 {
            return Err(PerceptualError::InvalidConfigHashes {
                num_hashes: self.num_hashes,
            });
        }
        Ok(())
    }
}

impl Default for PerceptualConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: DEFAULT_K,
            num_hashes: DEFAULT_NUM_HASHES,
            use_parallel: false,
        }
    }
}

/// Errors returned by the perceptual layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("invalid config: k must be >= 1 (got {k})")]
    InvalidConfigK { k: usize },

    #[error("invalid config: num_hashes must be >= 1 (got {num_hashes})")]
    InvalidConfigHashes { num_hashes: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("signature bytes must be a multiple of 4 (got {len})")]
    InvalidSignatureBytes { len: usize },
}
