//! # Banded LSH index
//!
//! Candidate retrieval over MinHash signatures. A signature of
//! `bands × rows_per_band` positions is split into bands; each band is
//! hashed and the id is appended to that band's bucket. Two signatures are
//! candidates when any band hash matches.
//!
//! With Jaccard similarity `s`, one band collides with probability
//! `s^rows` and a pair becomes a candidate with probability
//! `1 - (1 - s^rows)^bands` (see [`candidate_probability`]).
//!
//! ```
//! use index::{LshConfig, LshIndex};
//! use perceptual::{signature_of, PerceptualConfig};
//!
//! let cfg = PerceptualConfig::default();
//! let mut index = LshIndex::new(LshConfig::default()).unwrap();
//!
//! let seed = signature_of("test@gmail.com", &cfg).unwrap();
//! index.add("test@gmail.com", &seed).unwrap();
//!
//! let needle = signature_of("tset@gmail.com", &cfg).unwrap();
//! assert_eq!(index.query(&needle).unwrap(), vec!["test@gmail.com"]);
//! ```

mod band;
mod lsh;

pub use band::{band_hash, BandHash};
pub use lsh::{candidate_probability, LshIndex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of bands.
pub const DEFAULT_BANDS: usize = 20;

/// Default number of signature positions per band.
pub const DEFAULT_ROWS_PER_BAND: usize = 5;

/// Band layout of the index. `bands * rows_per_band` must equal the
/// signature length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LshConfig {
    pub bands: usize,
    pub rows_per_band: usize,
}

impl LshConfig {
    pub fn new(bands: usize, rows_per_band: usize) -> Self {
        Self {
            bands,
            rows_per_band,
        }
    }

    pub fn with_bands(mut self, bands: usize) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_rows_per_band(mut self, rows_per_band: usize) -> Self {
        self.rows_per_band = rows_per_band;
        self
    }

    /// Signature length this layout expects.
    pub fn signature_len(&self) -> usize {
        self.bands.saturating_mul(self.rows_per_band)
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        if self.bands == 0 || self.rows_per_band == 0 {
            return Err(IndexError::InvalidConfig(format!(
                "bands and rows_per_band must be >= 1 (got {}x{})",
                self.bands, self.rows_per_band
            )));
        }
        if self.bands.checked_mul(self.rows_per_band).is_none() {
            return Err(IndexError::InvalidConfig(
                "bands * rows_per_band overflows".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LshConfig {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS,
            rows_per_band: DEFAULT_ROWS_PER_BAND,
        }
    }
}

/// Index operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("signature length mismatch: expected {expected}, got {actual}")]
    SignatureLength { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_signature_length() {
        let cfg = LshConfig::default();
        assert_eq!(cfg.bands, 20);
        assert_eq!(cfg.rows_per_band, 5);
        assert_eq!(cfg.signature_len(), perceptual::DEFAULT_NUM_HASHES);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            LshConfig::new(0, 5).validate(),
            Err(IndexError::InvalidConfig(_))
        ));
        assert!(matches!(
            LshConfig::default().with_rows_per_band(0).validate(),
            Err(IndexError::InvalidConfig(_))
        ));
        assert!(LshIndex::new(LshConfig::new(4, 0)).is_err());
    }

    #[test]
    fn overflow_rejected() {
        assert!(LshConfig::new(usize::MAX, 2).validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = LshConfig::new(10, 10);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"bands":10,"rows_per_band":10}"#);
        let back: LshConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
