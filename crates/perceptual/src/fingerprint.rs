//! The MinHash signature value type.
//!
//! A signature is part of the public contract: its length, element type and
//! little-endian wire form must stay stable, otherwise stored signatures
//! stop matching freshly computed ones.

use serde::{Deserialize, Serialize};

use crate::config::PerceptualError;

/// Fixed-length MinHash signature.
///
/// Position `i` holds the minimum of the `i`-th seeded FNV-1/32 hash over
/// the shingle set. An empty shingle set maps every position to
/// `u32::MAX`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Signature {
    values: Vec<u32>,
}

impl Signature {
    /// Wrap raw signature values.
    pub fn from_values(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// Signature of the empty shingle set: every position is `u32::MAX`.
    pub fn sentinel(len: usize) -> Self {
        Self {
            values: vec![u32::MAX; len],
        }
    }

    /// True when every position holds the empty-set sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.values.iter().all(|&v| v == u32::MAX)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    pub fn into_values(self) -> Vec<u32> {
        self.values
    }

    /// Estimate Jaccard similarity as the fraction of agreeing positions.
    ///
    /// Signatures of different lengths, or empty ones, are not comparable
    /// and estimate to 0.0.
    pub fn jaccard_estimate(&self, other: &Signature) -> f64 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }
        let agree = self
            .values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count();
        agree as f64 / self.values.len() as f64
    }

    /// Encode as consecutive little-endian `u32` values.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.values.len() * 4);
        for v in &self.values {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    /// Decode the little-endian wire form produced by [`Signature::to_le_bytes`].
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, PerceptualError> {
        if bytes.len() % 4 != 0 {
            return Err(PerceptualError::InvalidSignatureBytes { len: bytes.len() });
        }
        let values = bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Self { values })
    }
}

impl AsRef<[u32]> for Signature {
    fn as_ref(&self) -> &[u32] {
        &self.values
    }
}
