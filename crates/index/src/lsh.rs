use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use perceptual::Signature;
use tracing::{debug, trace};

use crate::band::{band_hash, BandHash};
use crate::{IndexError, LshConfig};

/// Banded LSH index mapping band hashes to the ids that produced them.
///
/// The index only grows: ids are appended, never removed. Within a band
/// bucket ids keep insertion order, which makes [`LshIndex::query`]
/// deterministic for a given insertion history.
#[derive(Debug, Clone)]
pub struct LshIndex {
    config: LshConfig,
    tables: Vec<HashMap<u64, Vec<Arc<str>>>>,
    inserted: usize,
}

impl LshIndex {
    /// Create an empty index. Fails if the band layout is invalid.
    pub fn new(config: LshConfig) -> Result<Self, IndexError> {
        config.validate()?;
        let tables = (0..config.bands).map(|_| HashMap::new()).collect();
        Ok(Self {
            config,
            tables,
            inserted: 0,
        })
    }

    pub fn config(&self) -> &LshConfig {
        &self.config
    }

    /// Number of `add` calls recorded.
    pub fn len(&self) -> usize {
        self.inserted
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }

    /// Band hashes of `signature`, one per band in band order.
    pub fn band_keys(&self, signature: &Signature) -> Result<Vec<BandHash>, IndexError> {
        self.check_len(signature)?;
        Ok(signature
            .as_slice()
            .chunks_exact(self.config.rows_per_band)
            .map(band_hash)
            .collect())
    }

    /// Append `id` to the bucket of every band of `signature`.
    pub fn add(&mut self, id: &str, signature: &Signature) -> Result<(), IndexError> {
        let keys = self.band_keys(signature)?;
        let id: Arc<str> = Arc::from(id);
        for (table, key) in self.tables.iter_mut().zip(keys) {
            table.entry(key.as_u64()).or_default().push(Arc::clone(&id));
        }
        self.inserted += 1;
        trace!(id = %id, "lsh_add");
        Ok(())
    }

    /// Ids sharing at least one band with `signature`.
    ///
    /// De-duplicated; ordered by band, then by insertion within a band.
    pub fn query(&self, signature: &Signature) -> Result<Vec<&str>, IndexError> {
        let keys = self.band_keys(signature)?;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut candidates = Vec::new();
        for (table, key) in self.tables.iter().zip(keys) {
            let Some(ids) = table.get(&key.as_u64()) else {
                continue;
            };
            for id in ids {
                if seen.insert(id.as_ref()) {
                    candidates.push(id.as_ref());
                }
            }
        }
        debug!(candidates = candidates.len(), "lsh_query");
        Ok(candidates)
    }

    fn check_len(&self, signature: &Signature) -> Result<(), IndexError> {
        let expected = self.config.signature_len();
        if signature.len() != expected {
            return Err(IndexError::SignatureLength {
                expected,
                actual: signature.len(),
            });
        }
        Ok(())
    }
}

/// Probability that two items of Jaccard similarity `s` share at least one
/// band: `1 - (1 - s^rows)^bands`.
pub fn candidate_probability(similarity: f64, bands: usize, rows_per_band: usize) -> f64 {
    let s = similarity.clamp(0.0, 1.0);
    let band_collision = s.powi(rows_per_band as i32);
    1.0 - (1.0 - band_collision).powi(bands as i32)
}
