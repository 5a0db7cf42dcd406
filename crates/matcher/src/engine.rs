use std::time::Instant;

use hashbrown::HashMap;
use index::{LshConfig, LshIndex};
use indexmap::IndexMap;
use perceptual::{minhash_signature, shingle, PerceptualConfig, Signature};
use tracing::{debug, warn};

use crate::metrics::metrics_recorder;
use crate::types::{Assignment, AssignmentOutcome, MatchConfig, MatchError};


/// Streaming near-duplicate bucketing.
///
/// Four tables are kept coherent by [`BucketManager::assign`]: the LSH
/// index, the signature table, the id → bucket map, and the bucket →
/// members map. There is no other mutating method, so the tables cannot be
/// observed half-updated. An id is written to the other three tables only
/// after the index has accepted it, so `index().len() == len()` always
/// holds. The manager is not internally synchronized; callers sharing it
/// across threads wrap it in a `Mutex`.
///
/// Assignment is path-dependent: the first indexed candidate whose estimated
/// similarity reaches the threshold wins, so a different input order can
/// yield a different partition.
#[derive(Debug, Clone)]
pub struct BucketManager {
    perceptual: PerceptualConfig,
    config: MatchConfig,
    index: LshIndex,
    signatures: HashMap<String, Signature>,
    bucket_of: HashMap<String, String>,
    members: IndexMap<String, Vec<String>>,
}

impl BucketManager {
    /// Build a manager from explicit configs.
    ///
    /// Fails when any config is invalid or when `bands * rows_per_band`
    /// differs from the signature length.
    pub fn new(
        perceptual: PerceptualConfig,
        lsh: LshConfig,
        config: MatchConfig,
    ) -> Result<Self, MatchError> {
        perceptual.validate()?;
        config.validate()?;
        if lsh.signature_len() != perceptual.num_hashes {
            return Err(MatchError::BandLayout {
                bands: lsh.bands,
                rows: lsh.rows_per_band,
                hashes: perceptual.num_hashes,
            });
        }
        let index = LshIndex::new(lsh)?;
        Ok(Self {
            perceptual,
            config,
            index,
            signatures: HashMap::new(),
            bucket_of: HashMap::new(),
            members: IndexMap::new(),
        })
    }

    /// k=3, 100 hashes, 20 bands of 5 rows, threshold 0.6.
    pub fn with_defaults() -> Result<Self, MatchError> {
        Self::new(
            PerceptualConfig::default(),
            LshConfig::default(),
            MatchConfig::default(),
        )
    }

    /// Assign `id` to a bucket and return the bucket id.
    pub fn process_and_assign(&mut self, id: &str) -> String {
        self.assign(id).bucket
    }

    /// Assign `id` to a bucket, reporting how the decision was made.
    ///
    /// Never fails: an id with no shingles (shorter than `k`) cannot match
    /// anything and opens its own bucket. Re-submitting a known id returns
    /// its bucket without touching any table.
    pub fn assign(&mut self, id: &str) -> Assignment {
        let start = Instant::now();
        let assignment = self.assign_inner(id);
        if let Some(recorder) = metrics_recorder() {
            recorder.record_assignment(start.elapsed(), assignment.outcome, assignment.candidates);
        }
        assignment
    }

    fn assign_inner(&mut self, id: &str) -> Assignment {
        if let Some(bucket) = self.bucket_of.get(id) {
            debug!(id, bucket = bucket.as_str(), "bucket_duplicate");
            return Assignment {
                bucket: bucket.clone(),
                outcome: AssignmentOutcome::Duplicate,
                similarity: None,
                candidates: 0,
            };
        }

        let signature = self.sign(id);
        let (winner, candidates) = self.first_match(&signature);
        let (bucket, outcome, similarity) = match winner {
            Some((bucket, similarity)) => (bucket, AssignmentOutcome::Joined, Some(similarity)),
            None => (id.to_string(), AssignmentOutcome::NewBucket, None),
        };

        // Every recorded id is in the index: nothing is written unless the
        // index accepted the signature.
        if let Err(err) = self.index.add(id, &signature) {
            warn!(id, error = %err, "lsh_add_failed");
            return Assignment {
                bucket,
                outcome,
                similarity,
                candidates,
            };
        }
        self.signatures.insert(id.to_string(), signature);
        self.bucket_of.insert(id.to_string(), bucket.clone());
        self.members
            .entry(bucket.clone())
            .or_default()
            .push(id.to_string());

        debug!(
            id,
            bucket = bucket.as_str(),
            outcome = outcome.as_str(),
            candidates,
            similarity = similarity.unwrap_or(0.0),
            "bucket_assigned"
        );

        Assignment {
            bucket,
            outcome,
            similarity,
            candidates,
        }
    }

    fn sign(&self, id: &str) -> Signature {
        let shingles = shingle(id, self.perceptual.k);
        minhash_signature(
            &shingles,
            self.perceptual.num_hashes,
            self.perceptual.use_parallel,
        )
    }

    /// First candidate, in index order, whose estimate reaches the threshold.
    fn first_match(&self, signature: &Signature) -> (Option<(String, f64)>, usize) {
        // Sentinels collide with each other in every band.
        if signature.is_sentinel() {
            return (None, 0);
        }
        let candidates = match self.index.query(signature) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "lsh_query_failed");
                return (None, 0);
            }
        };
        let examined = candidates.len();
        for candidate in candidates {
            let Some(stored) = self.signatures.get(candidate) else {
                continue;
            };
            let similarity = signature.jaccard_estimate(stored);
            if similarity < self.config.threshold {
                continue;
            }
            if let Some(bucket) = self.bucket_of.get(candidate) {
                return (Some((bucket.clone(), similarity)), examined);
            }
        }
        (None, examined)
    }

    /// Bucket previously assigned to `id`.
    pub fn bucket_of(&self, id: &str) -> Option<&str> {
        self.bucket_of.get(id).map(String::as_str)
    }

    /// Members of `bucket` in assignment order.
    pub fn members(&self, bucket: &str) -> Option<&[String]> {
        self.members.get(bucket).map(Vec::as_slice)
    }

    /// Buckets in creation order with their members.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.members
            .iter()
            .map(|(bucket, members)| (bucket.as_str(), members.as_slice()))
    }

    /// Stored signature of `id`.
    pub fn signature(&self, id: &str) -> Option<&Signature> {
        self.signatures.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.bucket_of.contains_key(id)
    }

    /// Number of distinct ids assigned.
    pub fn len(&self) -> usize {
        self.bucket_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bucket_of.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.members.len()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn perceptual_config(&self) -> &PerceptualConfig {
        &self.perceptual
    }

    /// Read access to the underlying index.
    pub fn index(&self) -> &LshIndex {
        &self.index
    }
}
