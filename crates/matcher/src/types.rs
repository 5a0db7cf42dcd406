use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum estimated Jaccard similarity for joining a bucket.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Bucket-assignment policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Configuration schema version for this match config.
    #[serde(default = "MatchConfig::default_version")]
    pub version: u32,
    /// Minimum signature agreement (inclusive) for a candidate to win.
    #[serde(default = "MatchConfig::default_threshold")]
    pub threshold: f64,
}

impl MatchConfig {
    pub(crate) fn default_version() -> u32 {
        1
    }

    pub(crate) fn default_threshold() -> f64 {
        DEFAULT_THRESHOLD
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version < 1 {
            return Err(MatchError::InvalidConfig(format!(
                "version must be >= 1 (got {})",
                self.version
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            threshold: Self::default_threshold(),
        }
    }
}

/// How an id ended up in its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentOutcome {
    /// No candidate qualified; the id names a fresh bucket.
    NewBucket,
    /// A previously seen id was similar enough; the id joined its bucket.
    Joined,
    /// The id was already known. Nothing changed.
    Duplicate,
}

impl AssignmentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOutcome::NewBucket => "new_bucket",
            AssignmentOutcome::Joined => "joined",
            AssignmentOutcome::Duplicate => "duplicate",
        }
    }
}

/// Result of a single [`crate::BucketManager::assign`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Bucket id; the id of the bucket's first member.
    pub bucket: String,
    pub outcome: AssignmentOutcome,
    /// Estimated similarity with the winning candidate, when one won.
    pub similarity: Option<f64>,
    /// Number of LSH candidates examined.
    pub candidates: usize,
}

/// Errors returned by the matcher.
///
/// Assignment itself never fails; these only come out of construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid threshold {0}; expected a value in [0.0, 1.0]")]
    InvalidThreshold(f64),
    #[error("band layout {bands}x{rows} does not cover a {hashes}-position signature")]
    BandLayout {
        bands: usize,
        rows: usize,
        hashes: usize,
    },
    #[error("perceptual error: {0}")]
    Perceptual(#[from] perceptual::PerceptualError),
    #[error("index error: {0}")]
    Index(#[from] index::IndexError),
}
