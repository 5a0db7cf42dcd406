//! Workspace umbrella crate for infrakit.
//!
//! Two cores live in the member crates and are re-exported here:
//!
//! - **Near-duplicate bucketing** of short identities: `canonical`
//!   normalizes, `perceptual` shingles and MinHashes, `index` holds the
//!   banded LSH tables, `matcher` runs the streaming first-match
//!   [`BucketManager`].
//! - **Key diversification**: `keydiv` provides streaming AES-CMAC and
//!   AN10922 derivation.
//!
//! This crate adds the glue: [`assign_raw`] normalizes and buckets in one
//! call, [`InfrakitConfig`] loads every stage from YAML, and [`pow`] is a
//! small SHA-256 proof-of-work harness.
//!
//! ```
//! use infrakit::{assign_raw, BucketManager, NormalizeConfig};
//!
//! let cfg = NormalizeConfig::default();
//! let mut manager = BucketManager::with_defaults().unwrap();
//!
//! let first = assign_raw(&mut manager, "Test@Gmail.com", &cfg).unwrap();
//! let typo = assign_raw(&mut manager, "tset@gmail.com", &cfg).unwrap();
//! assert_eq!(first.bucket, "test@gmail.com");
//! assert_eq!(typo.bucket, "test@gmail.com");
//! ```

pub mod config;
pub mod pow;

pub use canonical::{
    CanonicalError, NormalizeConfig, collapse_whitespace, fold_email_local_part,
    normalize_identity,
};
pub use index::{
    BandHash, DEFAULT_BANDS, DEFAULT_ROWS_PER_BAND, IndexError, LshConfig, LshIndex, band_hash,
    candidate_probability,
};
pub use keydiv::{BLOCK_SIZE, Cmac, KeyDivError, diversify, generate_master_key};
pub use matcher::{
    Assignment, AssignmentOutcome, BucketManager, BucketMetrics, DEFAULT_THRESHOLD, MatchConfig,
    MatchError, set_bucket_metrics,
};
pub use perceptual::{
    DEFAULT_K, DEFAULT_NUM_HASHES, PerceptualConfig, PerceptualError, Signature, shingle,
    signature_of,
};

pub use crate::config::{ConfigLoadError, InfrakitConfig};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{Level, debug, warn};

/// Errors surfaced by the umbrella helpers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("normalization failure: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("signature failure: {0}")]
    Perceptual(#[from] PerceptualError),
    #[error("index failure: {0}")]
    Index(#[from] IndexError),
    #[error("matcher failure: {0}")]
    Match(#[from] MatchError),
    #[error("key diversification failure: {0}")]
    KeyDiv(#[from] KeyDivError),
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_normalize(&self, latency: Duration, result: Result<(), CanonicalError>);
    fn record_assign(&self, latency: Duration, outcome: AssignmentOutcome);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_normalize(self, result: Result<(), CanonicalError>) {
        self.recorder.record_normalize(self.start.elapsed(), result);
    }

    fn record_assign(self, outcome: AssignmentOutcome) {
        self.recorder.record_assign(self.start.elapsed(), outcome);
    }
}

/// Normalize `raw` with metrics reporting.
pub fn normalize(raw: &str, cfg: &NormalizeConfig) -> Result<String, PipelineError> {
    let span = MetricsSpan::start();
    match normalize_identity(raw, cfg) {
        Ok(normalized) => {
            if let Some(span) = span {
                span.record_normalize(Ok(()));
            }
            Ok(normalized)
        }
        Err(err) => {
            warn!(error = %err, "normalize_failure");
            if let Some(span) = span {
                span.record_normalize(Err(err.clone()));
            }
            Err(PipelineError::Canonical(err))
        }
    }
}

/// Normalize `raw` and assign the result to a bucket.
///
/// Normalization is the only fallible step; assignment itself always
/// succeeds.
pub fn assign_raw(
    manager: &mut BucketManager,
    raw: &str,
    cfg: &NormalizeConfig,
) -> Result<Assignment, PipelineError> {
    let span = tracing::span!(Level::DEBUG, "infrakit.assign", raw_len = raw.len());
    let _guard = span.enter();

    let normalized = normalize(raw, cfg)?;
    let metrics = MetricsSpan::start();
    let assignment = manager.assign(&normalized);
    if let Some(metrics) = metrics {
        metrics.record_assign(assignment.outcome);
    }
    debug!(
        bucket = %assignment.bucket,
        outcome = assignment.outcome.as_str(),
        "assign_success"
    );
    Ok(assignment)
}

/// Assign a whole stream, returning `(raw, bucket)` pairs in input order.
pub fn assign_all<I, S>(
    manager: &mut BucketManager,
    raws: I,
    cfg: &NormalizeConfig,
) -> Result<Vec<(String, String)>, PipelineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raws.into_iter()
        .map(|raw| {
            let raw = raw.as_ref();
            assign_raw(manager, raw, cfg).map(|a| (raw.to_string(), a.bucket))
        })
        .collect()
}

/// AN10922 diversification over hex-encoded master key and data.
pub fn diversify_hex(master_hex: &str, data_hex: &str) -> Result<String, PipelineError> {
    let master = hex::decode(master_hex.trim())?;
    let data = hex::decode(data_hex.trim())?;
    Ok(hex::encode(diversify(&master, &data)?))
}
