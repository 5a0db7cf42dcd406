// Metrics hooks for the `matcher` crate.
//
// Callers install a global `BucketMetrics` implementation via
// [`set_bucket_metrics`]; every `BucketManager::assign` call then reports its
// latency, outcome and candidate count.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::AssignmentOutcome;

/// Metrics observer for bucket assignment.
pub trait BucketMetrics: Send + Sync {
    /// Record one assignment.
    ///
    /// `latency` covers shingling, signing, the LSH query and candidate
    /// verification. `candidates` is the number of LSH candidates examined.
    fn record_assignment(&self, latency: Duration, outcome: AssignmentOutcome, candidates: usize);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn BucketMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn BucketMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn BucketMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global bucket metrics recorder.
pub fn set_bucket_metrics(recorder: Option<Arc<dyn BucketMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
