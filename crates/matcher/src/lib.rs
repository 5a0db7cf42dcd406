//! # Streaming near-duplicate bucketing
//!
//! [`BucketManager`] assigns short identities (emails, personal names) to
//! clusters of near-duplicates as they arrive. Each id is shingled and
//! MinHashed by the `perceptual` crate, looked up in the banded LSH index of
//! the `index` crate, and verified against the stored signatures of its
//! candidates.
//!
//! ## Assignment rule
//!
//! 1. A known id returns its existing bucket; nothing changes.
//! 2. Candidates are examined in index order (band, then insertion). The
//!    first whose estimated Jaccard similarity is at least
//!    [`MatchConfig::threshold`] wins, and the id joins that candidate's
//!    bucket.
//! 3. Otherwise the id opens a new bucket named after itself.
//!
//! First match, not best match: the resulting partition depends on the
//! order ids were submitted.
//!
//! ```
//! use matcher::BucketManager;
//!
//! let mut manager = BucketManager::with_defaults().unwrap();
//! assert_eq!(manager.process_and_assign("test@gmail.com"), "test@gmail.com");
//! assert_eq!(manager.process_and_assign("tset@gmail.com"), "test@gmail.com");
//! assert_eq!(manager.process_and_assign("janesmith@work.net"), "janesmith@work.net");
//! ```
//!
//! ## Observability
//!
//! Install a [`BucketMetrics`] implementation via [`set_bucket_metrics`] to
//! record per-assignment latency, outcome and candidate counts. Decisions are
//! also emitted as `tracing` events (`bucket_assigned`, `bucket_duplicate`).

pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::engine::BucketManager;
pub use crate::metrics::{set_bucket_metrics, BucketMetrics};
pub use crate::types::{
    Assignment, AssignmentOutcome, MatchConfig, MatchError, DEFAULT_THRESHOLD,
};
