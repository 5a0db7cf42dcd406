//! Configuration types for identity normalization.
//!
//! [`NormalizeConfig`] controls how short identities (email addresses,
//! personal names) are folded before shingling.
//!
//! # Versioning
//!
//! Any change to normalization output (even a bug fix) must come with a
//! version bump. Bucket assignments depend on the exact normalized bytes, so
//! two identities normalized under different versions are not comparable.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.lowercase);
//! assert!(config.strip_accents);
//! assert!(config.email_local_part);
//! ```
//!
//! Names that should keep their punctuation:
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig {
//!     email_local_part: false,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the identity normalizer.
///
/// Cheap to clone and serializable so it can live inside a larger YAML or
/// JSON configuration document:
///
/// ```json
/// {
///   "version": 1,
///   "lowercase": true,
///   "strip_accents": true,
///   "email_local_part": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Version of the normalization rules. Must be >= 1.
    pub version: u32,

    /// If true, apply locale-free Unicode lowercasing.
    ///
    /// ```text
    /// "John.Doe@Example.COM" → "john.doe@example.com"
    /// ```
    pub lowercase: bool,

    /// If true, decompose to NFD and drop every combining mark.
    ///
    /// ```text
    /// "José Núñez" → "jose nunez"
    /// ```
    ///
    /// When false the text is still decomposed to NFD so that composed and
    /// decomposed inputs produce the same bytes.
    pub strip_accents: bool,

    /// If true and the input contains `@`, clean the local part (everything
    /// before the last `@`):
    ///
    /// - drop a `+tag` suffix,
    /// - remove `.`, `_` and `-`.
    ///
    /// ```text
    /// "john.doe+news@example.com" → "johndoe@example.com"
    /// "john_doe@example.com"      → "johndoe@example.com"
    /// ```
    ///
    /// The domain is never altered.
    pub email_local_part: bool,
}

impl NormalizeConfig {
    /// Create a configuration with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable lowercasing.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Enable or disable combining-mark removal.
    pub fn with_strip_accents(mut self, strip_accents: bool) -> Self {
        self.strip_accents = strip_accents;
        self
    }

    /// Enable or disable email local-part cleanup.
    pub fn with_email_local_part(mut self, email_local_part: bool) -> Self {
        self.email_local_part = email_local_part;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            lowercase: true,
            strip_accents: true,
            email_local_part: true,
        }
    }
}
