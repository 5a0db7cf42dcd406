//! YAML configuration file support.
//!
//! Every stage (normalization, signatures, LSH, bucket matching,
//! proof-of-work) can be configured from a single YAML document. Missing
//! sections and fields fall back to the defaults of the owning crate.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "crm-dedup"
//!
//! canonical:
//!   version: 1
//!   lowercase: true
//!   strip_accents: true
//!   email_local_part: true
//!
//! perceptual:
//!   version: 1
//!   k: 3
//!   num_hashes: 100
//!   use_parallel: false
//!
//! index:
//!   bands: 20
//!   rows_per_band: 5
//!
//! matcher:
//!   version: 1
//!   threshold: 0.6
//!
//! pow:
//!   difficulty: 4
//!   max_nonce: 10000000
//! ```

use std::fs;
use std::path::Path;

use canonical::NormalizeConfig;
use index::LshConfig;
use matcher::{BucketManager, MatchConfig, MatchError};
use perceptual::PerceptualConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InfrakitConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub perceptual: PerceptualYamlConfig,

    #[serde(default)]
    pub index: IndexYamlConfig,

    #[serde(default)]
    pub matcher: MatchYamlConfig,

    #[serde(default)]
    pub pow: PowYamlConfig,
}

impl InfrakitConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: InfrakitConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.normalize_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("canonical: {e}")))?;
        self.perceptual_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("perceptual: {e}")))?;
        self.lsh_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("index: {e}")))?;
        self.match_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("matcher: {e}")))?;
        self.pow.validate()?;

        let bands = self.lsh_config();
        if bands.signature_len() != self.perceptual.num_hashes {
            return Err(ConfigLoadError::Validation(format!(
                "index.bands * index.rows_per_band ({}) must equal perceptual.num_hashes ({})",
                bands.signature_len(),
                self.perceptual.num_hashes
            )));
        }
        Ok(())
    }

    pub fn normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            version: self.canonical.version,
            lowercase: self.canonical.lowercase,
            strip_accents: self.canonical.strip_accents,
            email_local_part: self.canonical.email_local_part,
        }
    }

    pub fn perceptual_config(&self) -> PerceptualConfig {
        PerceptualConfig {
            version: self.perceptual.version,
            k: self.perceptual.k,
            num_hashes: self.perceptual.num_hashes,
            use_parallel: self.perceptual.use_parallel,
        }
    }

    pub fn lsh_config(&self) -> LshConfig {
        LshConfig::new(self.index.bands, self.index.rows_per_band)
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            version: self.matcher.version,
            threshold: self.matcher.threshold,
        }
    }

    /// Empty bucket manager wired with this configuration.
    pub fn build_manager(&self) -> Result<BucketManager, MatchError> {
        BucketManager::new(
            self.perceptual_config(),
            self.lsh_config(),
            self.match_config(),
        )
    }
}

impl Default for InfrakitConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalYamlConfig::default(),
            perceptual: PerceptualYamlConfig::default(),
            index: IndexYamlConfig::default(),
            matcher: MatchYamlConfig::default(),
            pow: PowYamlConfig::default(),
        }
    }
}

/// Identity normalization YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "true_value")]
    pub strip_accents: bool,

    #[serde(default = "true_value")]
    pub email_local_part: bool,
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            lowercase: true,
            strip_accents: true,
            email_local_part: true,
        }
    }
}

/// Signature YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptualYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default = "default_num_hashes")]
    pub num_hashes: usize,

    #[serde(default)]
    pub use_parallel: bool,
}

impl Default for PerceptualYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: default_k(),
            num_hashes: default_num_hashes(),
            use_parallel: false,
        }
    }
}

/// LSH index YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexYamlConfig {
    #[serde(default = "default_bands")]
    pub bands: usize,

    #[serde(default = "default_rows_per_band")]
    pub rows_per_band: usize,
}

impl Default for IndexYamlConfig {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            rows_per_band: default_rows_per_band(),
        }
    }
}

/// Bucket matching YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            threshold: default_threshold(),
        }
    }
}

/// Proof-of-work YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowYamlConfig {
    #[serde(default = "default_difficulty")]
    pub difficulty: usize,

    #[serde(default = "default_max_nonce")]
    pub max_nonce: u64,
}

impl PowYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.difficulty > crate::pow::MAX_DIFFICULTY {
            return Err(ConfigLoadError::Validation(format!(
                "pow.difficulty must be <= {} (got {})",
                crate::pow::MAX_DIFFICULTY,
                self.difficulty
            )));
        }
        Ok(())
    }
}

impl Default for PowYamlConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            max_nonce: default_max_nonce(),
        }
    }
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_k() -> usize {
    perceptual::DEFAULT_K
}
fn default_num_hashes() -> usize {
    perceptual::DEFAULT_NUM_HASHES
}
fn default_bands() -> usize {
    index::DEFAULT_BANDS
}
fn default_rows_per_band() -> usize {
    index::DEFAULT_ROWS_PER_BAND
}
fn default_threshold() -> f64 {
    matcher::DEFAULT_THRESHOLD
}
fn default_difficulty() -> usize {
    4
}
fn default_max_nonce() -> u64 {
    10_000_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
canonical:
  version: 1
  email_local_part: false
matcher:
  threshold: 0.75
"#;

        let config = InfrakitConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert!(!config.canonical.email_local_part);
        assert!(config.canonical.lowercase);
        assert_eq!(config.match_config().threshold, 0.75);
        assert_eq!(config.perceptual_config().num_hashes, 100);
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
perceptual:
  num_hashes: 50
index:
  bands: 10
  rows_per_band: 5
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = InfrakitConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.lsh_config().signature_len(), 50);
        assert!(config.build_manager().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = InfrakitConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert_eq!(config.perceptual_config(), PerceptualConfig::default());
        assert_eq!(config.lsh_config(), LshConfig::default());
        assert_eq!(config.match_config(), MatchConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unsupported_version() {
        let result = InfrakitConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn test_perceptual_validation() {
        let yaml = r#"
version: "1.0"
perceptual:
  k: 0
"#;

        let result = InfrakitConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("k must be >= 1"));
    }

    #[test]
    fn test_band_layout_validation() {
        let yaml = r#"
version: "1.0"
index:
  bands: 25
  rows_per_band: 5
"#;

        let err = InfrakitConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("perceptual.num_hashes"));
    }

    #[test]
    fn test_threshold_validation() {
        let yaml = r#"
version: "1.0"
matcher:
  threshold: 1.5
"#;

        let err = InfrakitConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("matcher"));
    }

    #[test]
    fn test_malformed_yaml() {
        let result = InfrakitConfig::from_yaml("version: [unterminated");
        assert!(matches!(result, Err(ConfigLoadError::YamlParse(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = InfrakitConfig::default();
        config.name = Some("roundtrip".to_string());
        config.matcher.threshold = 0.8;

        let yaml = config.to_yaml().unwrap();
        let parsed = InfrakitConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("roundtrip"));
        assert_eq!(parsed.matcher.threshold, 0.8);
        assert_eq!(parsed.pow.difficulty, 4);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = InfrakitConfig::default();
        config.name = Some("json".to_string());
        config.matcher.threshold = 0.75;
        config.pow.difficulty = 2;

        let json = serde_json::to_string(&config).unwrap();
        let parsed: InfrakitConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, config.version);
        assert_eq!(parsed.name.as_deref(), Some("json"));
        assert_eq!(parsed.matcher.threshold, 0.75);
        assert_eq!(parsed.pow.difficulty, 2);
        assert_eq!(parsed.lsh_config(), config.lsh_config());
        assert_eq!(parsed.perceptual_config(), config.perceptual_config());
    }

    #[test]
    fn test_json_missing_sections_use_defaults() {
        let parsed: InfrakitConfig = serde_json::from_str(r#"{"version":"1.0"}"#).unwrap();
        let defaults = InfrakitConfig::default();
        assert!(parsed.name.is_none());
        assert_eq!(parsed.match_config(), defaults.match_config());
        assert_eq!(parsed.lsh_config(), defaults.lsh_config());
        assert_eq!(parsed.pow.max_nonce, 10_000_000);
        assert!(parsed.build_manager().is_ok());
    }
}
