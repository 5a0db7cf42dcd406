//! Identity normalization for near-duplicate bucketing.
//!
//! Short identities (email addresses, personal names) are folded into a
//! deterministic byte form before they are shingled. Two spellings a human
//! would call "the same person" should normalize to the same or very similar
//! strings.
//!
//! ## What we do
//!
//! - Locale-free Unicode lowercasing
//! - NFD decomposition and combining-mark removal (`é` → `e`)
//! - Whitespace collapse (runs become one ASCII space, edges trimmed)
//! - Email local-part cleanup: `+tag` suffixes, `.`, `_` and `-` are dropped
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same input and config, same
//! output on any machine.
//!
//! ```rust
//! use canonical::{normalize_identity, NormalizeConfig};
//!
//! let cfg = NormalizeConfig::default();
//! let a = normalize_identity("John.Doe+promo@Example.com", &cfg).unwrap();
//! let b = normalize_identity("john_doe@example.com", &cfg).unwrap();
//! assert_eq!(a, "johndoe@example.com");
//! assert_eq!(a, b);
//! ```

mod config;
mod email;
mod error;
mod pipeline;
mod whitespace;

pub use crate::config::NormalizeConfig;
pub use crate::email::fold_email_local_part;
pub use crate::error::CanonicalError;
pub use crate::pipeline::normalize_identity;
pub use crate::whitespace::collapse_whitespace;
