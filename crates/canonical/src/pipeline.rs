use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;
use crate::email::fold_email_local_part;
use crate::error::CanonicalError;
use crate::whitespace::collapse_whitespace;

/// Main entry point. Folds an identity into the form the bucketing layer
/// shingles.
///
/// Steps, in order: lowercase, NFD decomposition, combining-mark removal,
/// whitespace collapse, email local-part cleanup. Empty input yields an
/// empty string; the caller decides what an empty identity means.
pub fn normalize_identity(input: &str, cfg: &NormalizeConfig) -> Result<String, CanonicalError> {
    cfg.validate()?;

    // Lowercasing first: it can emit combining marks (e.g. U+0130 → "i\u{307}").
    let cased = if cfg.lowercase {
        input.to_lowercase()
    } else {
        input.to_string()
    };

    let decomposed: String = if cfg.strip_accents {
        cased.nfd().filter(|c| !c.is_mark()).collect()
    } else {
        cased.nfd().collect()
    };

    let collapsed = collapse_whitespace(&decomposed);

    if cfg.email_local_part && collapsed.contains('@') {
        Ok(fold_email_local_part(&collapsed))
    } else {
        Ok(collapsed)
    }
}
