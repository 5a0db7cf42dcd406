//! Byte k-shingling.
//!
//! Shingles are taken over UTF-8 bytes, not code points, so a multi-byte
//! character may be split across shingles. Signatures depend on this; a
//! switch to code-point shingles is a signature-breaking change.

use std::collections::BTreeSet;

/// Unordered set of k-byte shingles. Iteration order is lexicographic.
pub type ShingleSet = BTreeSet<Vec<u8>>;

/// Split `text` into its set of contiguous k-byte substrings.
///
/// The text is trimmed and lowercased first. For a trimmed length `n >= k`
/// there are `n - k + 1` windows before duplicates collapse; shorter input
/// (or `k == 0`) yields the empty set.
pub fn shingle(text: &str, k: usize) -> ShingleSet {
    let folded = text.trim().to_lowercase();
    let bytes = folded.as_bytes();
    if k == 0 || bytes.len() < k {
        return ShingleSet::new();
    }
    bytes.windows(k).map(<[u8]>::to_vec).collect()
}
