//! Name similarity scoring for duplicate detection.
//!
//! Similarity is normalized Levenshtein distance over raw Unicode code
//! points: `1 - d / max(len(a), len(b))`, yielding a score in `[0, 1]`.
//! No case folding or Unicode normalization is applied; callers that want
//! those apply them before scoring. The duplicate threshold in
//! [`crate::DetectorConfig`] was tuned against this exact `max(len)`
//! denominator, so it must not be swapped for the `len(a) + len(b)` variant.

use rapidfuzz::distance::levenshtein;

/// Normalized edit-distance similarity between two labels, in `[0, 1]`.
///
/// `1.0` means identical; `0.0` means no character survives the edit. Two
/// empty strings are identical by definition and score `1.0`. Symmetric in
/// its arguments.
///
/// # Examples
///
/// ```rust
/// use placemark::name_similarity;
///
/// assert_eq!(name_similarity("Blue Bottle Coffee", "Blue Bottle Coffee"), 1.0);
/// assert!(name_similarity("Blue Bottle Coffee", "Blue Botle Coffee") > 0.9);
/// ```
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let d = levenshtein::distance(a.chars(), b.chars());
    1.0 - d as f64 / max_len as f64
}
