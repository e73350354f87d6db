//! Requirement-text measurements.
//!
//! A minor auxiliary measurement sharing the facade's lifecycle: formulas in
//! a corpus usually trace back to a natural-language requirement, and the
//! digest reports its size alongside the formula's structure.

use std::sync::LazyLock;

use regex::Regex;
use tlstat_types::ReqTextStats;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(\s|$)").expect("valid regex literal"));

/// Character, word, and sentence counts for a requirement text.
///
/// The text is trimmed and given terminal punctuation if it lacks it, so a
/// one-sentence requirement without a full stop still counts one sentence.
#[must_use]
pub fn requirement_text_stats(text: &str) -> ReqTextStats {
    let mut cleaned = text.trim().to_string();
    if !cleaned.is_empty() && !cleaned.ends_with(['.', '!', '?']) {
        cleaned.push('.');
    }
    ReqTextStats {
        chars: cleaned.chars().count() as u32,
        words: cleaned.split_whitespace().count() as u32,
        sentences: SENTENCE_END.find_iter(&cleaned).count() as u32,
    }
}
