//! Comparison-operator counting and parser-safe rewriting.
//!
//! Arithmetic comparisons (`x == 9`, `five < waitCPU`) are not part of the
//! formula grammar, so each one is collapsed into an identifier-safe atom
//! before parsing. Occurrences are counted first, on the raw text, because
//! the rewrite masks the operator symbols.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tlstat_types::ComparisonCounts;

/// Stand-in for `-->` while counting, so its `>` is never taken for a
/// relational operator. Contains no comparison characters.
const IMPLIES_PLACEHOLDER: &str = "__IMPLIES__";

/// Maximal `identifier comparator term` window, with optional spacing and an
/// optionally signed right-hand term. A comparison with no left-hand
/// identifier does not match and falls through as plain text.
static COMPARISON_WINDOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[\w.]+ *[<>!=]=? *-?\w+\b").expect("valid regex literal")
});

/// Bare numeral literal, integer or decimal.
static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid regex literal"));

/// Comparator spellings and their identifier-safe infix tokens. Two-character
/// spellings come first so `<=` is never rewritten as `<`.
const COMPARATOR_TOKENS: [(&str, &str); 6] = [
    ("<=", "_leq_"),
    (">=", "_geq_"),
    ("==", "_eq_"),
    ("!=", "_neq_"),
    ("<", "_lt_"),
    (">", "_gt_"),
];

/// Count comparison operators in `formula` and rewrite each comparison into
/// a parser-safe atomic proposition.
///
/// Returns the per-kind counts and the rewritten string. Numeral literals
/// anywhere in the result gain an `n` prefix because the grammar forbids
/// tokens starting with a digit. Re-running the normalizer on its own output
/// finds zero comparisons.
#[must_use]
pub fn normalize_comparisons(formula: &str) -> (ComparisonCounts, String) {
    let protected = formula.replace("-->", IMPLIES_PLACEHOLDER);
    let counts = count_comparisons(&protected);

    let rewritten = COMPARISON_WINDOW
        .replace_all(formula, |caps: &Captures| rewrite_window(&caps[0]))
        .into_owned();
    let rewritten = NUMERAL.replace_all(&rewritten, "n$0").into_owned();

    (counts, rewritten)
}

fn is_comparison_char(byte: u8) -> bool {
    matches!(byte, b'<' | b'>' | b'=')
}

/// Operator-boundary-aware scan. A lone `<` or `>` only counts when not
/// adjacent to `<`, `>`, or `=`, so `<=`, `>=`, `<>` and friends are never
/// double counted. (The regex crate has no lookaround, hence the byte scan.)
fn count_comparisons(text: &str) -> ComparisonCounts {
    let bytes = text.as_bytes();
    let mut counts = ComparisonCounts::default();
    let mut i = 0;
    while i < bytes.len() {
        let next = bytes.get(i + 1).copied();
        match bytes[i] {
            b'=' if next == Some(b'=') => {
                counts.eq += 1;
                i += 2;
            }
            b'!' if next == Some(b'=') => {
                counts.neq += 1;
                i += 2;
            }
            b'<' if next == Some(b'=') => {
                counts.leq += 1;
                i += 2;
            }
            b'>' if next == Some(b'=') => {
                counts.geq += 1;
                i += 2;
            }
            b'<' | b'>' => {
                let prev_ok = i == 0 || !is_comparison_char(bytes[i - 1]);
                let next_ok = next.is_none_or(|b| !is_comparison_char(b));
                if prev_ok && next_ok {
                    if bytes[i] == b'<' {
                        counts.lt += 1;
                    } else {
                        counts.gt += 1;
                    }
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    counts
}

/// Collapse one matched comparison window into an identifier-safe atom:
/// strip spaces, mark a minus sign with `n`, swap the comparator for its
/// infix token.
fn rewrite_window(window: &str) -> String {
    let expr = window.replace(' ', "").replace('-', "n");
    for (symbol, token) in COMPARATOR_TOKENS {
        if expr.contains(symbol) {
            return expr.replace(symbol, token);
        }
    }
    // No supported comparator in the window (e.g. a lone `=`): leave the
    // joined text in place and let the parser reject it downstream.
    expr
}
