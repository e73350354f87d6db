//! Surface-syntax to toolchain-syntax rewriting.
//!
//! The corpus writes formulas with word connectives (`and`, `or`, `not`) and
//! a long implication arrow; the Spot CLI expects `&`, `|`, `!`, and `->`.
//! The rewrite is purely textual and keeps identifiers untouched: `android`
//! contains `and` but has no word boundary around it, so it survives.

use std::sync::LazyLock;

use regex::Regex;

static LONG_ARROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-->").expect("valid regex literal"));
static WORD_NOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnot\b").expect("valid regex literal"));
static WORD_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\band\b").expect("valid regex literal"));
static WORD_OR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bor\b").expect("valid regex literal"));
static NEGATION_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\s+").expect("valid regex literal"));
static BINARY_PAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(&|\||->)\s*").expect("valid regex literal"));
static WS_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex literal"));

/// Rewrite a surface-syntax formula into the syntax the Spot CLI parses.
///
/// Word connectives become symbols, negation hugs its operand, binary
/// connectives get exactly one space of padding, and whitespace runs
/// collapse.
#[must_use]
pub fn to_spot_syntax(formula: &str) -> String {
    let text = LONG_ARROW.replace_all(formula, "->");
    let text = WORD_NOT.replace_all(&text, "!");
    let text = WORD_AND.replace_all(&text, "&");
    let text = WORD_OR.replace_all(&text, "|");
    let text = NEGATION_GAP.replace_all(&text, "!");
    let text = BINARY_PAD.replace_all(&text, " ${1} ");
    let text = WS_RUN.replace_all(&text, " ");
    text.trim().to_string()
}
