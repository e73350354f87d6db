//! # tlstat-types
//!
//! **Tier 1 (Contracts)**
//!
//! Pure data structures for formula statistics and classification results.
//! No I/O or analysis logic.
//!
//! ## What belongs here
//! * Operator tallies and aggregate counters
//! * Formula-level statistics records
//! * External-analyzer classification records and the per-field error union
//!
//! ## What does NOT belong here
//! * Parsing or normalization (use tlstat-parsing)
//! * Statistics computation (use tlstat-analysis)
//! * Toolchain invocation (use tlstat-spot)

pub mod classify;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use classify::{
    AnalysisSource, AutomatonAnalysis, Classification, DeterministicAttempt, Field, ToolStatus,
};

/// Occurrences of arithmetic comparison operators in a raw formula.
///
/// The key set is a closed taxonomy; every kind is always present with a
/// default of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonCounts {
    pub eq: u32,
    pub neq: u32,
    pub lt: u32,
    pub leq: u32,
    pub gt: u32,
    pub geq: u32,
}

impl ComparisonCounts {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.eq + self.neq + self.lt + self.leq + self.gt + self.geq
    }

    /// Tally values in a fixed order, for entropy-style aggregation.
    #[must_use]
    pub fn values(&self) -> [u32; 6] {
        [self.eq, self.neq, self.lt, self.leq, self.gt, self.geq]
    }
}

/// Occurrences of boolean connectives in a parsed formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalCounts {
    #[serde(rename = "impl")]
    pub imply: u32,
    pub and: u32,
    pub or: u32,
    pub not: u32,
}

impl LogicalCounts {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.imply + self.and + self.or + self.not
    }

    #[must_use]
    pub fn values(&self) -> [u32; 4] {
        [self.imply, self.and, self.or, self.not]
    }
}

/// Occurrences of temporal operators and path quantifiers in a parsed formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TemporalCounts {
    pub a: u32,
    pub e: u32,
    pub x: u32,
    pub f: u32,
    pub g: u32,
    pub u: u32,
    pub r: u32,
}

impl TemporalCounts {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.a + self.e + self.x + self.f + self.g + self.u + self.r
    }

    #[must_use]
    pub fn values(&self) -> [u32; 7] {
        [self.a, self.e, self.x, self.f, self.g, self.u, self.r]
    }
}

/// Derived scalar aggregates over one formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Size of the deduplicated atomic-proposition set.
    pub aps: u32,
    /// Sum of all comparison-operator occurrences.
    pub cops: u32,
    /// Sum of all logical-operator occurrences.
    pub lops: u32,
    /// Sum of all temporal-operator occurrences.
    pub tops: u32,
}

/// Shannon entropies (base 2) over operator-usage distributions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EntropyTriple {
    /// Entropy over the temporal tally alone.
    pub tops: f64,
    /// Entropy over the logical tally alone.
    pub lops: f64,
    /// Entropy over the merged temporal + logical tally.
    pub lops_tops: f64,
}

/// Simple measurements over the natural-language requirement text that a
/// formula was derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReqTextStats {
    /// Character count after ensuring terminal punctuation.
    pub chars: u32,
    /// Whitespace-separated word count.
    pub words: u32,
    /// Sentence count by terminal-punctuation run detection.
    pub sentences: u32,
}

/// Complete statistics record for one formula.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormulaStats {
    /// The surface-syntax formula as given.
    pub formula_raw: String,
    /// The rewritten, parser-safe form of the formula.
    pub formula_parsable: String,
    /// Height of the parse tree (leaf atoms sit at height zero).
    pub ast_height: u32,
    /// Deduplicated textual representations of the atomic propositions.
    pub atoms: BTreeSet<String>,
    pub cops: ComparisonCounts,
    pub lops: LogicalCounts,
    pub tops: TemporalCounts,
    pub agg: Aggregates,
    pub entropy: EntropyTriple,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req_text: Option<ReqTextStats>,
    /// Automata-theoretic classification, present only when extended analysis
    /// was requested and the analyzer produced a result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<Classification>,
}

impl FormulaStats {
    /// Plain nested key-value projection with deterministic key order.
    ///
    /// Error-marker fields render as the `"Error"` wire string.
    #[must_use]
    pub fn as_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
