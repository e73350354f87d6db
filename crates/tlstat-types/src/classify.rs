//! Classification records produced by the external-analyzer protocol.
//!
//! Every sub-measurement can fail independently, so scalar leaves are carried
//! as [`Field`] values: a tagged union that keeps the failure reason in
//! memory while serializing to the toolchain's established `"Error"` wire
//! marker. A caller always receives a fully-shaped record; no key is ever
//! missing.

use std::path::PathBuf;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire marker emitted for failed per-field measurements.
pub const ERROR_MARKER: &str = "Error";

/// One scalar measurement that may have failed while its siblings succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Value(T),
    Error(String),
}

impl<T> Field<T> {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Field::Error(_))
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error_text(&self) -> Option<&str> {
        match self {
            Field::Value(_) => None,
            Field::Error(reason) => Some(reason),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Value(value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            Field::Error(_) => serializer.serialize_str(ERROR_MARKER),
        }
    }
}

impl<'de, T: for<'a> Deserialize<'a>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_str() == Some(ERROR_MARKER) {
            return Ok(Field::Error(String::new()));
        }
        T::deserialize(value)
            .map(Field::Value)
            .map_err(D::Error::custom)
    }
}

/// Which path supplied the base fields of an [`AutomatonAnalysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisSource {
    /// Fast path: the translator's built-in statistics-reporting mode.
    #[serde(rename = "ltl2tgba_stats")]
    TranslatorStats,
    /// Slow path: the produced automaton fed through the automaton analyzer.
    #[serde(rename = "autfilt_fallback")]
    AnalyzerFallback,
}

/// Structural measurements of one automaton variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonAnalysis {
    pub state_count: Field<u64>,
    pub transition_count: Field<u64>,
    pub is_complete: Field<bool>,
    pub is_deterministic: Field<bool>,
    pub acceptance_sets: Field<u64>,
    pub is_stutter_invariant: Field<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_source: Option<AnalysisSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
}

impl AutomatonAnalysis {
    /// Analysis where every field failed for the same reason, e.g. because
    /// the automaton could not be produced at all.
    #[must_use]
    pub fn errored(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        AutomatonAnalysis {
            state_count: Field::Error(reason.clone()),
            transition_count: Field::Error(reason.clone()),
            is_complete: Field::Error(reason.clone()),
            is_deterministic: Field::Error(reason.clone()),
            acceptance_sets: Field::Error(reason.clone()),
            is_stutter_invariant: Field::Error(reason.clone()),
            analysis_source: None,
            analysis_error: Some(reason),
        }
    }

    /// True when any field holds an error marker or a whole-analysis error
    /// was recorded.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.analysis_error.is_some()
            || self.state_count.is_error()
            || self.transition_count.is_error()
            || self.is_complete.is_error()
            || self.is_deterministic.is_error()
            || self.acceptance_sets.is_error()
            || self.is_stutter_invariant.is_error()
    }
}

/// Outcome of asking the translator for a best-effort deterministic automaton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterministicAttempt {
    /// True iff the automaton was produced at all, independent of whether it
    /// is actually deterministic.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub automaton_analysis: AutomatonAnalysis,
}

/// Full automata-theoretic classification of one formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The formula as handed to the analyzer.
    pub formula: String,
    /// The toolchain-normalized formula actually submitted.
    pub spot_formula: String,
    pub syntactic_safety: Field<bool>,
    pub is_stutter_invariant_formula: Field<bool>,
    pub manna_pnueli_class: Field<String>,
    /// Generalized-acceptance (TGBA) automaton analysis.
    pub tgba_analysis: AutomatonAnalysis,
    /// Single-acceptance Buchi automaton analysis.
    pub buchi_analysis: AutomatonAnalysis,
    pub deterministic_attempt: DeterministicAttempt,
}

impl Classification {
    /// Plain nested key-value projection with deterministic key order.
    ///
    /// Error-marker fields render as the `"Error"` wire string.
    #[must_use]
    pub fn as_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Availability report for one external tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStatus {
    pub path: Option<PathBuf>,
    pub version: Option<String>,
}
