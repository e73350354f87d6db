//! Diagnostics as data.
//!
//! The analyzer never logs; it accumulates deduplicated warnings and
//! per-formula issue tags that the caller renders (or ignores) at its own
//! reporting boundary.

use std::collections::{BTreeMap, BTreeSet};

/// Accumulated warnings and per-formula partial-failure tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
    issues: BTreeMap<String, BTreeSet<String>>,
}

impl Diagnostics {
    /// Record a warning once; an already-seen message is dropped.
    pub(crate) fn record_warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }

    /// Attach issue tags to a formula. A call with no tags records nothing.
    pub(crate) fn record_issues(
        &mut self,
        formula: &str,
        tags: impl IntoIterator<Item = String>,
    ) {
        let mut tags = tags.into_iter().peekable();
        if tags.peek().is_none() {
            return;
        }
        self.issues
            .entry(formula.to_string())
            .or_default()
            .extend(tags);
    }

    /// Warnings in first-seen order.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// All formulas with issues, each with its sorted tag set.
    pub fn issue_entries(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.issues.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The formulas that had at least one partial failure.
    #[must_use]
    pub fn formulas_with_issues(&self) -> Vec<&str> {
        self.issues.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.issues.is_empty()
    }

    /// Drop everything accumulated so far.
    pub(crate) fn reset(&mut self) {
        self.warnings.clear();
        self.issues.clear();
    }
}
