//! # tlstat-spot
//!
//! **Tier 3 (External analysis)**
//!
//! Adapter around the Spot CLI toolchain (`ltl2tgba`, `ltlfilt`, `autfilt`)
//! that classifies formulas automata-theoretically: syntactic safety, stutter
//! invariance, Manna-Pnueli class, and per-variant automaton measurements.
//!
//! ## What belongs here
//! * Tool discovery and availability reporting
//! * Subprocess invocation and outcome classification
//! * Surface-to-toolchain syntax rewriting
//! * The classification procedure and its diagnostics
//!
//! ## What does NOT belong here
//! * Structural statistics (use tlstat-analysis)
//! * Record shapes (use tlstat-types)
//!
//! The analyzer degrades rather than fails: absent tools yield a warning and
//! no classification, and a partially failed classification keeps its shape
//! with per-field error markers plus an issue tag in [`Diagnostics`].

mod diagnostics;
mod invoke;
mod protocol;
mod syntax;
mod tools;

use std::collections::BTreeMap;
use std::ffi::OsString;

use tlstat_types::{Classification, ToolStatus};

pub use diagnostics::Diagnostics;
pub use invoke::Invocation;
pub use syntax::to_spot_syntax;
pub use tools::{tool_status, REQUIRED_TOOLS};

use tools::ToolPaths;

/// Per-call knobs for classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyOptions {
    /// Echo every CLI invocation to stderr before running it.
    pub verbose: bool,
}

/// Anything that can attach an automata-theoretic classification to a
/// formula.
///
/// The production implementation is [`SpotAnalyzer`]; tests substitute
/// scripted ones.
pub trait FormulaClassifier {
    /// Classify one formula, or return nothing when classification is
    /// impossible (empty formula, absent toolchain).
    fn classify(&mut self, formula: &str, options: &ClassifyOptions) -> Option<Classification>;
}

/// Classifier backed by the Spot CLI tools.
///
/// Tool availability is checked once on first use and memoized until
/// [`SpotAnalyzer::recheck_tools`]; diagnostics accumulate across calls.
#[derive(Debug, Default)]
pub struct SpotAnalyzer {
    search_path: Option<OsString>,
    availability: Option<bool>,
    tools: Option<ToolPaths>,
    diagnostics: Diagnostics,
}

impl SpotAnalyzer {
    /// Analyzer that locates tools on the process `PATH`.
    #[must_use]
    pub fn new() -> Self {
        SpotAnalyzer::default()
    }

    /// Analyzer that locates tools on an explicit `PATH`-style search string
    /// instead of the process environment.
    #[must_use]
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        SpotAnalyzer {
            search_path: Some(search_path.into()),
            ..SpotAnalyzer::default()
        }
    }

    /// Diagnostics accumulated since construction or the last reset.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn reset_diagnostics(&mut self) {
        self.diagnostics.reset();
    }

    /// Forget the memoized availability result; the next classification
    /// re-scans the search path.
    pub fn recheck_tools(&mut self) {
        self.availability = None;
        self.tools = None;
    }

    /// Availability and version report for the required tools.
    #[must_use]
    pub fn tool_status(&self) -> BTreeMap<String, ToolStatus> {
        tools::tool_status(self.search_path.as_deref())
    }

    fn ensure_tools(&mut self) -> bool {
        if let Some(available) = self.availability {
            return available;
        }
        match tools::locate(self.search_path.as_deref()) {
            Ok(paths) => {
                self.tools = Some(paths);
                self.availability = Some(true);
                true
            }
            Err(missing) => {
                self.diagnostics.record_warning(format!(
                    "Spot CLI tools not found (missing: {}); classification skipped.",
                    missing.join(", ")
                ));
                self.availability = Some(false);
                false
            }
        }
    }
}

impl FormulaClassifier for SpotAnalyzer {
    fn classify(&mut self, formula: &str, options: &ClassifyOptions) -> Option<Classification> {
        if formula.trim().is_empty() {
            return None;
        }
        if !self.ensure_tools() {
            return None;
        }
        let tools = self.tools.as_ref()?;
        let classification = protocol::classify(tools, formula, options);
        let tags = protocol::scan_issues(&classification);
        self.diagnostics.record_issues(formula, tags);
        Some(classification)
    }
}
