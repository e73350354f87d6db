//! The classification procedure over a located toolchain.
//!
//! Three automaton variants are built per formula (generalized acceptance,
//! single acceptance, best-effort deterministic), each measured via a fast
//! path (the translator's statistics mode) with a per-automaton fallback
//! (feeding the HOA text through the analyzer tool). Failures degrade field
//! by field; the record shape never changes.

use std::path::Path;

use tlstat_types::classify::{
    AnalysisSource, AutomatonAnalysis, Classification, DeterministicAttempt, Field,
};

use crate::invoke::{invoke, Invocation};
use crate::syntax::to_spot_syntax;
use crate::tools::ToolPaths;
use crate::ClassifyOptions;

/// Statistics template: states, transitions, completeness, determinism,
/// acceptance sets.
const STATS_FORMAT: &str = "--stats=%s %t %p %d %a";

const MANNA_FORMAT: &str = "--format=%[vw]h";
const MANNA_FALLBACK: &str = "Unclassified/Error (Format Issue)";

#[derive(Debug, Clone, Copy)]
enum Variant {
    Generalized,
    Buchi,
    Deterministic,
}

impl Variant {
    fn translator_flag(self) -> Option<&'static str> {
        match self {
            Variant::Generalized => None,
            Variant::Buchi => Some("-B"),
            Variant::Deterministic => Some("-D"),
        }
    }
}

enum VariantOutcome {
    Produced(AutomatonAnalysis),
    Failed(String),
}

/// Run the full procedure for one formula against a located toolchain.
pub(crate) fn classify(
    tools: &ToolPaths,
    formula: &str,
    options: &ClassifyOptions,
) -> Classification {
    let spot_formula = to_spot_syntax(formula);

    let syntactic_safety = formula_property(tools, &spot_formula, "--syntactic-safety", options);
    let is_stutter_invariant_formula =
        formula_property(tools, &spot_formula, "--stutter-invariant", options);
    let manna_pnueli_class = manna_pnueli_class(tools, &spot_formula, options);

    let tgba_analysis = match build_and_measure(tools, &spot_formula, Variant::Generalized, options)
    {
        VariantOutcome::Produced(analysis) => analysis,
        VariantOutcome::Failed(reason) => AutomatonAnalysis::errored(reason),
    };
    let buchi_analysis = match build_and_measure(tools, &spot_formula, Variant::Buchi, options) {
        VariantOutcome::Produced(analysis) => analysis,
        VariantOutcome::Failed(reason) => AutomatonAnalysis::errored(reason),
    };
    let deterministic_attempt =
        match build_and_measure(tools, &spot_formula, Variant::Deterministic, options) {
            VariantOutcome::Produced(analysis) => DeterministicAttempt {
                success: true,
                error: None,
                automaton_analysis: analysis,
            },
            VariantOutcome::Failed(reason) => DeterministicAttempt {
                success: false,
                error: Some(reason.clone()),
                automaton_analysis: AutomatonAnalysis::errored(reason),
            },
        };

    Classification {
        formula: formula.to_string(),
        spot_formula,
        syntactic_safety,
        is_stutter_invariant_formula,
        manna_pnueli_class,
        tgba_analysis,
        buchi_analysis,
        deterministic_attempt,
    }
}

/// Issue tags a partially failed classification contributes to diagnostics.
pub(crate) fn scan_issues(classification: &Classification) -> Vec<String> {
    let mut tags = Vec::new();
    if classification.syntactic_safety.is_error() {
        tags.push("syntactic_safety".to_string());
    }
    if classification.is_stutter_invariant_formula.is_error() {
        tags.push("stutter_invariance".to_string());
    }
    if classification.manna_pnueli_class.is_error() {
        tags.push("manna_pnueli_class".to_string());
    }
    scan_analysis("tgba_analysis", &classification.tgba_analysis, &mut tags);
    scan_analysis("buchi_analysis", &classification.buchi_analysis, &mut tags);
    let attempt = &classification.deterministic_attempt;
    if !attempt.success {
        match &attempt.error {
            Some(reason) => tags.push(format!("deterministic_attempt ({reason})")),
            None => tags.push("deterministic_attempt".to_string()),
        }
    } else {
        scan_analysis(
            "deterministic_attempt",
            &attempt.automaton_analysis,
            &mut tags,
        );
    }
    tags
}

fn scan_analysis(label: &str, analysis: &AutomatonAnalysis, tags: &mut Vec<String>) {
    if let Some(reason) = &analysis.analysis_error {
        tags.push(format!("{label} ({reason})"));
    } else if analysis.has_error() {
        tags.push(label.to_string());
    }
}

/// Ask the formula filter a yes/no question about one formula.
///
/// The filter echoes matching formulas: non-empty output means yes, a clean
/// empty no-match means no.
fn formula_property(
    tools: &ToolPaths,
    spot_formula: &str,
    flag: &str,
    options: &ClassifyOptions,
) -> Field<bool> {
    match invoke(
        &tools.ltlfilt,
        &["-f", spot_formula, flag],
        None,
        true,
        options,
    ) {
        Invocation::Success(stdout) => Field::Value(!stdout.is_empty()),
        Invocation::KnownEmptyMatch => Field::Value(false),
        Invocation::ToolError { detail, .. } => Field::Error(detail),
        Invocation::ToolMissing(tool) => Field::Error(format!("tool not found: {tool}")),
    }
}

fn manna_pnueli_class(
    tools: &ToolPaths,
    spot_formula: &str,
    options: &ClassifyOptions,
) -> Field<String> {
    match invoke(
        &tools.ltlfilt,
        &["-f", spot_formula, MANNA_FORMAT],
        None,
        false,
        options,
    ) {
        Invocation::Success(stdout) => {
            // An unexpanded format directive means this ltlfilt predates the
            // class-name placeholder.
            if stdout.is_empty() || stdout.starts_with("%[") {
                Field::Value(MANNA_FALLBACK.to_string())
            } else {
                Field::Value(stdout)
            }
        }
        Invocation::KnownEmptyMatch => Field::Value(MANNA_FALLBACK.to_string()),
        Invocation::ToolError { detail, .. } => Field::Error(detail),
        Invocation::ToolMissing(tool) => Field::Error(format!("tool not found: {tool}")),
    }
}

fn build_and_measure(
    tools: &ToolPaths,
    spot_formula: &str,
    variant: Variant,
    options: &ClassifyOptions,
) -> VariantOutcome {
    let mut build_args = vec!["-f", spot_formula];
    if let Some(flag) = variant.translator_flag() {
        build_args.push(flag);
    }

    let hoa = match invoke(&tools.ltl2tgba, &build_args, None, false, options) {
        Invocation::Success(hoa) => hoa,
        Invocation::KnownEmptyMatch => {
            return VariantOutcome::Failed("translator produced no automaton".to_string());
        }
        Invocation::ToolError { detail, .. } => return VariantOutcome::Failed(detail),
        Invocation::ToolMissing(tool) => {
            return VariantOutcome::Failed(format!("tool not found: {tool}"));
        }
    };

    let mut stats_args = build_args.clone();
    stats_args.push(STATS_FORMAT);
    let analysis = match translator_stats(&tools.ltl2tgba, &stats_args, options) {
        Ok(mut analysis) => {
            // Stutter invariance has no statistics directive; it always goes
            // through the analyzer tool.
            analysis.is_stutter_invariant =
                automaton_property(tools, &hoa, "--is-stutter-invariant", options);
            analysis
        }
        Err(_) => analyzer_fallback(tools, &hoa, options),
    };
    VariantOutcome::Produced(analysis)
}

/// Fast path: one more translator run in statistics-reporting mode.
fn translator_stats(
    ltl2tgba: &Path,
    args: &[&str],
    options: &ClassifyOptions,
) -> Result<AutomatonAnalysis, String> {
    let line = match invoke(ltl2tgba, args, None, false, options) {
        Invocation::Success(line) => line,
        Invocation::KnownEmptyMatch => return Err("empty statistics output".to_string()),
        Invocation::ToolError { detail, .. } => return Err(detail),
        Invocation::ToolMissing(tool) => return Err(format!("tool not found: {tool}")),
    };
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(format!(
            "unexpected statistics output format from translator: `{line}`"
        ));
    }
    let state_count = parts[0].parse::<u64>().map_err(|err| err.to_string())?;
    let transition_count = parts[1].parse::<u64>().map_err(|err| err.to_string())?;
    let acceptance_sets = parts[4].parse::<u64>().map_err(|err| err.to_string())?;
    Ok(AutomatonAnalysis {
        state_count: Field::Value(state_count),
        transition_count: Field::Value(transition_count),
        is_complete: Field::Value(parts[2] == "1"),
        is_deterministic: Field::Value(parts[3] == "1"),
        acceptance_sets: Field::Value(acceptance_sets),
        is_stutter_invariant: Field::Error("not yet measured".to_string()),
        analysis_source: Some(AnalysisSource::TranslatorStats),
        analysis_error: None,
    })
}

/// Slow path: measure the HOA text field by field through the analyzer tool.
fn analyzer_fallback(
    tools: &ToolPaths,
    hoa: &str,
    options: &ClassifyOptions,
) -> AutomatonAnalysis {
    if hoa.trim().is_empty() {
        return AutomatonAnalysis::errored("empty or malformed automaton text");
    }
    AutomatonAnalysis {
        state_count: automaton_stat(tools, hoa, "--stats=%s", options),
        transition_count: automaton_stat(tools, hoa, "--stats=%t", options),
        is_complete: automaton_property(tools, hoa, "--is-complete", options),
        is_deterministic: automaton_property(tools, hoa, "--is-deterministic", options),
        acceptance_sets: automaton_stat(tools, hoa, "--stats=%a", options),
        is_stutter_invariant: automaton_property(tools, hoa, "--is-stutter-invariant", options),
        analysis_source: Some(AnalysisSource::AnalyzerFallback),
        analysis_error: None,
    }
}

/// Yes/no automaton question: the analyzer echoes matching automata.
fn automaton_property(
    tools: &ToolPaths,
    hoa: &str,
    flag: &str,
    options: &ClassifyOptions,
) -> Field<bool> {
    match invoke(&tools.autfilt, &[flag], Some(hoa), true, options) {
        Invocation::Success(stdout) => Field::Value(!stdout.is_empty()),
        Invocation::KnownEmptyMatch => Field::Value(false),
        Invocation::ToolError { detail, .. } => Field::Error(detail),
        Invocation::ToolMissing(tool) => Field::Error(format!("tool not found: {tool}")),
    }
}

fn automaton_stat(
    tools: &ToolPaths,
    hoa: &str,
    stat: &str,
    options: &ClassifyOptions,
) -> Field<u64> {
    match invoke(&tools.autfilt, &[stat], Some(hoa), true, options) {
        Invocation::Success(stdout) => match stdout.parse::<u64>() {
            Ok(value) => Field::Value(value),
            Err(err) => Field::Error(format!("unparsable statistic `{stdout}`: {err}")),
        },
        Invocation::KnownEmptyMatch => Field::Error("empty statistic output".to_string()),
        Invocation::ToolError { detail, .. } => Field::Error(detail),
        Invocation::ToolMissing(tool) => Field::Error(format!("tool not found: {tool}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_analysis() -> AutomatonAnalysis {
        AutomatonAnalysis {
            state_count: Field::Value(2),
            transition_count: Field::Value(4),
            is_complete: Field::Value(true),
            is_deterministic: Field::Value(false),
            acceptance_sets: Field::Value(1),
            is_stutter_invariant: Field::Value(true),
            analysis_source: Some(AnalysisSource::TranslatorStats),
            analysis_error: None,
        }
    }

    fn clean_classification() -> Classification {
        Classification {
            formula: "G p".to_string(),
            spot_formula: "G p".to_string(),
            syntactic_safety: Field::Value(true),
            is_stutter_invariant_formula: Field::Value(true),
            manna_pnueli_class: Field::Value("safety".to_string()),
            tgba_analysis: value_analysis(),
            buchi_analysis: value_analysis(),
            deterministic_attempt: DeterministicAttempt {
                success: true,
                error: None,
                automaton_analysis: value_analysis(),
            },
        }
    }

    #[test]
    fn clean_classification_yields_no_issue_tags() {
        assert!(scan_issues(&clean_classification()).is_empty());
    }

    #[test]
    fn failed_variant_yields_one_tag_naming_it() {
        let mut classification = clean_classification();
        classification.buchi_analysis = AutomatonAnalysis::errored("exit status 2");
        let tags = scan_issues(&classification);
        assert_eq!(tags, ["buchi_analysis (exit status 2)"]);
    }

    #[test]
    fn failed_deterministic_attempt_carries_its_reason() {
        let mut classification = clean_classification();
        classification.deterministic_attempt = DeterministicAttempt {
            success: false,
            error: Some("unsupported".to_string()),
            automaton_analysis: AutomatonAnalysis::errored("unsupported"),
        };
        let tags = scan_issues(&classification);
        assert_eq!(tags, ["deterministic_attempt (unsupported)"]);
    }

    #[test]
    fn per_field_failures_tag_without_reason() {
        let mut classification = clean_classification();
        classification.tgba_analysis.acceptance_sets = Field::Error("boom".to_string());
        classification.syntactic_safety = Field::Error("boom".to_string());
        let tags = scan_issues(&classification);
        assert_eq!(tags, ["syntactic_safety", "tgba_analysis"]);
    }
}
