//! End-to-end classification against a scripted stand-in toolchain.
//!
//! Shell scripts in a temporary directory impersonate `ltl2tgba`, `ltlfilt`,
//! and `autfilt`, so the full protocol (discovery, invocation, fast path,
//! fallback, degradation) runs without Spot installed.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tempfile::TempDir;
use tlstat_spot::{ClassifyOptions, FormulaClassifier, SpotAnalyzer};
use tlstat_types::{AnalysisSource, Field};

const LTLFILT: &str = r#"#!/bin/sh
for a in "$@"; do
  case "$a" in
    --format=*) echo "safety"; exit 0 ;;
  esac
done
echo "match"
"#;

const AUTFILT: &str = r#"#!/bin/sh
cat > /dev/null
for a in "$@"; do
  case "$a" in
    --stats=%s) echo 2; exit 0 ;;
    --stats=%t) echo 4; exit 0 ;;
    --stats=%a) echo 1; exit 0 ;;
    --is-stutter-invariant) echo "HOA: v1 fake"; exit 0 ;;
    --is-complete) echo "HOA: v1 fake"; exit 0 ;;
    --is-deterministic) exit 1 ;;
  esac
done
exit 1
"#;

// Statistics mode answers "states transitions complete deterministic
// acceptance-sets"; the deterministic variant fails outright.
const LTL2TGBA: &str = r#"#!/bin/sh
for a in "$@"; do
  if [ "$a" = "-D" ]; then
    echo "deterministic construction unsupported" >&2
    exit 2
  fi
done
for a in "$@"; do
  case "$a" in
    --stats=*) echo "2 4 1 0 1"; exit 0 ;;
  esac
done
echo "HOA: v1 fake"
"#;

// Statistics mode emits a short line, forcing the analyzer fallback.
const LTL2TGBA_BAD_STATS: &str = r#"#!/bin/sh
for a in "$@"; do
  case "$a" in
    --stats=*) echo "2 4 1"; exit 0 ;;
  esac
done
echo "HOA: v1 fake"
"#;

fn install_tool(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn toolchain(ltl2tgba: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    install_tool(dir.path(), "ltl2tgba", ltl2tgba);
    install_tool(dir.path(), "ltlfilt", LTLFILT);
    install_tool(dir.path(), "autfilt", AUTFILT);
    dir
}

fn analyzer_for(dir: &TempDir) -> SpotAnalyzer {
    SpotAnalyzer::with_search_path(dir.path().to_path_buf())
}

#[test]
fn fast_path_populates_every_field() {
    let dir = toolchain(LTL2TGBA);
    let mut analyzer = analyzer_for(&dir);
    let classification = analyzer
        .classify("G (req --> F ack)", &ClassifyOptions::default())
        .unwrap();

    assert_eq!(classification.formula, "G (req --> F ack)");
    assert_eq!(classification.spot_formula, "G (req -> F ack)");
    assert_eq!(classification.syntactic_safety, Field::Value(true));
    assert_eq!(
        classification.is_stutter_invariant_formula,
        Field::Value(true)
    );
    assert_eq!(
        classification.manna_pnueli_class,
        Field::Value("safety".to_string())
    );

    let tgba = &classification.tgba_analysis;
    assert_eq!(tgba.state_count, Field::Value(2));
    assert_eq!(tgba.transition_count, Field::Value(4));
    assert_eq!(tgba.is_complete, Field::Value(true));
    assert_eq!(tgba.is_deterministic, Field::Value(false));
    assert_eq!(tgba.acceptance_sets, Field::Value(1));
    assert_eq!(tgba.is_stutter_invariant, Field::Value(true));
    assert_eq!(tgba.analysis_source, Some(AnalysisSource::TranslatorStats));
    assert!(tgba.analysis_error.is_none());
}

#[test]
fn one_failed_variant_leaves_the_others_populated() {
    let dir = toolchain(LTL2TGBA);
    let mut analyzer = analyzer_for(&dir);
    let classification = analyzer
        .classify("G (req --> F ack)", &ClassifyOptions::default())
        .unwrap();

    assert!(!classification.tgba_analysis.has_error());
    assert!(!classification.buchi_analysis.has_error());

    let attempt = &classification.deterministic_attempt;
    assert!(!attempt.success);
    assert!(attempt
        .error
        .as_deref()
        .unwrap()
        .contains("deterministic construction unsupported"));
    assert!(attempt.automaton_analysis.has_error());

    let entries: Vec<_> = analyzer.diagnostics().issue_entries().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "G (req --> F ack)");
    assert_eq!(entries[0].1.len(), 1);
    let tag = entries[0].1.iter().next().unwrap();
    assert!(tag.starts_with("deterministic_attempt"), "{tag}");
    assert!(analyzer.diagnostics().warnings().is_empty());
}

#[test]
fn failed_variant_serializes_to_error_markers() {
    let dir = toolchain(LTL2TGBA);
    let mut analyzer = analyzer_for(&dir);
    let classification = analyzer
        .classify("G p", &ClassifyOptions::default())
        .unwrap();

    let value = serde_json::to_value(&classification).unwrap();
    assert_eq!(value["tgba_analysis"]["state_count"], 2);
    assert_eq!(
        value["deterministic_attempt"]["automaton_analysis"]["state_count"],
        "Error"
    );
    assert_eq!(value["deterministic_attempt"]["success"], false);
}

#[test]
fn unparsable_statistics_fall_back_to_the_analyzer() {
    let dir = toolchain(LTL2TGBA_BAD_STATS);
    let mut analyzer = analyzer_for(&dir);
    let classification = analyzer
        .classify("G p", &ClassifyOptions::default())
        .unwrap();

    let tgba = &classification.tgba_analysis;
    assert_eq!(tgba.analysis_source, Some(AnalysisSource::AnalyzerFallback));
    assert_eq!(tgba.state_count, Field::Value(2));
    assert_eq!(tgba.transition_count, Field::Value(4));
    assert_eq!(tgba.acceptance_sets, Field::Value(1));
    assert_eq!(tgba.is_complete, Field::Value(true));
    // `--is-deterministic` exits one with silent streams: a clean "no".
    assert_eq!(tgba.is_deterministic, Field::Value(false));
    assert_eq!(tgba.is_stutter_invariant, Field::Value(true));

    assert!(classification.deterministic_attempt.success);
    assert!(analyzer.diagnostics().is_empty());
}

#[test]
fn empty_directory_yields_no_classification_and_one_warning() {
    let dir = tempfile::tempdir().unwrap();
    let mut analyzer = SpotAnalyzer::with_search_path(dir.path().to_path_buf());

    assert!(analyzer
        .classify("G p", &ClassifyOptions::default())
        .is_none());
    assert!(analyzer
        .classify("F q", &ClassifyOptions::default())
        .is_none());

    let warnings = analyzer.diagnostics().warnings();
    assert_eq!(warnings.len(), 1);
    for tool in ["ltl2tgba", "ltlfilt", "autfilt"] {
        assert!(warnings[0].contains(tool), "{tool}");
    }
}

#[test]
fn partially_installed_toolchain_names_the_absent_tools() {
    let dir = tempfile::tempdir().unwrap();
    install_tool(dir.path(), "ltl2tgba", LTL2TGBA);
    let mut analyzer = SpotAnalyzer::with_search_path(dir.path().to_path_buf());

    assert!(analyzer
        .classify("G p", &ClassifyOptions::default())
        .is_none());
    let warnings = analyzer.diagnostics().warnings();
    assert_eq!(warnings.len(), 1);
    assert!(!warnings[0].contains("ltl2tgba"));
    assert!(warnings[0].contains("ltlfilt"));
    assert!(warnings[0].contains("autfilt"));
}

#[test]
fn tool_status_resolves_paths_in_the_search_directory() {
    let dir = toolchain(LTL2TGBA);
    let analyzer = analyzer_for(&dir);
    let report = analyzer.tool_status();

    for name in ["ltl2tgba", "ltlfilt", "autfilt"] {
        let status = &report[name];
        let path = status.path.as_deref().unwrap();
        assert!(path.starts_with(dir.path()), "{name}");
    }
    // The translator script answers any non-special invocation with its HOA
    // banner, which doubles as a version probe response.
    assert_eq!(report["ltl2tgba"].version.as_deref(), Some("HOA: v1 fake"));
}
