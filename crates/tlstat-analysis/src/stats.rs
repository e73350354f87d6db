//! Formula-level statistics facade.

use anyhow::{Context, Result};
use tlstat_math::shannon_entropy;
use tlstat_parsing::{normalize_comparisons, parse};
use tlstat_spot::{ClassifyOptions, FormulaClassifier};
use tlstat_types::{Aggregates, EntropyTriple, FormulaStats};

use crate::req_text::requirement_text_stats;
use crate::walk::walk;

/// Compute the structural statistics for one formula.
///
/// Composes normalizer, parser, walker, and entropy aggregation. An empty
/// formula yields a zeroed record without a parse attempt; a malformed
/// formula is a hard failure for that formula.
pub fn compute_stats(formula: &str, req_text: Option<&str>) -> Result<FormulaStats> {
    let mut stats = FormulaStats {
        formula_raw: formula.to_string(),
        req_text: req_text
            .filter(|text| !text.is_empty())
            .map(requirement_text_stats),
        ..FormulaStats::default()
    };
    if formula.is_empty() {
        return Ok(stats);
    }

    let (cops, parsable) = normalize_comparisons(formula);
    let ast = parse(&parsable)
        .with_context(|| format!("Failed to parse formula `{formula}` (normalized: `{parsable}`)"))?;
    let summary = walk(&ast);

    stats.formula_parsable = parsable;
    stats.ast_height = summary.height;
    stats.cops = cops;
    stats.lops = summary.lops;
    stats.tops = summary.tops;
    stats.agg = Aggregates {
        aps: summary.atoms.len() as u32,
        cops: cops.total(),
        lops: summary.lops.total(),
        tops: summary.tops.total(),
    };
    stats.entropy = entropy_triple(&stats);
    stats.atoms = summary.atoms;
    Ok(stats)
}

/// Compute structural statistics and enrich them with an automata-theoretic
/// classification from `classifier`.
///
/// A classifier returning none leaves the extended block absent; the core
/// statistics are unaffected either way.
pub fn compute_stats_extended(
    formula: &str,
    req_text: Option<&str>,
    classifier: &mut dyn FormulaClassifier,
    options: &ClassifyOptions,
) -> Result<FormulaStats> {
    let mut stats = compute_stats(formula, req_text)?;
    stats.extended = classifier.classify(formula, options);
    Ok(stats)
}

fn entropy_triple(stats: &FormulaStats) -> EntropyTriple {
    let tops = stats.tops.values();
    let lops = stats.lops.values();
    let mut merged = Vec::with_capacity(tops.len() + lops.len());
    merged.extend_from_slice(&tops);
    merged.extend_from_slice(&lops);
    EntropyTriple {
        tops: shannon_entropy(&tops),
        lops: shannon_entropy(&lops),
        lops_tops: shannon_entropy(&merged),
    }
}
