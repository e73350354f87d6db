//! One-pass structural aggregation over a parsed formula.

use std::collections::BTreeSet;

use tlstat_parsing::Formula;
use tlstat_types::{LogicalCounts, TemporalCounts};

/// Structural metrics extracted in a single depth-first traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralSummary {
    /// Height of the root; atoms sit at height zero.
    pub height: u32,
    /// Deduplicated textual representations of the atomic propositions.
    pub atoms: BTreeSet<String>,
    pub lops: LogicalCounts,
    pub tops: TemporalCounts,
}

/// Walk the tree once, collecting the atom set and the operator tallies.
///
/// The height is read off the root (the node already knows its subtree
/// height); the traversal itself only tallies. An n-ary `And`/`Or` with k
/// children counts as k-1 binary joins; `Imply` and `Not` always count once.
#[must_use]
pub fn walk(root: &Formula) -> StructuralSummary {
    let mut summary = StructuralSummary {
        height: root.height(),
        ..StructuralSummary::default()
    };
    visit(root, &mut summary);
    summary
}

fn visit(node: &Formula, summary: &mut StructuralSummary) {
    match node {
        Formula::Atom(name) => {
            summary.atoms.insert(name.clone());
            return;
        }
        Formula::Imply(..) => summary.lops.imply += 1,
        Formula::And(children) => summary.lops.and += children.len() as u32 - 1,
        Formula::Or(children) => summary.lops.or += children.len() as u32 - 1,
        Formula::Not(_) => summary.lops.not += 1,
        Formula::Next(_) => summary.tops.x += 1,
        Formula::Finally(_) => summary.tops.f += 1,
        Formula::Globally(_) => summary.tops.g += 1,
        Formula::Until(..) => summary.tops.u += 1,
        Formula::Release(..) => summary.tops.r += 1,
        Formula::ForAll(_) => summary.tops.a += 1,
        Formula::Exists(_) => summary.tops.e += 1,
    }
    for child in node.children() {
        visit(child, summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlstat_parsing::parse;

    fn summary_of(formula: &str) -> StructuralSummary {
        walk(&parse(formula).unwrap())
    }

    #[test]
    fn nary_conjunction_counts_children_minus_one() {
        for (formula, expected) in [
            ("a and b", 1),
            ("a and b and c", 2),
            ("a and b and c and d", 3),
        ] {
            let summary = summary_of(formula);
            assert_eq!(summary.lops.and, expected, "{formula}");
        }
    }

    #[test]
    fn imply_and_not_always_count_once() {
        let summary = summary_of("not p --> not q");
        assert_eq!(summary.lops.imply, 1);
        assert_eq!(summary.lops.not, 2);
    }

    #[test]
    fn repeated_atoms_deduplicate() {
        let summary = summary_of("(ics) --> F((ics) --> (new))");
        assert_eq!(summary.atoms.len(), 2);
        assert!(summary.atoms.contains("ics"));
        assert!(summary.atoms.contains("new"));
    }

    #[test]
    fn temporal_operators_land_in_their_buckets() {
        let summary = summary_of("A G (p U q) and E F (r R s) and X t");
        assert_eq!(summary.tops.a, 1);
        assert_eq!(summary.tops.g, 1);
        assert_eq!(summary.tops.u, 1);
        assert_eq!(summary.tops.e, 1);
        assert_eq!(summary.tops.f, 1);
        assert_eq!(summary.tops.r, 1);
        assert_eq!(summary.tops.x, 1);
        assert_eq!(summary.tops.total(), 7);
    }

    #[test]
    fn height_is_read_off_the_root() {
        assert_eq!(summary_of("p").height, 0);
        assert_eq!(summary_of("p --> q").height, 1);
        assert_eq!(summary_of("G (not (waitCPU_gt_n5))").height, 2);
    }
}
