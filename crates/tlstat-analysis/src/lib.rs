//! # tlstat-analysis
//!
//! **Tier 3 (Analysis)**
//!
//! Structural and semantic statistics for temporal-logic formulas: the AST
//! walker, the entropy aggregation, requirement-text measurements, and the
//! facade that composes normalizer, parser, walker, and (optionally) the
//! external analyzer into one formula-level result.
//!
//! ## What belongs here
//! * One-pass structural aggregation over a parsed formula
//! * Entropy-triple assembly over the operator tallies
//! * The `FormulaStats` facade
//!
//! ## What does NOT belong here
//! * Grammar and normalization (use tlstat-parsing)
//! * Toolchain invocation (use tlstat-spot)

mod req_text;
mod stats;
mod walk;

pub use req_text::requirement_text_stats;
pub use stats::{compute_stats, compute_stats_extended};
pub use walk::{StructuralSummary, walk};
