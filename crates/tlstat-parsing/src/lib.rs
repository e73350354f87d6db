//! # tlstat-parsing
//!
//! **Tier 2 (Utilities)**
//!
//! Text shaping and parsing for temporal-logic formulas in the friendly
//! surface syntax (CTL/LTL-style operators, boolean connectives, arithmetic
//! comparisons).
//!
//! ## What belongs here
//! * Comparison-operator counting and parser-safe rewriting
//! * The formula grammar and its closed AST variant set
//!
//! ## What does NOT belong here
//! * Statistics aggregation (use tlstat-analysis)
//! * External-toolchain syntax translation (use tlstat-spot)

mod ast;
mod normalize;
mod parser;

pub use ast::Formula;
pub use normalize::normalize_comparisons;
pub use parser::{ParseError, parse};
