//! Closed AST variant set for parsed formulas.
//!
//! `And`/`Or` are n-ary: chains like `a and b and c` flatten into one node
//! with an ordered child list, which is what the structural aggregator's
//! counting convention and the height definition assume.

/// A parsed temporal-logic formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// Leaf atomic proposition, e.g. a raw identifier or a rewritten
    /// comparison such as `u_eq_n9`.
    Atom(String),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Imply(Box<Formula>, Box<Formula>),
    /// Temporal next (X).
    Next(Box<Formula>),
    /// Temporal finally (F).
    Finally(Box<Formula>),
    /// Temporal globally (G).
    Globally(Box<Formula>),
    /// Temporal until (U).
    Until(Box<Formula>, Box<Formula>),
    /// Temporal release (R).
    Release(Box<Formula>, Box<Formula>),
    /// Universal path quantifier (A).
    ForAll(Box<Formula>),
    /// Existential path quantifier (E).
    Exists(Box<Formula>),
}

impl Formula {
    /// Ordered child subformulas; empty for an atom.
    #[must_use]
    pub fn children(&self) -> Vec<&Formula> {
        match self {
            Formula::Atom(_) => Vec::new(),
            Formula::Not(p)
            | Formula::Next(p)
            | Formula::Finally(p)
            | Formula::Globally(p)
            | Formula::ForAll(p)
            | Formula::Exists(p) => vec![p.as_ref()],
            Formula::And(ps) | Formula::Or(ps) => ps.iter().collect(),
            Formula::Imply(lhs, rhs)
            | Formula::Until(lhs, rhs)
            | Formula::Release(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
        }
    }

    /// Subtree height: atoms sit at height zero, every other node is one
    /// above its tallest child.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.children()
            .iter()
            .map(|child| child.height())
            .max()
            .map_or(0, |h| h + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Formula {
        Formula::Atom(name.to_string())
    }

    #[test]
    fn atom_has_height_zero_and_no_children() {
        let a = atom("p");
        assert_eq!(a.height(), 0);
        assert!(a.children().is_empty());
    }

    #[test]
    fn height_follows_tallest_branch() {
        // G(p --> F q): F q is the taller branch of the implication.
        let f = Formula::Globally(Box::new(Formula::Imply(
            Box::new(atom("p")),
            Box::new(Formula::Finally(Box::new(atom("q")))),
        )));
        assert_eq!(f.height(), 3);
    }

    #[test]
    fn nary_and_children_stay_ordered() {
        let f = Formula::And(vec![atom("a"), atom("b"), atom("c")]);
        let names: Vec<_> = f
            .children()
            .iter()
            .map(|c| match c {
                Formula::Atom(n) => n.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(f.height(), 1);
    }
}
