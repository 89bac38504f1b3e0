//! Named entries of a proof state's context.

use std::fmt;

use super::algebra::TermAlgebra;

/// An entry in a proof state's context: a variable declaration or a fact.
#[derive(Debug)]
pub enum Hypothesis<A: TermAlgebra> {
    /// A variable bound with a sort, e.g. `n : real`.
    Variable {
        /// The declared sort.
        sort: A::Sort,
        /// The bound variable.
        var: A::Var,
    },
    /// An assumed proposition.
    Fact(A::Term),
}

impl<A: TermAlgebra> Hypothesis<A> {
    /// Returns which kind of entry this is.
    #[must_use]
    pub const fn kind(&self) -> HypothesisKind {
        match self {
            Self::Variable { .. } => HypothesisKind::Variable,
            Self::Fact(_) => HypothesisKind::Fact,
        }
    }

    /// Returns the proposition if this entry is a fact.
    #[must_use]
    pub const fn as_fact(&self) -> Option<&A::Term> {
        match self {
            Self::Fact(term) => Some(term),
            Self::Variable { .. } => None,
        }
    }

    /// Returns the bound variable if this entry is a declaration.
    #[must_use]
    pub const fn as_var(&self) -> Option<&A::Var> {
        match self {
            Self::Variable { var, .. } => Some(var),
            Self::Fact(_) => None,
        }
    }
}

impl<A: TermAlgebra> Clone for Hypothesis<A> {
    fn clone(&self) -> Self {
        match self {
            Self::Variable { sort, var } => Self::Variable {
                sort: sort.clone(),
                var: var.clone(),
            },
            Self::Fact(term) => Self::Fact(term.clone()),
        }
    }
}

impl<A: TermAlgebra> PartialEq for Hypothesis<A> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Variable { sort, var },
                Self::Variable {
                    sort: other_sort,
                    var: other_var,
                },
            ) => sort == other_sort && var == other_var,
            (Self::Fact(term), Self::Fact(other_term)) => term == other_term,
            _ => false,
        }
    }
}

/// The two kinds of hypothesis, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HypothesisKind {
    /// A variable declaration.
    Variable,
    /// An assumed proposition.
    Fact,
}

impl fmt::Display for HypothesisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Variable => "variable declaration",
            Self::Fact => "fact",
        })
    }
}
