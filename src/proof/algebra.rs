//! The interface between the proof engine and a symbolic term library.
//!
//! The engine never inspects terms itself. Everything it needs to know about
//! them, whether a term is a proposition, which variables it mentions, how to
//! print it and whether it follows from a set of hypotheses, is asked through
//! [`TermAlgebra`]. Implementors are usually uninhabited marker types.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

use super::hypothesis::Hypothesis;

/// A symbolic term library the proof engine can reason over.
pub trait TermAlgebra: Sized + fmt::Debug + 'static {
    /// Terms: expressions and propositions.
    type Term: Clone + PartialEq + fmt::Debug + fmt::Display;
    /// Bound variables introduced by declarations.
    type Var: Clone + Eq + Hash + fmt::Debug + fmt::Display;
    /// Type tags attached to variable declarations.
    type Sort: Clone + PartialEq + fmt::Debug + fmt::Display;

    /// Returns `true` if `term` is boolean-valued.
    fn is_proposition(term: &Self::Term) -> bool;

    /// Returns `true` if every free variable of `term` is in `declared`.
    fn is_defined(term: &Self::Term, declared: &IndexSet<Self::Var>) -> bool;

    /// Creates a fresh variable of the given sort, named `name`.
    fn declare(sort: &Self::Sort, name: &str) -> Self::Var;

    /// Returns `true` if `goal` follows from `hypotheses`.
    ///
    /// Variable declarations are passed alongside facts so the algebra may use
    /// the sort of a variable (for example, positivity) as implicit knowledge.
    fn entails(hypotheses: &[&Hypothesis<Self>], goal: &Self::Term, verbose: bool) -> bool;

    /// Describes a named hypothesis as it appears in a theorem header.
    fn describe(name: &str, hypothesis: &Hypothesis<Self>) -> String {
        match hypothesis {
            Hypothesis::Variable { sort, .. } => format!("{name} : {sort}"),
            Hypothesis::Fact(term) => format!("{name} : {term}"),
        }
    }
}
