//! Lemmas and the tactic that brings an instantiated lemma into scope.

use std::fmt;
use std::rc::Rc;

use super::algebra::TermAlgebra;
use super::error::TacticError;
use super::state::ProofState;
use super::tactic::Tactic;

/// A stored statement that can be instantiated against an obligation.
///
/// Instantiation binds the lemma's quantified parameters from the state's
/// hypotheses and goal and yields the resulting fact.
pub trait Lemma<A: TermAlgebra>: fmt::Display {
    /// Instantiates the lemma against `state`.
    ///
    /// # Errors
    ///
    /// Returns [`TacticError`] when the lemma's premises cannot be matched.
    fn instantiate(&self, state: &ProofState<A>) -> Result<A::Term, TacticError>;
}

/// Adds an instantiated lemma to the context as a new named fact.
pub struct UseLemma<A: TermAlgebra> {
    name: String,
    lemma: Rc<dyn Lemma<A>>,
}

impl<A: TermAlgebra> UseLemma<A> {
    /// Creates the tactic; the fact is added under `name` (primed if taken).
    pub fn new(name: impl Into<String>, lemma: Rc<dyn Lemma<A>>) -> Self {
        Self {
            name: name.into(),
            lemma,
        }
    }
}

impl<A: TermAlgebra> Tactic<A> for UseLemma<A> {
    fn apply(&self, state: &ProofState<A>) -> Result<Vec<ProofState<A>>, TacticError> {
        let fact = self.lemma.instantiate(state)?;
        if !A::is_proposition(&fact) {
            return Err(TacticError::new(format!(
                "lemma {} produced {fact}, which is not a proposition",
                self.lemma
            )));
        }
        if !A::is_defined(&fact, &state.get_all_vars()) {
            return Err(TacticError::new(format!(
                "{fact} mentions variables outside the current context"
            )));
        }
        let mut next = state.clone();
        let name = next.new_hypothesis(&self.name, fact);
        tracing::debug!(lemma = %self.lemma, %name, "instantiated lemma");
        Ok(vec![next])
    }
}

impl<A: TermAlgebra> fmt::Display for UseLemma<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "have {} := {}", self.name, self.lemma)
    }
}
