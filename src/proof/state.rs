//! A single proof obligation: a goal and the hypotheses available for it.
//!
//! Hypotheses are kept in insertion order under unique names. Adding an entry
//! under a taken name appends primes (`x`, `x'`, `x''`, ...) until the name is
//! free, so tactics never clobber an existing hypothesis by accident.
//!
//! Once a state is attached to a proof tree node it is never mutated again;
//! tactics clone the state they receive and edit the clone.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use super::algebra::TermAlgebra;
use super::error::ProofError;
use super::hypothesis::{Hypothesis, HypothesisKind};

/// The goal of an obligation together with its named hypotheses.
#[derive(Debug)]
pub struct ProofState<A: TermAlgebra> {
    goal: A::Term,
    hypotheses: IndexMap<String, Hypothesis<A>>,
}

impl<A: TermAlgebra> ProofState<A> {
    /// Creates a proof state from a goal and an ordered hypothesis map.
    #[must_use]
    pub const fn new(goal: A::Term, hypotheses: IndexMap<String, Hypothesis<A>>) -> Self {
        Self { goal, hypotheses }
    }

    /// Returns the goal.
    #[must_use]
    pub const fn goal(&self) -> &A::Term {
        &self.goal
    }

    /// Replaces the goal.
    pub fn set_goal(&mut self, goal: A::Term) {
        self.goal = goal;
    }

    /// Returns the hypotheses in insertion order.
    #[must_use]
    pub const fn hypotheses(&self) -> &IndexMap<String, Hypothesis<A>> {
        &self.hypotheses
    }

    /// Returns the first unused version of `name`, adding primes as needed.
    #[must_use]
    pub fn new_name(&self, name: &str) -> String {
        fresh_name(&self.hypotheses, name)
    }

    /// Removes a fact.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NameNotFound`] if there is no such entry and
    /// [`ProofError::UnsupportedOperation`] if the entry is a variable
    /// declaration.
    pub fn remove_hypothesis(&mut self, name: &str) -> Result<Hypothesis<A>, ProofError> {
        match self.hypotheses.get(name) {
            None => Err(not_found(name)),
            Some(Hypothesis::Variable { .. }) => Err(ProofError::UnsupportedOperation {
                operation: "remove",
                name: name.to_owned(),
            }),
            Some(Hypothesis::Fact(_)) => self
                .hypotheses
                .shift_remove(name)
                .ok_or_else(|| not_found(name)),
        }
    }

    /// Returns the fact stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NameNotFound`] if absent and
    /// [`ProofError::WrongHypothesisKind`] if `name` is a variable.
    pub fn get_hypothesis(&self, name: &str) -> Result<&A::Term, ProofError> {
        lookup_fact(&self.hypotheses, name)
    }

    /// Returns the variable declared under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NameNotFound`] if absent and
    /// [`ProofError::WrongHypothesisKind`] if `name` is a fact.
    pub fn get_var(&self, name: &str) -> Result<&A::Var, ProofError> {
        lookup_var(&self.hypotheses, name)
    }

    /// Returns the sort of the variable declared under `name`.
    ///
    /// # Errors
    ///
    /// Same as [`ProofState::get_var`].
    pub fn get_sort(&self, name: &str) -> Result<&A::Sort, ProofError> {
        match self.hypotheses.get(name) {
            None => Err(not_found(name)),
            Some(Hypothesis::Variable { sort, .. }) => Ok(sort),
            Some(Hypothesis::Fact(_)) => Err(ProofError::WrongHypothesisKind {
                name: name.to_owned(),
                expected: HypothesisKind::Variable,
            }),
        }
    }

    /// Returns the name under which `var` is declared.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NameNotFound`] if `var` is not declared.
    pub fn get_var_name(&self, var: &A::Var) -> Result<&str, ProofError> {
        self.hypotheses
            .iter()
            .find(|(_, hypothesis)| hypothesis.as_var() == Some(var))
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| not_found(&var.to_string()))
    }

    /// Returns every declared variable, in declaration order.
    #[must_use]
    pub fn get_all_vars(&self) -> IndexSet<A::Var> {
        declared_vars(&self.hypotheses)
    }

    /// Moves a fact to a new name and returns the name actually used.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NameNotFound`] if `old_name` is absent,
    /// [`ProofError::NameAlreadyUsed`] if `new_name` is taken and
    /// [`ProofError::UnsupportedOperation`] if `old_name` is a variable.
    pub fn rename_hypothesis(&mut self, old_name: &str, new_name: &str) -> Result<String, ProofError> {
        match self.hypotheses.get(old_name) {
            None => return Err(not_found(old_name)),
            Some(_) if self.hypotheses.contains_key(new_name) => {
                return Err(ProofError::NameAlreadyUsed {
                    name: new_name.to_owned(),
                });
            }
            Some(Hypothesis::Variable { .. }) => {
                return Err(ProofError::UnsupportedOperation {
                    operation: "rename",
                    name: old_name.to_owned(),
                });
            }
            Some(Hypothesis::Fact(_)) => {}
        }
        let hypothesis = self
            .hypotheses
            .shift_remove(old_name)
            .ok_or_else(|| not_found(old_name))?;
        let name = self.new_name(new_name);
        self.hypotheses.insert(name.clone(), hypothesis);
        Ok(name)
    }

    /// Adds a fact under the first free version of `name` and returns it.
    pub fn new_hypothesis(&mut self, name: &str, fact: A::Term) -> String {
        let fresh = self.new_name(name);
        self.hypotheses.insert(fresh.clone(), Hypothesis::Fact(fact));
        fresh
    }

    /// Declares a variable under the first free version of `name`.
    pub fn declare_var(&mut self, name: &str, sort: A::Sort, var: A::Var) -> String {
        let fresh = self.new_name(name);
        self.hypotheses
            .insert(fresh.clone(), Hypothesis::Variable { sort, var });
        fresh
    }

    /// Overwrites the entry stored under `name`, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NameNotFound`] if `name` is absent.
    pub fn replace_hypothesis(
        &mut self,
        name: &str,
        hypothesis: Hypothesis<A>,
    ) -> Result<(), ProofError> {
        let slot = self
            .hypotheses
            .get_mut(name)
            .ok_or_else(|| not_found(name))?;
        *slot = hypothesis;
        Ok(())
    }

    /// Lists hypothesis values; declarations are skipped unless asked for.
    #[must_use]
    pub fn list_hypotheses(&self, include_variables: bool) -> Vec<&Hypothesis<A>> {
        self.hypotheses
            .values()
            .filter(|hypothesis| include_variables || hypothesis.as_fact().is_some())
            .collect()
    }

    /// Returns `true` if `goal` follows immediately from the hypotheses.
    #[must_use]
    pub fn test(&self, goal: &A::Term, verbose: bool) -> bool {
        let hypotheses: Vec<&Hypothesis<A>> = self.hypotheses.values().collect();
        A::entails(&hypotheses, goal, verbose)
    }

    /// Checks that the goal and every fact only mention declared variables.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::UndefinedVariable`] naming the first offending
    /// term.
    pub fn check_scoped(&self) -> Result<(), ProofError> {
        let declared = self.get_all_vars();
        let facts = self.hypotheses.values().filter_map(Hypothesis::as_fact);
        for term in std::iter::once(&self.goal).chain(facts) {
            if !A::is_defined(term, &declared) {
                return Err(ProofError::UndefinedVariable {
                    term: term.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<A: TermAlgebra> Clone for ProofState<A> {
    fn clone(&self) -> Self {
        Self {
            goal: self.goal.clone(),
            hypotheses: self.hypotheses.clone(),
        }
    }
}

impl<A: TermAlgebra> PartialEq for ProofState<A> {
    fn eq(&self, other: &Self) -> bool {
        self.goal == other.goal && self.hypotheses == other.hypotheses
    }
}

impl<A: TermAlgebra> fmt::Display for ProofState<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, hypothesis) in &self.hypotheses {
            writeln!(f, "{}", A::describe(name, hypothesis))?;
        }
        write!(f, "|- {}", self.goal)
    }
}

// ── Shared helpers for name-keyed hypothesis maps ───────────────────

/// Returns the first version of `name` (with primes appended) not in `map`.
pub(crate) fn fresh_name<A: TermAlgebra>(
    map: &IndexMap<String, Hypothesis<A>>,
    name: &str,
) -> String {
    let mut candidate = name.to_owned();
    while map.contains_key(&candidate) {
        candidate.push('\'');
    }
    candidate
}

pub(crate) fn lookup_fact<'a, A: TermAlgebra>(
    map: &'a IndexMap<String, Hypothesis<A>>,
    name: &str,
) -> Result<&'a A::Term, ProofError> {
    match map.get(name) {
        None => Err(not_found(name)),
        Some(Hypothesis::Fact(term)) => Ok(term),
        Some(Hypothesis::Variable { .. }) => Err(ProofError::WrongHypothesisKind {
            name: name.to_owned(),
            expected: HypothesisKind::Fact,
        }),
    }
}

pub(crate) fn lookup_var<'a, A: TermAlgebra>(
    map: &'a IndexMap<String, Hypothesis<A>>,
    name: &str,
) -> Result<&'a A::Var, ProofError> {
    match map.get(name) {
        None => Err(not_found(name)),
        Some(Hypothesis::Variable { var, .. }) => Ok(var),
        Some(Hypothesis::Fact(_)) => Err(ProofError::WrongHypothesisKind {
            name: name.to_owned(),
            expected: HypothesisKind::Variable,
        }),
    }
}

pub(crate) fn declared_vars<A: TermAlgebra>(
    map: &IndexMap<String, Hypothesis<A>>,
) -> IndexSet<A::Var> {
    map.values()
        .filter_map(Hypothesis::as_var)
        .cloned()
        .collect()
}

fn not_found(name: &str) -> ProofError {
    ProofError::NameNotFound {
        name: name.to_owned(),
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
