//! Tactics over [`Symbolic`] proof states.

use std::fmt;

use super::entail::{Knowledge, Symbolic};
use super::expr::{Expr, Node, RelOp, Symbol};
use super::sort::Sign;
use crate::proof::{Hypothesis, ProofState, Tactic, TacticError};

type State = ProofState<Symbolic>;

/// Simplifies each fact using the other hypotheses, then the goal using all
/// of them.
///
/// A fact that simplifies to true is dropped. A fact that simplifies to false
/// closes the goal, as does a goal that simplifies to true.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpAll;

impl Tactic<Symbolic> for SimpAll {
    fn apply(&self, state: &State) -> Result<Vec<State>, TacticError> {
        let mut next = state.clone();
        for (name, hypothesis) in state.hypotheses() {
            let Hypothesis::Fact(fact) = hypothesis else {
                continue;
            };
            let others = Knowledge::from_hypotheses(
                next.hypotheses()
                    .iter()
                    .filter(|(other, _)| *other != name)
                    .map(|(_, other)| other),
            );
            let simplified = simplify(fact, &others);
            if simplified.is_false() {
                tracing::debug!(%name, "hypothesis simplified to false");
                return Ok(Vec::new());
            }
            if simplified.is_true() {
                next.remove_hypothesis(name)?;
            } else {
                next.replace_hypothesis(name, Hypothesis::Fact(simplified))?;
            }
        }
        let knowledge = Knowledge::from_hypotheses(next.hypotheses().values());
        let goal = simplify(next.goal(), &knowledge);
        if goal.is_true() {
            return Ok(Vec::new());
        }
        next.set_goal(goal);
        if next == *state {
            return Err(TacticError::new("simp_all made no progress"));
        }
        Ok(vec![next])
    }
}

impl fmt::Display for SimpAll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("simp_all")
    }
}

/// Rewrites `expr` bottom-up using what `knowledge` can decide.
///
/// Propositions that follow become `True` and refuted ones `False`.
/// Comparisons are tightened to the operator the known signs allow, and
/// `max`/`min` of ordered operands collapse to one side.
#[must_use]
pub fn simplify(expr: &Expr, knowledge: &Knowledge) -> Expr {
    if expr.is_proposition() && expr.as_bool().is_none() {
        if knowledge.proves(expr) {
            return Expr::boolean(true);
        }
        if knowledge.refutes(expr) {
            return Expr::boolean(false);
        }
    } else if let Some(value) = expr.evaluate() {
        return Expr::int(value);
    }
    match expr.node() {
        Node::Int(_) | Node::Bool(_) | Node::Var(_) => expr.clone(),
        Node::Add(lhs, rhs) => simplify(lhs, knowledge) + simplify(rhs, knowledge),
        Node::Mul(lhs, rhs) => simplify(lhs, knowledge) * simplify(rhs, knowledge),
        Node::Neg(inner) => -simplify(inner, knowledge),
        Node::Max(lhs, rhs) => {
            let (left, right) = (simplify(lhs, knowledge), simplify(rhs, knowledge));
            match ordering(&left, &right, knowledge) {
                Some(true) => right,
                Some(false) => left,
                None => left.max(right),
            }
        }
        Node::Min(lhs, rhs) => {
            let (left, right) = (simplify(lhs, knowledge), simplify(rhs, knowledge));
            match ordering(&left, &right, knowledge) {
                Some(true) => left,
                Some(false) => right,
                None => left.min(right),
            }
        }
        Node::Rel(op, lhs, rhs) => {
            let (left, right) = (simplify(lhs, knowledge), simplify(rhs, knowledge));
            let allowed = knowledge.difference_signs(&left, &right).intersect(op.signs());
            if allowed.is_empty() {
                return Expr::boolean(false);
            }
            let tightened = RelOp::from_signs(allowed).unwrap_or(*op);
            left.rel(tightened, right)
        }
        Node::And(lhs, rhs) => {
            let (left, right) = (simplify(lhs, knowledge), simplify(rhs, knowledge));
            match (left.as_bool(), right.as_bool()) {
                (Some(false), _) | (_, Some(false)) => Expr::boolean(false),
                (Some(true), _) => right,
                (_, Some(true)) => left,
                _ => left.and(right),
            }
        }
        Node::Or(lhs, rhs) => {
            let (left, right) = (simplify(lhs, knowledge), simplify(rhs, knowledge));
            match (left.as_bool(), right.as_bool()) {
                (Some(true), _) | (_, Some(true)) => Expr::boolean(true),
                (Some(false), _) => right,
                (_, Some(false)) => left,
                _ => left.or(right),
            }
        }
        Node::Not(inner) => {
            let simplified = simplify(inner, knowledge);
            simplified
                .as_bool()
                .map_or_else(|| !simplified.clone(), |value| Expr::boolean(!value))
        }
    }
}

/// `Some(true)` if `lhs <= rhs` is known, `Some(false)` if `lhs >= rhs` is.
fn ordering(lhs: &Expr, rhs: &Expr, knowledge: &Knowledge) -> Option<bool> {
    let signs = knowledge.difference_signs(lhs, rhs);
    if signs.is_subset(RelOp::Le.signs()) {
        Some(true)
    } else if signs.is_subset(RelOp::Ge.signs()) {
        Some(false)
    } else {
        None
    }
}

/// Strengthens the sort of a variable with a sign the hypotheses entail.
///
/// Displays as `is_positive x`, `is_nonnegative x` or `is_nonzero x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRefinement {
    name: String,
    claim: Claim,
}

/// The signs a refinement can establish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Positive,
    Nonnegative,
    Nonzero,
}

impl Claim {
    const fn sign(self) -> Sign {
        match self {
            Self::Positive => Sign::Positive,
            Self::Nonnegative => Sign::Nonnegative,
            Self::Nonzero => Sign::Nonzero,
        }
    }
}

impl SignRefinement {
    /// Proves the variable `name` positive.
    pub fn is_positive(name: impl Into<String>) -> Self {
        Self::new(name, Claim::Positive)
    }

    /// Proves the variable `name` nonnegative.
    pub fn is_nonnegative(name: impl Into<String>) -> Self {
        Self::new(name, Claim::Nonnegative)
    }

    /// Proves the variable `name` nonzero.
    pub fn is_nonzero(name: impl Into<String>) -> Self {
        Self::new(name, Claim::Nonzero)
    }

    fn new(name: impl Into<String>, claim: Claim) -> Self {
        Self {
            name: name.into(),
            claim,
        }
    }

    fn statement(&self, symbol: &Symbol) -> Expr {
        let var = Expr::var(symbol);
        match self.claim {
            Claim::Positive => var.gt(0),
            Claim::Nonnegative => var.ge(0),
            Claim::Nonzero => var.ne_to(0),
        }
    }
}

impl Tactic<Symbolic> for SignRefinement {
    fn apply(&self, state: &State) -> Result<Vec<State>, TacticError> {
        let sort = *state.get_sort(&self.name)?;
        let symbol = state.get_var(&self.name)?.clone();
        if sort.sign().implies(self.claim.sign()) {
            return Err(TacticError::new(format!(
                "{} is already of sort {sort}",
                self.name
            )));
        }
        let Some(refined) = sort.refined(self.claim.sign()) else {
            return Err(TacticError::new(format!(
                "{} : {sort} cannot carry a sign",
                self.name
            )));
        };
        let statement = self.statement(&symbol);
        if !state.test(&statement, false) {
            return Err(TacticError::new(format!("cannot prove {statement}")));
        }
        let mut next = state.clone();
        next.replace_hypothesis(
            &self.name,
            Hypothesis::Variable {
                sort: refined,
                var: symbol,
            },
        )?;
        tracing::debug!(name = %self.name, sort = %refined, "refined variable sort");
        let declarations = Knowledge::from_hypotheses(
            next.hypotheses()
                .values()
                .filter(|hypothesis| hypothesis.as_var().is_some()),
        );
        if declarations.proves(next.goal()) {
            return Ok(Vec::new());
        }
        Ok(vec![next])
    }
}

impl fmt::Display for SignRefinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.claim {
            Claim::Positive => "is_positive",
            Claim::Nonnegative => "is_nonnegative",
            Claim::Nonzero => "is_nonzero",
        };
        write!(f, "{verb} {}", self.name)
    }
}

/// Splits a conjunction goal into one obligation per conjunct.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitGoal;

impl Tactic<Symbolic> for SplitGoal {
    fn apply(&self, state: &State) -> Result<Vec<State>, TacticError> {
        let Node::And(lhs, rhs) = state.goal().node() else {
            return Err(TacticError::new(format!(
                "goal {} is not a conjunction",
                state.goal()
            )));
        };
        Ok([lhs, rhs]
            .into_iter()
            .map(|conjunct| {
                let mut next = state.clone();
                next.set_goal(conjunct.clone());
                next
            })
            .collect())
    }
}

impl fmt::Display for SplitGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("split")
    }
}

/// Case analysis on a disjunctive hypothesis: one obligation per disjunct,
/// each with the hypothesis replaced by that disjunct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cases {
    name: String,
}

impl Cases {
    /// Splits on the hypothesis named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Tactic<Symbolic> for Cases {
    fn apply(&self, state: &State) -> Result<Vec<State>, TacticError> {
        let fact = state.get_hypothesis(&self.name)?;
        let Node::Or(lhs, rhs) = fact.node() else {
            return Err(TacticError::new(format!(
                "{} : {fact} is not a disjunction",
                self.name
            )));
        };
        [lhs, rhs]
            .into_iter()
            .map(|disjunct| -> Result<State, TacticError> {
                let mut next = state.clone();
                next.replace_hypothesis(&self.name, Hypothesis::Fact(disjunct.clone()))?;
                Ok(next)
            })
            .collect()
    }
}

impl fmt::Display for Cases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cases {}", self.name)
    }
}

/// Closes a goal that follows directly from the hypotheses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trivial;

impl Tactic<Symbolic> for Trivial {
    fn apply(&self, state: &State) -> Result<Vec<State>, TacticError> {
        if state.test(state.goal(), false) {
            Ok(Vec::new())
        } else {
            Err(TacticError::new(format!(
                "{} does not follow from the hypotheses",
                state.goal()
            )))
        }
    }
}

impl fmt::Display for Trivial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("trivial")
    }
}

#[cfg(test)]
#[path = "tactics_tests.rs"]
mod tests;
