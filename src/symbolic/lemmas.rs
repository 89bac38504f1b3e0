//! Lemmas over [`Symbolic`] terms.

use std::fmt;

use super::entail::Symbolic;
use super::expr::{Expr, Node, RelOp};
use crate::proof::{Hypothesis, Lemma, ProofState, TacticError};

/// `a > 0` and `b > 0` give `a + b > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPos {
    lhs: Expr,
    rhs: Expr,
}

impl AddPos {
    /// Instantiates the lemma for the sum `lhs + rhs`.
    pub fn new(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
}

impl Lemma<Symbolic> for AddPos {
    fn instantiate(&self, state: &ProofState<Symbolic>) -> Result<Expr, TacticError> {
        for term in [&self.lhs, &self.rhs] {
            let premise = term.gt(0);
            if !state.test(&premise, false) {
                return Err(TacticError::new(format!("cannot prove premise {premise}")));
            }
        }
        Ok((self.lhs.clone() + &self.rhs).gt(0))
    }
}

impl fmt::Display for AddPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add_pos ({}) ({})", self.lhs, self.rhs)
    }
}

/// Chains `a <= b` and `b <= c` into `a <= c`.
///
/// The middle term is found among the facts. The conclusion is strict when
/// either link is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeTrans {
    lower: Expr,
    upper: Expr,
}

impl LeTrans {
    /// Instantiates the lemma for `lower <= upper`.
    pub fn new(lower: impl Into<Expr>, upper: impl Into<Expr>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
        }
    }
}

/// Reads a fact as `small <= big`, flagging `<`.
fn as_bound(fact: &Expr) -> Option<(&Expr, &Expr, bool)> {
    let Node::Rel(op, lhs, rhs) = fact.node() else {
        return None;
    };
    match op {
        RelOp::Le => Some((lhs, rhs, false)),
        RelOp::Lt => Some((lhs, rhs, true)),
        RelOp::Ge => Some((rhs, lhs, false)),
        RelOp::Gt => Some((rhs, lhs, true)),
        RelOp::Eq | RelOp::Ne => None,
    }
}

impl Lemma<Symbolic> for LeTrans {
    fn instantiate(&self, state: &ProofState<Symbolic>) -> Result<Expr, TacticError> {
        let bounds: Vec<_> = state
            .list_hypotheses(false)
            .into_iter()
            .filter_map(Hypothesis::as_fact)
            .filter_map(as_bound)
            .collect();
        let chain = bounds
            .iter()
            .filter(|(small, _, _)| **small == self.lower)
            .find_map(|&(_, middle, first_strict)| {
                bounds
                    .iter()
                    .find(|(small, big, _)| *small == middle && **big == self.upper)
                    .map(|&(_, _, second_strict)| first_strict || second_strict)
            });
        match chain {
            Some(true) => Ok(self.lower.lt(&self.upper)),
            Some(false) => Ok(self.lower.le(&self.upper)),
            None => Err(TacticError::new(format!(
                "no middle term links {} to {}",
                self.lower, self.upper
            ))),
        }
    }
}

impl fmt::Display for LeTrans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "le_trans ({}) ({})", self.lower, self.upper)
    }
}
