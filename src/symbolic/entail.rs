//! The [`Symbolic`] term algebra and its sign-based entailment check.
//!
//! Entailment is shallow. Facts are split into conjuncts, and
//! every comparison is recorded as a sign constraint on a difference of two
//! terms. A goal comparison then holds if the signs its difference can take
//! all satisfy the goal's operator. Sums, products, negations, `max` and
//! `min` propagate signs through their operands, and variable sorts
//! contribute their sign refinement.

use indexmap::{IndexMap, IndexSet};

use super::expr::{Expr, Node, RelOp, SignSet, Symbol};
use super::sort::{Domain, Sign, Sort};
use crate::proof::{Hypothesis, TermAlgebra};

/// Term algebra over [`Expr`] with [`Sort`]-tagged [`Symbol`] variables.
#[derive(Debug)]
pub enum Symbolic {}

impl TermAlgebra for Symbolic {
    type Term = Expr;
    type Var = Symbol;
    type Sort = Sort;

    fn is_proposition(term: &Expr) -> bool {
        term.is_proposition()
    }

    fn is_defined(term: &Expr, declared: &IndexSet<Symbol>) -> bool {
        term.free_vars().iter().all(|var| declared.contains(var))
    }

    fn declare(_sort: &Sort, name: &str) -> Symbol {
        Symbol::new(name)
    }

    fn entails(hypotheses: &[&Hypothesis<Self>], goal: &Expr, verbose: bool) -> bool {
        let knowledge = Knowledge::from_hypotheses(hypotheses.iter().copied());
        let proved = knowledge.proves(goal);
        if verbose {
            tracing::debug!(
                %goal,
                proved,
                facts = knowledge.facts.len(),
                inconsistent = knowledge.inconsistent,
                "entailment check"
            );
        }
        proved
    }
}

/// Sign set allowed by a sort's refinement.
#[must_use]
pub const fn sort_signs(sort: Sort) -> SignSet {
    match sort.sign() {
        Sign::Any => SignSet::ANY,
        Sign::Positive => SignSet::POS,
        Sign::Nonnegative => SignSet::POS.union(SignSet::ZERO),
        Sign::Nonzero => SignSet::POS.union(SignSet::NEG),
    }
}

/// What a set of hypotheses says, indexed for entailment queries.
#[derive(Debug, Clone, Default)]
pub struct Knowledge {
    facts: IndexSet<Expr>,
    // Each entry `(c, s)` under key `e` records that `e - c` has a sign in `s`.
    offsets: IndexMap<Expr, Vec<(i64, SignSet)>>,
    inconsistent: bool,
}

impl Knowledge {
    /// Indexes variable sorts and facts.
    #[must_use]
    pub fn from_hypotheses<'a, I>(hypotheses: I) -> Self
    where
        I: IntoIterator<Item = &'a Hypothesis<Symbolic>>,
    {
        let mut knowledge = Self::default();
        for hypothesis in hypotheses {
            match hypothesis {
                Hypothesis::Variable { sort, var } => knowledge.declare(*sort, var),
                Hypothesis::Fact(fact) => knowledge.assume(fact),
            }
        }
        knowledge.check_consistency();
        knowledge
    }

    /// Returns `true` if the hypotheses contradict one another.
    #[must_use]
    pub const fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    fn declare(&mut self, sort: Sort, var: &Symbol) {
        if sort.domain() == Domain::Bool || sort.sign() == Sign::Any {
            return;
        }
        self.record(Expr::var(var), 0, sort_signs(sort));
    }

    fn assume(&mut self, fact: &Expr) {
        match fact.node() {
            Node::Bool(true) => {}
            Node::Bool(false) => self.inconsistent = true,
            Node::And(lhs, rhs) => {
                self.assume(lhs);
                self.assume(rhs);
            }
            Node::Not(inner) if inner.is_proposition() => self.assume(&inner.negation()),
            Node::Rel(op, lhs, rhs) => {
                self.facts.insert(fact.clone());
                self.record_relation(*op, lhs, rhs);
            }
            _ => {
                self.facts.insert(fact.clone());
            }
        }
    }

    fn record_relation(&mut self, op: RelOp, lhs: &Expr, rhs: &Expr) {
        match (lhs.evaluate(), rhs.evaluate()) {
            (Some(left), Some(right)) => {
                if !SignSet::of_difference(left, right).is_subset(op.signs()) {
                    self.inconsistent = true;
                }
            }
            (None, Some(bound)) => self.record(lhs.clone(), bound, op.signs()),
            (Some(bound), None) => self.record(rhs.clone(), bound, op.flipped().signs()),
            (None, None) => {
                self.record(lhs.clone() - rhs, 0, op.signs());
                self.record(rhs.clone() - lhs, 0, op.flipped().signs());
            }
        }
    }

    fn record(&mut self, term: Expr, offset: i64, signs: SignSet) {
        self.offsets.entry(term).or_default().push((offset, signs));
    }

    fn check_consistency(&mut self) {
        if self.inconsistent {
            return;
        }
        self.inconsistent = self
            .offsets
            .keys()
            .any(|term| self.sign_of(term).is_empty());
    }

    /// Returns `true` if `goal` follows.
    #[must_use]
    pub fn proves(&self, goal: &Expr) -> bool {
        if self.inconsistent {
            return true;
        }
        if let Some(value) = goal.decide() {
            return value;
        }
        if self.facts.contains(goal) {
            return true;
        }
        match goal.node() {
            Node::And(lhs, rhs) => self.proves(lhs) && self.proves(rhs),
            Node::Or(lhs, rhs) => self.proves(lhs) || self.proves(rhs),
            Node::Not(inner) if inner.is_proposition() => self.proves(&inner.negation()),
            Node::Rel(op, lhs, rhs) => self.difference_signs(lhs, rhs).is_subset(op.signs()),
            _ => false,
        }
    }

    /// Returns `true` if `goal` is refuted.
    #[must_use]
    pub fn refutes(&self, goal: &Expr) -> bool {
        goal.is_proposition() && self.proves(&goal.negation())
    }

    /// The signs `lhs - rhs` can take.
    #[must_use]
    pub fn difference_signs(&self, lhs: &Expr, rhs: &Expr) -> SignSet {
        if lhs == rhs {
            return SignSet::ZERO;
        }
        match (lhs.evaluate(), rhs.evaluate()) {
            (Some(left), Some(right)) => SignSet::of_difference(left, right),
            (None, Some(0)) => self.sign_of(lhs),
            (Some(0), None) => self.sign_of(rhs).negated(),
            (None, Some(bound)) => self.recorded(lhs, bound),
            (Some(bound), None) => self.recorded(rhs, bound).negated(),
            (None, None) => self.sign_of(&(lhs.clone() - rhs)),
        }
    }

    /// The signs `term` can take.
    #[must_use]
    pub fn sign_of(&self, term: &Expr) -> SignSet {
        if let Some(value) = term.evaluate() {
            return SignSet::of_int(value);
        }
        self.recorded(term, 0).intersect(self.structural(term))
    }

    fn recorded(&self, term: &Expr, offset: i64) -> SignSet {
        let Some(entries) = self.offsets.get(term) else {
            return SignSet::ANY;
        };
        entries
            .iter()
            .fold(SignSet::ANY, |acc, &(bound, signs)| {
                // sign(term - offset) = sign(term - bound) + sign(bound - offset)
                acc.intersect(add_signs(signs, SignSet::of_difference(bound, offset)))
            })
    }

    fn structural(&self, term: &Expr) -> SignSet {
        match term.node() {
            Node::Neg(inner) => self.sign_of(inner).negated(),
            Node::Add(lhs, rhs) => add_signs(self.sign_of(lhs), self.sign_of(rhs)),
            Node::Mul(lhs, rhs) => combine(self.sign_of(lhs), self.sign_of(rhs), mul_sign),
            Node::Max(lhs, rhs) => combine(self.sign_of(lhs), self.sign_of(rhs), max_sign),
            Node::Min(lhs, rhs) => combine(self.sign_of(lhs), self.sign_of(rhs), min_sign),
            _ => SignSet::ANY,
        }
    }
}

fn combine(lhs: SignSet, rhs: SignSet, table: fn(SignSet, SignSet) -> SignSet) -> SignSet {
    lhs.members()
        .flat_map(|left| rhs.members().map(move |right| table(left, right)))
        .fold(SignSet::EMPTY, SignSet::union)
}

/// Sign of a sum given the signs of its operands.
fn add_signs(lhs: SignSet, rhs: SignSet) -> SignSet {
    combine(lhs, rhs, |left, right| {
        if left == SignSet::ZERO {
            right
        } else if right == SignSet::ZERO || left == right {
            left
        } else {
            SignSet::ANY
        }
    })
}

fn mul_sign(lhs: SignSet, rhs: SignSet) -> SignSet {
    if lhs == SignSet::ZERO || rhs == SignSet::ZERO {
        SignSet::ZERO
    } else if lhs == rhs {
        SignSet::POS
    } else {
        SignSet::NEG
    }
}

const fn rank(sign: SignSet) -> u8 {
    if sign.is_subset(SignSet::NEG) {
        0
    } else if sign.is_subset(SignSet::ZERO) {
        1
    } else {
        2
    }
}

const fn max_sign(lhs: SignSet, rhs: SignSet) -> SignSet {
    if rank(lhs) >= rank(rhs) { lhs } else { rhs }
}

const fn min_sign(lhs: SignSet, rhs: SignSet) -> SignSet {
    if rank(lhs) <= rank(rhs) { lhs } else { rhs }
}

#[cfg(test)]
#[path = "entail_tests.rs"]
mod tests;
