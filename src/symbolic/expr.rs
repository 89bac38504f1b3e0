//! Symbolic expressions and propositions.
//!
//! An [`Expr`] is an immutable, reference-counted tree, so cloning one (and
//! hence cloning a proof state) shares structure instead of copying it.

use std::fmt;
use std::ops;
use std::rc::Rc;

use indexmap::IndexSet;

/// The name of a bound variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// Creates a symbol with the given name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Rc::from(name))
    }

    /// Returns the symbol's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signs a real value may take, as a set.
///
/// Relations are described by the signs they allow for `lhs - rhs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignSet(u8);

impl SignSet {
    /// No sign at all; a contradiction.
    pub const EMPTY: Self = Self(0);
    /// Strictly negative.
    pub const NEG: Self = Self(0b001);
    /// Exactly zero.
    pub const ZERO: Self = Self(0b010);
    /// Strictly positive.
    pub const POS: Self = Self(0b100);
    /// Any sign.
    pub const ANY: Self = Self(0b111);

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection of two sets.
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns `true` if every sign in `self` is in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Sign set of `-x` given the sign set of `x`.
    #[must_use]
    pub const fn negated(self) -> Self {
        let mut out = self.0 & Self::ZERO.0;
        if self.0 & Self::NEG.0 != 0 {
            out |= Self::POS.0;
        }
        if self.0 & Self::POS.0 != 0 {
            out |= Self::NEG.0;
        }
        Self(out)
    }

    /// Exact sign of an integer.
    #[must_use]
    pub const fn of_int(value: i64) -> Self {
        if value > 0 {
            Self::POS
        } else if value < 0 {
            Self::NEG
        } else {
            Self::ZERO
        }
    }

    /// Exact sign of `lhs - rhs`, without computing the difference.
    #[must_use]
    pub const fn of_difference(lhs: i64, rhs: i64) -> Self {
        if lhs > rhs {
            Self::POS
        } else if lhs < rhs {
            Self::NEG
        } else {
            Self::ZERO
        }
    }

    /// Iterates over the single-sign members, from negative to positive.
    pub fn members(self) -> impl Iterator<Item = Self> {
        [Self::NEG, Self::ZERO, Self::POS]
            .into_iter()
            .filter(move |sign| sign.is_subset(self))
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl RelOp {
    const ALL: [Self; 6] = [Self::Lt, Self::Le, Self::Gt, Self::Ge, Self::Eq, Self::Ne];

    /// The signs of `lhs - rhs` under which the relation holds.
    #[must_use]
    pub const fn signs(self) -> SignSet {
        match self {
            Self::Lt => SignSet::NEG,
            Self::Le => SignSet::NEG.union(SignSet::ZERO),
            Self::Gt => SignSet::POS,
            Self::Ge => SignSet::POS.union(SignSet::ZERO),
            Self::Eq => SignSet::ZERO,
            Self::Ne => SignSet::NEG.union(SignSet::POS),
        }
    }

    /// The relation whose sign set is exactly `signs`, if any.
    #[must_use]
    pub fn from_signs(signs: SignSet) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.signs() == signs)
    }

    /// The same relation with its sides swapped (`a < b` as `b > a`).
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Gt => Self::Lt,
            Self::Ge => Self::Le,
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
        }
    }

    /// The complementary relation (`a < b` as `a >= b`).
    #[must_use]
    pub const fn negated(self) -> Self {
        match self {
            Self::Lt => Self::Ge,
            Self::Le => Self::Gt,
            Self::Gt => Self::Le,
            Self::Ge => Self::Lt,
            Self::Eq => Self::Ne,
            Self::Ne => Self::Eq,
        }
    }

    /// Returns `true` for `<` and `>`.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Lt | Self::Gt)
    }

    const fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

/// The shape of an expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// Integer constant.
    Int(i64),
    /// Truth value.
    Bool(bool),
    /// Variable.
    Var(Symbol),
    /// Sum.
    Add(Expr, Expr),
    /// Product.
    Mul(Expr, Expr),
    /// Negation.
    Neg(Expr),
    /// Larger of two values.
    Max(Expr, Expr),
    /// Smaller of two values.
    Min(Expr, Expr),
    /// Comparison.
    Rel(RelOp, Expr, Expr),
    /// Conjunction.
    And(Expr, Expr),
    /// Disjunction.
    Or(Expr, Expr),
    /// Logical negation.
    Not(Expr),
}

/// An immutable symbolic expression.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Expr(Rc<Node>);

impl Expr {
    fn from_node(node: Node) -> Self {
        Self(Rc::new(node))
    }

    /// Returns the node at the root of the expression.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// An integer constant.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::from_node(Node::Int(value))
    }

    /// A truth value.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::from_node(Node::Bool(value))
    }

    /// The variable `symbol`.
    #[must_use]
    pub fn var(symbol: &Symbol) -> Self {
        Self::from_node(Node::Var(symbol.clone()))
    }

    /// `max(self, other)`.
    #[must_use]
    pub fn max(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::Max(self.clone(), other.into()))
    }

    /// `min(self, other)`.
    #[must_use]
    pub fn min(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::Min(self.clone(), other.into()))
    }

    /// `self op other`.
    #[must_use]
    pub fn rel(&self, op: RelOp, other: impl Into<Self>) -> Self {
        Self::from_node(Node::Rel(op, self.clone(), other.into()))
    }

    /// `self < other`.
    #[must_use]
    pub fn lt(&self, other: impl Into<Self>) -> Self {
        self.rel(RelOp::Lt, other)
    }

    /// `self <= other`.
    #[must_use]
    pub fn le(&self, other: impl Into<Self>) -> Self {
        self.rel(RelOp::Le, other)
    }

    /// `self > other`.
    #[must_use]
    pub fn gt(&self, other: impl Into<Self>) -> Self {
        self.rel(RelOp::Gt, other)
    }

    /// `self >= other`.
    #[must_use]
    pub fn ge(&self, other: impl Into<Self>) -> Self {
        self.rel(RelOp::Ge, other)
    }

    /// `self == other`.
    #[must_use]
    pub fn eq_to(&self, other: impl Into<Self>) -> Self {
        self.rel(RelOp::Eq, other)
    }

    /// `self != other`.
    #[must_use]
    pub fn ne_to(&self, other: impl Into<Self>) -> Self {
        self.rel(RelOp::Ne, other)
    }

    /// `self ∧ other`.
    #[must_use]
    pub fn and(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::And(self.clone(), other.into()))
    }

    /// `self ∨ other`.
    #[must_use]
    pub fn or(&self, other: impl Into<Self>) -> Self {
        Self::from_node(Node::Or(self.clone(), other.into()))
    }

    /// Returns `true` for boolean-valued expressions.
    #[must_use]
    pub fn is_proposition(&self) -> bool {
        matches!(
            self.node(),
            Node::Bool(_) | Node::Rel(..) | Node::And(..) | Node::Or(..) | Node::Not(_)
        )
    }

    /// Returns the integer value of a constant.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self.node() {
            Node::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the truth value of a boolean constant.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.node() {
            Node::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns `true` for the constant `true`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.as_bool() == Some(true)
    }

    /// Returns `true` for the constant `false`.
    #[must_use]
    pub fn is_false(&self) -> bool {
        self.as_bool() == Some(false)
    }

    /// Collects the variables mentioned, in first-occurrence order.
    #[must_use]
    pub fn free_vars(&self) -> IndexSet<Symbol> {
        let mut vars = IndexSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr.node() {
                Node::Int(_) | Node::Bool(_) => {}
                Node::Var(symbol) => {
                    vars.insert(symbol.clone());
                }
                Node::Neg(inner) | Node::Not(inner) => stack.push(inner),
                Node::Add(lhs, rhs)
                | Node::Mul(lhs, rhs)
                | Node::Max(lhs, rhs)
                | Node::Min(lhs, rhs)
                | Node::Rel(_, lhs, rhs)
                | Node::And(lhs, rhs)
                | Node::Or(lhs, rhs) => {
                    stack.push(rhs);
                    stack.push(lhs);
                }
            }
        }
        vars
    }

    /// Evaluates a closed integer expression; `None` on overflow or if a
    /// variable occurs.
    #[must_use]
    pub fn evaluate(&self) -> Option<i64> {
        match self.node() {
            Node::Int(value) => Some(*value),
            Node::Add(lhs, rhs) => lhs.evaluate()?.checked_add(rhs.evaluate()?),
            Node::Mul(lhs, rhs) => lhs.evaluate()?.checked_mul(rhs.evaluate()?),
            Node::Neg(inner) => inner.evaluate()?.checked_neg(),
            Node::Max(lhs, rhs) => Some(lhs.evaluate()?.max(rhs.evaluate()?)),
            Node::Min(lhs, rhs) => Some(lhs.evaluate()?.min(rhs.evaluate()?)),
            _ => None,
        }
    }

    /// Decides a closed proposition; `None` if it depends on a variable.
    #[must_use]
    pub fn decide(&self) -> Option<bool> {
        match self.node() {
            Node::Bool(value) => Some(*value),
            Node::Rel(op, lhs, rhs) => {
                let signs = SignSet::of_difference(lhs.evaluate()?, rhs.evaluate()?);
                Some(signs.is_subset(op.signs()))
            }
            Node::And(lhs, rhs) => Some(lhs.decide()? && rhs.decide()?),
            Node::Or(lhs, rhs) => Some(lhs.decide()? || rhs.decide()?),
            Node::Not(inner) => inner.decide().map(|value| !value),
            _ => None,
        }
    }

    /// The logical negation, pushed through connectives and relations.
    #[must_use]
    pub fn negation(&self) -> Self {
        match self.node() {
            Node::Bool(value) => Self::boolean(!value),
            Node::Rel(op, lhs, rhs) => lhs.rel(op.negated(), rhs.clone()),
            Node::Not(inner) => inner.clone(),
            Node::And(lhs, rhs) => lhs.negation().or(rhs.negation()),
            Node::Or(lhs, rhs) => lhs.negation().and(rhs.negation()),
            _ => Self::from_node(Node::Not(self.clone())),
        }
    }

    fn precedence(&self) -> u8 {
        match self.node() {
            Node::Or(..) => 1,
            Node::And(..) => 2,
            Node::Not(_) => 3,
            Node::Rel(..) => 4,
            Node::Add(..) => 5,
            Node::Mul(..) => 6,
            Node::Neg(_) => 7,
            Node::Int(_) | Node::Bool(_) | Node::Var(_) | Node::Max(..) | Node::Min(..) => 8,
        }
    }
}

impl From<&Symbol> for Expr {
    fn from(symbol: &Symbol) -> Self {
        Self::var(symbol)
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Self::from_node(Node::Var(symbol))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::int(i64::from(value))
    }
}

impl From<&Self> for Expr {
    fn from(expr: &Self) -> Self {
        expr.clone()
    }
}

impl<T: Into<Self>> ops::Add<T> for Expr {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        Self::from_node(Node::Add(self, rhs.into()))
    }
}

impl<T: Into<Self>> ops::Sub<T> for Expr {
    type Output = Self;

    fn sub(self, rhs: T) -> Self {
        let negated = Self::from_node(Node::Neg(rhs.into()));
        Self::from_node(Node::Add(self, negated))
    }
}

impl<T: Into<Self>> ops::Mul<T> for Expr {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::from_node(Node::Mul(self, rhs.into()))
    }
}

impl ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_node(Node::Neg(self))
    }
}

impl ops::Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_node(Node::Not(self))
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({self})")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = self.precedence();
        // Left operands need parentheses below our level, right operands at it.
        let left = |out: &mut fmt::Formatter<'_>, child: &Self| {
            if child.precedence() < level {
                write!(out, "({child})")
            } else {
                write!(out, "{child}")
            }
        };
        let right = |out: &mut fmt::Formatter<'_>, child: &Self| {
            if child.precedence() <= level {
                write!(out, "({child})")
            } else {
                write!(out, "{child}")
            }
        };
        let infix = |out: &mut fmt::Formatter<'_>, lhs: &Self, op: &str, rhs: &Self| {
            left(out, lhs)?;
            write!(out, " {op} ")?;
            right(out, rhs)
        };
        match self.node() {
            Node::Int(value) => write!(f, "{value}"),
            Node::Bool(value) => write!(f, "{}", if *value { "True" } else { "False" }),
            Node::Var(symbol) => write!(f, "{symbol}"),
            Node::Add(lhs, rhs) => match rhs.node() {
                Node::Neg(inner) => infix(f, lhs, "-", inner),
                _ => infix(f, lhs, "+", rhs),
            },
            Node::Mul(lhs, rhs) => infix(f, lhs, "*", rhs),
            Node::Neg(inner) => {
                f.write_str("-")?;
                right(f, inner)
            }
            Node::Max(lhs, rhs) => write!(f, "max({lhs}, {rhs})"),
            Node::Min(lhs, rhs) => write!(f, "min({lhs}, {rhs})"),
            Node::Rel(op, lhs, rhs) => infix(f, lhs, op.symbol(), rhs),
            Node::And(lhs, rhs) => infix(f, lhs, "∧", rhs),
            Node::Or(lhs, rhs) => infix(f, lhs, "∨", rhs),
            Node::Not(inner) if inner.precedence() < 8 => write!(f, "¬({inner})"),
            Node::Not(inner) => write!(f, "¬{inner}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn x() -> Expr {
        Expr::var(&Symbol::new("x"))
    }

    fn y() -> Expr {
        Expr::var(&Symbol::new("y"))
    }

    #[rstest]
    #[case::sum(x() + y() * 2, "x + y * 2")]
    #[case::grouped_product((x() + y()) * 2, "(x + y) * 2")]
    #[case::difference(x() - 1, "x - 1")]
    #[case::right_nested_sum(x() + (y() + 1), "x + (y + 1)")]
    #[case::relation(x().ge(0), "x >= 0")]
    #[case::conjunction(x().gt(0).and(y().lt(1)), "x > 0 ∧ y < 1")]
    #[case::mixed_connectives(x().gt(0).or(y().gt(0)).and(x().ne_to(1)), "(x > 0 ∨ y > 0) ∧ x != 1")]
    #[case::negated_relation(!x().eq_to(y()), "¬(x == y)")]
    #[case::max(x().max(y() + 1), "max(x, y + 1)")]
    fn display_parenthesises_by_precedence(#[case] expr: Expr, #[case] expected: &str) {
        assert_eq!(expr.to_string(), expected);
    }

    #[rstest]
    fn free_vars_are_listed_in_first_occurrence_order() {
        let expr = y().gt(x() * y() + 3);
        let names: Vec<String> = expr.free_vars().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["y", "x"]);
    }

    #[rstest]
    #[case(Expr::int(2).lt(3), Some(true))]
    #[case((Expr::int(2) * 3).eq_to(7), Some(false))]
    #[case(Expr::int(1).max(-4).ge(1), Some(true))]
    #[case(x().gt(0), None)]
    #[case(Expr::int(i64::MAX).lt(Expr::int(i64::MAX) + 1), None)]
    #[case::extreme_bounds(Expr::int(i64::MAX).gt(-1), Some(true))]
    #[case::extreme_bounds_reversed(Expr::int(i64::MIN).ge(i64::MAX), Some(false))]
    fn closed_propositions_are_decided(#[case] expr: Expr, #[case] expected: Option<bool>) {
        assert_eq!(expr.decide(), expected);
    }

    #[rstest]
    fn negation_is_pushed_through_connectives() {
        let expr = x().lt(1).and(y().eq_to(2));
        assert_eq!(expr.negation(), x().ge(1).or(y().ne_to(2)));
    }

    #[rstest]
    #[case(RelOp::Lt)]
    #[case(RelOp::Le)]
    #[case(RelOp::Ne)]
    fn relations_are_recovered_from_their_sign_sets(#[case] op: RelOp) {
        assert_eq!(RelOp::from_signs(op.signs()), Some(op));
    }

    #[rstest]
    fn sign_set_negation_swaps_strict_signs() {
        let nonneg = SignSet::POS.union(SignSet::ZERO);
        assert_eq!(nonneg.negated(), SignSet::NEG.union(SignSet::ZERO));
    }

    #[rstest]
    fn propositions_are_recognised() {
        assert!(x().gt(0).is_proposition());
        assert!(Expr::boolean(true).is_proposition());
        assert!(!(x() + 1).is_proposition());
    }
}
