//! A small symbolic algebra of numeric expressions and sign reasoning.
//!
//! [`Symbolic`] plugs this algebra into the proof engine. Goals and facts are
//! [`Expr`] propositions over [`Symbol`] variables, and variable sorts may
//! carry a sign refinement that entailment uses as implicit knowledge.

mod entail;
mod expr;
mod lemmas;
mod sort;
mod tactics;

pub use entail::{Knowledge, Symbolic, sort_signs};
pub use expr::{Expr, Node, RelOp, SignSet, Symbol};
pub use lemmas::{AddPos, LeTrans};
pub use sort::{Domain, Sign, Sort, UnknownSort};
pub use tactics::{Cases, SignRefinement, SimpAll, SplitGoal, Trivial, simplify};
