//! The proof-tree engine and the interactive session that drives it.
//!
//! The engine is generic over a [`TermAlgebra`]: it stores terms, hands them
//! to tactics and asks the algebra to judge them, but never looks inside.

mod algebra;
mod assistant;
mod error;
mod hypothesis;
mod lemma;
mod render;
mod state;
mod tactic;
mod tree;

pub use algebra::TermAlgebra;
pub use assistant::{Focus, Mode, ProofAssistant, Status};
pub use error::{ProofError, TacticError};
pub use hypothesis::{Hypothesis, HypothesisKind};
pub use lemma::{Lemma, UseLemma};
pub use render::SORRY;
pub use state::ProofState;
pub use tactic::Tactic;
pub use tree::{Node, NodeId, Preorder, ProofTree, Sorries, SorryCounts, SorryNeighbors};
