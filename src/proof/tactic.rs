//! The tactic contract.

use std::fmt;

use super::algebra::TermAlgebra;
use super::error::TacticError;
use super::state::ProofState;

/// A named step that turns one obligation into zero or more successors.
///
/// Tactics are stateless: applying the same tactic to the same state twice
/// yields the same result. A tactic that cannot make progress must return
/// `Err`; the proof tree takes an `Ok` at face value, even when a successor
/// is identical to the input. An empty `Ok` list closes the goal.
///
/// The [`fmt::Display`] rendering is what appears in the proof script.
pub trait Tactic<A: TermAlgebra>: fmt::Display {
    /// Applies the tactic to `state`.
    ///
    /// # Errors
    ///
    /// Returns [`TacticError`] when the tactic does not apply to `state`.
    fn apply(&self, state: &ProofState<A>) -> Result<Vec<ProofState<A>>, TacticError>;
}
