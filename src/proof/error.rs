//! Error types for proof sessions, proof trees and tactics.

use super::assistant::Mode;
use super::hypothesis::HypothesisKind;

/// Errors that can occur while building or navigating a proof.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProofError {
    /// The operation is not available in the session's current mode.
    #[error("cannot {operation} in {mode}")]
    IllegalModeOperation {
        /// The operation that was attempted.
        operation: &'static str,
        /// The mode the session was in.
        mode: Mode,
    },

    /// A term mentions a variable that has not been declared.
    #[error("{term} is not defined in terms of the current variables")]
    UndefinedVariable {
        /// Rendering of the offending term.
        term: String,
    },

    /// A term was used where a proposition is required.
    #[error("{term} is not a proposition")]
    NotAProposition {
        /// Rendering of the offending term.
        term: String,
    },

    /// No hypothesis (or variable) is registered under the name.
    #[error("hypothesis {name} not found")]
    NameNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The target name of a rename is already taken.
    #[error("hypothesis {name} already exists; choose a different name")]
    NameAlreadyUsed {
        /// The name that is already present.
        name: String,
    },

    /// A hypothesis was found but is of the other kind.
    #[error("hypothesis {name} is not a {expected}")]
    WrongHypothesisKind {
        /// The name that was looked up.
        name: String,
        /// The kind the caller asked for.
        expected: HypothesisKind,
    },

    /// The operation is not supported for this entry.
    #[error("cannot {operation} {name}: it is a variable declaration")]
    UnsupportedOperation {
        /// The operation that was attempted.
        operation: &'static str,
        /// The name of the entry.
        name: String,
    },

    /// The tactic declined the goal; the proof tree is unchanged.
    #[error("tactic \"{tactic}\" is not applicable: {reason}")]
    TacticNotApplicable {
        /// Rendering of the tactic.
        tactic: String,
        /// Why the tactic declined.
        reason: String,
    },

    /// A navigation command pointed outside the proof tree.
    #[error("{reason}")]
    NavigationOutOfRange {
        /// Human-readable description of the failed move.
        reason: String,
    },

    /// No proof tree exists in the session.
    #[error("no proof tree available")]
    NoProof,
}

/// Reason a tactic or lemma declined to act on a proof state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct TacticError {
    /// Human-readable reason.
    pub reason: String,
}

impl TacticError {
    /// Creates a tactic error from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<ProofError> for TacticError {
    fn from(error: ProofError) -> Self {
        Self::new(error.to_string())
    }
}
