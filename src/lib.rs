//! `estimates`: an interactive, tactic-driven proof assistant.
//!
//! A session starts in setup mode, where variables and assumptions are
//! declared. [`ProofAssistant::begin_proof`] then switches to tactic mode,
//! where tactics split the goal into sub-goals tracked in a proof tree
//! until no open goal (`sorry`) remains.
//!
//! The proof engine in [`proof`] is generic over a [`proof::TermAlgebra`].
//! [`symbolic`] supplies one, with sign-aware entailment and a handful of
//! tactics and lemmas.
//!
//!     use estimates::ProofAssistant;
//!     use estimates::symbolic::{Expr, SignRefinement, Sort, Symbolic};
//!
//!     let mut session = ProofAssistant::<Symbolic>::new();
//!     let n = session.var(Sort::REAL, "n").unwrap();
//!     session.assume(Expr::var(&n).gt(0), "h").unwrap();
//!     session.begin_proof(Expr::var(&n).ge(0)).unwrap();
//!     let status = session.use_tactic(SignRefinement::is_positive("n")).unwrap();
//!     assert!(status.is_complete());

/// Session settings loaded from YAML.
pub mod config;
/// The generic proof-tree engine and interactive session.
pub mod proof;
/// A sign-aware symbolic algebra for the engine.
pub mod symbolic;

pub use config::{ConfigError, SessionConfig, load_session_config};
pub use proof::{ProofAssistant, ProofError, TacticError};
