//! Shared test helpers for integration tests.

use estimates::ProofAssistant;
use estimates::config::{SessionConfig, load_session_config};
use estimates::symbolic::{Expr, Sort, Symbol, Symbolic};

/// Loads a fixture file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Loads a session configuration fixture.
///
/// # Panics
///
/// Panics if the fixture is missing or malformed.
pub fn load_config(name: &str) -> SessionConfig {
    load_session_config(&load_fixture(name))
        .unwrap_or_else(|e| panic!("fixture {name} should parse: {e}"))
}

/// The variable named `name` as an expression.
pub fn var(name: &str) -> Expr {
    Expr::var(&Symbol::new(name))
}

/// A setup-mode session with one real variable per name.
///
/// # Panics
///
/// Panics if a declaration is refused.
pub fn session_with_reals(config: SessionConfig, names: &[&str]) -> ProofAssistant<Symbolic> {
    let mut session = ProofAssistant::with_config(config);
    session
        .vars(&Sort::REAL, names)
        .unwrap_or_else(|e| panic!("declaring {names:?} should succeed: {e}"));
    session
}
