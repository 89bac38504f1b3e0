//! Integration tests for loading session settings from YAML fixtures.

mod common;

use common::{load_config, load_fixture, session_with_reals, var};
use estimates::config::{SessionConfig, load_session_config};
use estimates::proof::{Mode, Status};
use estimates::symbolic::Trivial;
use rstest::rstest;

#[rstest]
#[case::empty_mapping("defaults.yaml", SessionConfig::default())]
#[case::manual_finish("manual_finish.yaml", SessionConfig::default().with_auto_finish(false))]
#[case::verbose("verbose.yaml", SessionConfig::default().with_verbose(true))]
fn given_a_valid_config_when_loaded_then_absent_keys_default(
    #[case] fixture: &str,
    #[case] expected: SessionConfig,
) {
    assert_eq!(load_config(fixture), expected);
}

#[rstest]
#[case::misspelt_key("invalid_unknown_key.yaml")]
#[case::wrong_scalar_type("invalid_type.yaml")]
fn given_an_invalid_config_when_loaded_then_error_is_actionable(#[case] fixture: &str) {
    let yaml = load_fixture(fixture);
    let result = load_session_config(&yaml);
    assert!(result.is_err(), "expected {fixture} to be rejected");
    let msg = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(
        msg.contains("YAML deserialization failed"),
        "error for {fixture} should name the failing stage, got: {msg}"
    );
}

#[rstest]
#[case::auto_finish("defaults.yaml", Mode::Setup)]
#[case::manual_finish("manual_finish.yaml", Mode::ActiveProof)]
fn given_a_loaded_config_when_a_proof_completes_then_auto_finish_decides_the_mode(
    #[case] fixture: &str,
    #[case] expected: Mode,
) {
    let config = load_config(fixture);
    let mut session = session_with_reals(config, &["x"]);
    assert_eq!(session.config(), config);
    session.assume(var("x").gt(1), "h").expect("setup mode");
    session.begin_proof(var("x").gt(0)).expect("well-formed goal");
    assert_eq!(session.use_tactic(Trivial), Ok(Status::Complete));
    assert_eq!(session.mode(), expected);
}
