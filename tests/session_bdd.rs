//! Behavioural tests for proof sessions using `rstest-bdd`.

mod common;

use common::{load_config, session_with_reals, var};
use estimates::config::SessionConfig;
use estimates::proof::{Mode, Status};
use estimates::symbolic::{Cases, SignRefinement, SimpAll, SplitGoal, Trivial};
use rstest_bdd_macros::{given, scenario, then};

#[given("a real x that is either negative or positive")]
fn given_real_x_that_is_either_negative_or_positive() {}

#[then("cases followed by trivial on every goal completes the proof")]
fn then_cases_followed_by_trivial_completes_the_proof() {
    let mut session = session_with_reals(load_config("manual_finish.yaml"), &["x"]);
    session
        .assume(var("x").lt(0).or(var("x").gt(0)), "h")
        .expect("setup mode");
    session
        .begin_proof((var("x") * var("x")).gt(0))
        .expect("well-formed goal");
    assert_eq!(session.use_tactic(Cases::new("h")), Ok(Status::Remaining(2)));
    assert_eq!(session.all_goals_use(Trivial), Ok(Status::Complete));
}

#[given("reals x and y bounded below by positive constants")]
fn given_reals_bounded_below_by_positive_constants() {}

#[then("refining both signs completes the proof")]
fn then_refining_both_signs_completes_the_proof() {
    let mut session = session_with_reals(load_config("manual_finish.yaml"), &["x", "y"]);
    session.assume(var("x").gt(1), "hx").expect("setup mode");
    session.assume(var("y").ge(2), "hy").expect("setup mode");
    session
        .begin_proof((var("x") + var("y")).gt(0))
        .expect("well-formed goal");
    assert_eq!(
        session.use_tactic(SignRefinement::is_positive("x")),
        Ok(Status::Remaining(1))
    );
    assert_eq!(
        session.use_tactic(SignRefinement::is_positive("y")),
        Ok(Status::Complete)
    );
}

#[given("a split goal whose first half is closed by simp_all")]
fn given_split_goal_whose_first_half_is_closed() {}

#[then("undoing from the second half reopens the split goal")]
fn then_undoing_reopens_the_split_goal() {
    let mut session = session_with_reals(load_config("manual_finish.yaml"), &["x"]);
    session.assume(var("x").gt(4), "h").expect("setup mode");
    session
        .begin_proof(var("x").gt(1).and(var("x").ne_to(0)))
        .expect("well-formed goal");
    assert_eq!(session.use_tactic(SplitGoal), Ok(Status::Remaining(2)));
    assert_eq!(session.use_tactic(SimpAll), Ok(Status::Remaining(1)));

    assert_eq!(session.undo(), Ok("split".to_owned()));
    assert_eq!(session.status(), Ok(Status::Remaining(1)));
    assert_eq!(
        session.proof(),
        Ok("example (x : real) (h : x > 4): x > 1 ∧ x != 0 := by\n  sorry -- current goal".to_owned())
    );
}

#[given("a session that has not begun a proof")]
fn given_session_that_has_not_begun_a_proof() {}

#[then("applying a tactic names the setup mode")]
fn then_applying_a_tactic_names_the_setup_mode() {
    let mut session = session_with_reals(SessionConfig::default(), &["x"]);
    let message = session
        .use_tactic(Trivial)
        .err()
        .map(|error| error.to_string())
        .unwrap_or_default();
    assert_eq!(message, "cannot apply tactics in setup mode");
}

#[given("a session with auto-finish enabled")]
fn given_session_with_auto_finish_enabled() {}

#[then("completing the proof returns to setup mode")]
fn then_completing_the_proof_returns_to_setup_mode() {
    let mut session = session_with_reals(load_config("defaults.yaml"), &["x"]);
    session.assume(var("x").gt(0), "h").expect("setup mode");
    session.begin_proof(var("x").ge(0)).expect("well-formed goal");
    assert_eq!(session.use_tactic(Trivial), Ok(Status::Complete));
    assert_eq!(session.mode(), Mode::Setup);
    assert!(session.proof().is_err(), "nothing is parked after auto-finish");
}

#[scenario(
    path = "tests/features/proof_session.feature",
    name = "Case analysis proves a square positive"
)]
fn case_analysis_proves_a_square_positive() {}

#[scenario(
    path = "tests/features/proof_session.feature",
    name = "Sign refinement settles a sum"
)]
fn sign_refinement_settles_a_sum() {}

#[scenario(
    path = "tests/features/proof_session.feature",
    name = "Undo reopens the split goal"
)]
fn undo_reopens_the_split_goal() {}

#[scenario(
    path = "tests/features/proof_session.feature",
    name = "Tactic commands are refused in setup mode"
)]
fn tactic_commands_are_refused_in_setup_mode() {}

#[scenario(
    path = "tests/features/proof_session.feature",
    name = "Auto-finish leaves tactic mode"
)]
fn auto_finish_leaves_tactic_mode() {}
