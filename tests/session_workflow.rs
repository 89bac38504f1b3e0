//! End-to-end proof sessions over the symbolic algebra.
//!
//! Each test drives a session from setup through tactic mode and checks the
//! rendered proof script, expressed as Given/When/Then acceptance criteria.

mod common;

use common::{load_config, session_with_reals, var};
use estimates::config::SessionConfig;
use estimates::proof::{Mode, ProofError, Status};
use estimates::symbolic::{Cases, Expr, LeTrans, SignRefinement, SimpAll, Sort, SplitGoal, Trivial};
use rstest::rstest;

// ── Given a disjunctive hypothesis, case analysis closes the goal ───

#[rstest]
fn given_a_sign_dichotomy_when_split_into_cases_then_each_case_is_trivial() {
    let mut session = session_with_reals(load_config("manual_finish.yaml"), &["x"]);
    session
        .assume(var("x").lt(0).or(var("x").gt(0)), "h")
        .expect("setup mode");
    session
        .begin_proof((var("x") * var("x")).gt(0))
        .expect("well-formed goal");

    assert_eq!(session.use_tactic(Cases::new("h")), Ok(Status::Remaining(2)));
    assert_eq!(session.all_goals_use(Trivial), Ok(Status::Complete));
    assert_eq!(session.mode(), Mode::ActiveProof);
    assert_eq!(
        session.proof(),
        Ok([
            "example (x : real) (h : x < 0 ∨ x > 0): x * x > 0 := by",
            "  cases h",
            "  case 1 =>",
            "    trivial",
            "  case 2 =>",
            "    trivial",
        ]
        .join("\n"))
    );
}

// ── Given bounds on variables, sign refinement settles the goal ─────

#[rstest]
fn given_lower_bounds_when_signs_are_refined_then_the_sum_is_positive() {
    let mut session = session_with_reals(load_config("manual_finish.yaml"), &["x", "y"]);
    session.assume(var("x").gt(2), "h1").expect("setup mode");
    session.assume(var("y").ge(1), "h2").expect("setup mode");
    session
        .begin_proof((var("x") + var("y")).gt(0))
        .expect("well-formed goal");

    assert_eq!(
        session.use_tactic(SignRefinement::is_positive("x")),
        Ok(Status::Remaining(1))
    );
    assert_eq!(
        session.current_proof_state().map(|state| state.to_string()),
        Ok("x : pos_real\ny : real\nh1 : x > 2\nh2 : y >= 1\n|- x + y > 0".to_owned())
    );
    assert_eq!(
        session.use_tactic(SignRefinement::is_positive("y")),
        Ok(Status::Complete)
    );
    assert!(
        session
            .proof()
            .is_ok_and(|script| script.ends_with("  is_positive x\n  is_positive y"))
    );
}

// ── Given a chain of inequalities, a lemma bridges it ───────────────

#[rstest]
fn given_a_chain_of_inequalities_when_le_trans_is_used_then_trivial_finishes() {
    let mut session = session_with_reals(load_config("manual_finish.yaml"), &["a", "b", "c"]);
    session.assume(var("a").le(var("b")), "h1").expect("setup mode");
    session.assume(var("b").lt(var("c")), "h2").expect("setup mode");
    session
        .begin_proof(var("a").lt(var("c")))
        .expect("well-formed goal");

    assert!(session.test(&var("a").lt(var("c"))).is_ok_and(|proved| !proved));
    session
        .use_lemma(LeTrans::new(var("a"), var("c")), "hac")
        .expect("a middle term exists");
    assert_eq!(session.get_hypothesis("hac"), Ok(&var("a").lt(var("c"))));
    assert_eq!(session.use_tactic(Trivial), Ok(Status::Complete));
    assert!(
        session
            .proof()
            .is_ok_and(|script| script.ends_with("  have hac := le_trans (a) (c)\n  trivial"))
    );
}

// ── Given contradictory hypotheses, simp_all closes any goal ────────

#[rstest]
#[case::defaults("defaults.yaml", Mode::Setup)]
#[case::manual_finish("manual_finish.yaml", Mode::ActiveProof)]
fn given_contradictory_hypotheses_when_simplified_then_the_proof_completes(
    #[case] fixture: &str,
    #[case] final_mode: Mode,
) {
    let mut session = session_with_reals(load_config(fixture), &["x", "y"]);
    session.assume(var("x").gt(1), "h1").expect("setup mode");
    session.assume(var("x").lt(0), "h2").expect("setup mode");
    session.begin_proof(var("y").eq_to(3)).expect("well-formed goal");

    assert_eq!(session.use_tactic(SimpAll), Ok(Status::Complete));
    assert_eq!(session.mode(), final_mode);
}

// ── Given a true fact at the edge of the integers, nothing follows ──

#[rstest]
fn given_a_true_fact_with_extreme_constants_when_trivial_is_used_then_it_declines() {
    let mut session = session_with_reals(SessionConfig::default(), &["x"]);
    session
        .assume(Expr::int(i64::MAX).gt(-1), "h")
        .expect("setup mode");
    session.begin_proof(var("x").gt(0)).expect("well-formed goal");

    let err = session.use_tactic(Trivial).expect_err("x > 0 is unprovable");
    assert!(matches!(err, ProofError::TacticNotApplicable { .. }));
    assert_eq!(session.status(), Ok(Status::Remaining(1)));
}

// ── Given a split proof, navigation revisits any node ───────────────

#[rstest]
fn given_a_split_proof_when_revisiting_the_root_then_undo_discards_both_cases() {
    let mut session = session_with_reals(SessionConfig::default(), &["x"]);
    session.assume(var("x").gt(3), "h").expect("setup mode");
    session
        .begin_proof(var("x").gt(0).and(var("x").ne_to(2)))
        .expect("well-formed goal");
    session.use_tactic(SplitGoal).expect("goal is a conjunction");
    session.use_tactic(Trivial).expect("x > 3 gives x > 0");

    let root = session
        .proof_tree()
        .map(|tree| tree.root())
        .expect("a proof is active");
    let focus = session.set_current_node(root).expect("root is live");
    assert_eq!(focus.to_string(), "Moved to a proof state currently handled by \"split\".");

    session.go_forward(1).expect("first case exists");
    assert_eq!(session.undo(), Ok("split".to_owned()));
    assert_eq!(session.status(), Ok(Status::Remaining(1)));
    assert_eq!(session.current_node(), Some(root));
}

// ── Given a verbose session, entailment checks still answer ─────────

#[rstest]
fn given_a_verbose_session_when_testing_then_answers_are_unchanged() {
    let mut session = session_with_reals(load_config("verbose.yaml"), &[]);
    let n = session
        .var("nonneg_int".parse::<Sort>().expect("known sort"), "n")
        .expect("setup mode");
    assert_eq!(n.name(), "n");
    session.begin_proof(var("n").ge(0)).expect("well-formed goal");
    assert_eq!(session.test(&var("n").ge(0)), Ok(true));
    assert_eq!(session.test(&var("n").gt(0)), Ok(false));
}

// ── Given setup mode, tactic commands are refused ───────────────────

#[rstest]
fn given_setup_mode_when_navigating_then_the_mode_is_named() {
    let mut session = session_with_reals(SessionConfig::default(), &["x"]);
    let err = session.first_goal().expect_err("setup mode");
    assert_eq!(err.to_string(), "cannot move to the first goal in setup mode");
    assert!(matches!(err, ProofError::IllegalModeOperation { .. }));
}
