//! Unit tests for the interactive proof session.

use rstest::*;

use super::*;
use crate::symbolic::{AddPos, Expr, SimpAll, SplitGoal, Sort, Symbol, Symbolic, Trivial};

type Assistant = ProofAssistant<Symbolic>;

fn var(name: &str) -> Expr {
    Expr::var(&Symbol::new(name))
}

/// `n : real`, `h : n > 0`, still in setup mode.
#[fixture]
fn staged() -> Assistant {
    let mut session = Assistant::new();
    session.var(Sort::REAL, "n").expect("setup mode");
    session.assume(var("n").gt(0), "h").expect("setup mode");
    session
}

/// `x : real`, `h : x > 1` proving `x > 0 ∧ x != 5`, already split.
#[fixture]
fn split() -> Assistant {
    let mut session = Assistant::new();
    session.var(Sort::REAL, "x").expect("setup mode");
    session.assume(var("x").gt(1), "h").expect("setup mode");
    session
        .begin_proof(var("x").gt(0).and(var("x").ne_to(5)))
        .expect("well-formed goal");
    session.use_tactic(SplitGoal).expect("goal is a conjunction");
    session
}

#[rstest]
fn begin_proof_freezes_the_staged_hypotheses(mut staged: Assistant) {
    staged.begin_proof(var("n").ge(0)).expect("well-formed goal");
    assert_eq!(staged.mode(), Mode::ActiveProof);
    assert_eq!(staged.current_goal(), Ok(&var("n").ge(0)));
    assert_eq!(staged.get_hypothesis("h"), Ok(&var("n").gt(0)));
    assert_eq!(staged.test(&var("n").ge(0)), Ok(true));
    assert_eq!(
        staged.proof(),
        Ok("example (n : real) (h : n > 0): n >= 0 := by\n  sorry -- current goal".to_owned())
    );
    assert_eq!(staged.status(), Ok(Status::Remaining(1)));
}

#[rstest]
fn setup_operations_are_refused_in_tactic_mode(mut staged: Assistant) {
    staged.begin_proof(var("n").ge(0)).expect("well-formed goal");
    assert_eq!(
        staged.assume(var("n").lt(3), "k"),
        Err(ProofError::IllegalModeOperation {
            operation: "add hypotheses",
            mode: Mode::ActiveProof,
        })
    );
    assert_eq!(
        staged.var(Sort::INT, "m").err(),
        Some(ProofError::IllegalModeOperation {
            operation: "introduce variables",
            mode: Mode::ActiveProof,
        })
    );
    assert!(staged.begin_proof(var("n").gt(0)).is_err());
}

#[rstest]
fn tactic_operations_are_refused_in_setup_mode(mut staged: Assistant) {
    assert_eq!(
        staged.use_tactic(Trivial),
        Err(ProofError::IllegalModeOperation {
            operation: "apply tactics",
            mode: Mode::Setup,
        })
    );
    assert!(staged.next_goal().is_err());
    assert!(staged.undo().is_err());
    assert!(staged.current_proof_state().is_err());
    assert_eq!(staged.exit_proof(), Err(illegal("exit a proof", Mode::Setup)));
    assert_eq!(staged.enter_proof(), Err(ProofError::NoProof));
}

#[rstest]
fn assumptions_must_be_scoped_propositions(mut staged: Assistant) {
    assert_eq!(
        staged.assume(var("n") + 1, "bad"),
        Err(ProofError::NotAProposition {
            term: "n + 1".to_owned(),
        })
    );
    assert_eq!(
        staged.assume(var("m").gt(0), "bad"),
        Err(ProofError::UndefinedVariable {
            term: "m > 0".to_owned(),
        })
    );
    assert_eq!(
        staged.begin_proof(var("m").gt(0)),
        Err(ProofError::UndefinedVariable {
            term: "m > 0".to_owned(),
        })
    );
    assert_eq!(staged.mode(), Mode::Setup);
}

#[rstest]
fn taken_names_are_primed(mut staged: Assistant) {
    let second = staged.var(Sort::REAL, "n").expect("setup mode");
    assert_eq!(second, Symbol::new("n'"));
    assert_eq!(staged.assume(var("n'").gt(0), "h"), Ok("h'".to_owned()));
    let names: Vec<String> = staged.get_all_vars().iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["n", "n'"]);
    assert_eq!(
        staged.get_vars(&["n", "n'"]),
        Ok(vec![Symbol::new("n"), Symbol::new("n'")])
    );
}

#[rstest]
fn clear_hypotheses_empties_the_staging_area(mut staged: Assistant) {
    staged.clear_hypotheses().expect("setup mode");
    assert!(staged.current_hypotheses().expect("setup mode").is_empty());
    assert_eq!(staged.to_string(), "Proof Assistant is in setup mode.  No hypotheses.");
}

#[rstest]
fn declined_tactic_changes_nothing(mut staged: Assistant) {
    staged.begin_proof(var("n").gt(1)).expect("well-formed goal");
    let script = staged.proof().expect("active proof");
    let cursor = staged.current_node();
    let result = staged.use_tactic(Trivial);
    assert!(matches!(
        result,
        Err(ProofError::TacticNotApplicable { ref tactic, .. }) if tactic == "trivial"
    ));
    assert_eq!(staged.proof(), Ok(script));
    assert_eq!(staged.current_node(), cursor);
    assert_eq!(staged.mode(), Mode::ActiveProof);
}

#[rstest]
fn splitting_moves_the_cursor_to_the_first_case(split: Assistant) {
    assert_eq!(split.status(), Ok(Status::Remaining(2)));
    assert_eq!(split.current_goal(), Ok(&var("x").gt(0)));
    assert_eq!(
        split.proof(),
        Ok([
            "example (x : real) (h : x > 1): x > 0 ∧ x != 5 := by",
            "  split",
            "  case 1 =>",
            "    sorry -- current goal",
            "  case 2 =>",
            "    sorry",
        ]
        .join("\n"))
    );
    assert_eq!(
        split.to_string(),
        "Proof Assistant is in tactic mode.  Current proof state:\n\
         x : real\nh : x > 1\n|- x > 0\nThis is goal 1 of 2."
    );
}

#[rstest]
fn goal_navigation_walks_open_goals_in_order(mut split: Assistant) {
    assert_eq!(split.first_goal(), Ok(Some(Focus::Goal { index: 1, total: 2 })));
    assert_eq!(split.next_goal(), Ok(Some(Focus::Goal { index: 2, total: 2 })));
    assert_eq!(split.current_goal(), Ok(&var("x").ne_to(5)));
    assert_eq!(split.next_goal(), Ok(None));
    assert_eq!(split.previous_goal(), Ok(Some(Focus::Goal { index: 1, total: 2 })));
    assert_eq!(split.previous_goal(), Ok(None));
    assert_eq!(split.last_goal(), Ok(Some(Focus::Goal { index: 2, total: 2 })));
}

#[rstest]
fn stepping_back_and_forward_between_cases(mut split: Assistant) {
    assert_eq!(
        split.go_back(),
        Ok(Focus::Solved {
            tactic: "split".to_owned(),
        })
    );
    assert_eq!(
        split.go_back(),
        Err(out_of_range("already at the start of the proof"))
    );
    assert_eq!(
        split.go_forward(3),
        Err(out_of_range("case 3 requested but this step has 2"))
    );
    assert_eq!(split.go_forward(2), Ok(Focus::Goal { index: 2, total: 2 }));
    assert_eq!(
        split.go_forward(1),
        Err(out_of_range("no further steps in this branch of the proof"))
    );
}

#[rstest]
fn solving_a_case_moves_on_to_the_next(mut split: Assistant) {
    assert_eq!(split.use_tactic(Trivial), Ok(Status::Remaining(1)));
    assert_eq!(split.current_goal(), Ok(&var("x").ne_to(5)));
    assert_eq!(split.mode(), Mode::ActiveProof);
}

#[rstest]
fn undo_reopens_the_parent(mut split: Assistant) {
    assert_eq!(split.undo(), Ok("split".to_owned()));
    assert_eq!(split.current_node(), split.proof_tree().map(ProofTree::root));
    assert_eq!(split.status(), Ok(Status::Remaining(1)));
    assert_eq!(split.undo(), Err(out_of_range("no tactic to undo")));
}

#[rstest]
fn all_goals_use_applies_where_it_can(mut split: Assistant) {
    assert_eq!(split.all_goals_use(Trivial), Ok(Status::Remaining(1)));
    assert_eq!(split.current_goal(), Ok(&var("x").ne_to(5)));
    assert!(matches!(
        split.all_goals_use(Trivial),
        Err(ProofError::TacticNotApplicable { .. })
    ));
    assert_eq!(split.status(), Ok(Status::Remaining(1)));
}

#[rstest]
fn last_goal_closed_leaves_tactic_mode_by_default(mut staged: Assistant) {
    staged.begin_proof(var("n").ge(0)).expect("well-formed goal");
    assert_eq!(staged.use_tactic(Trivial), Ok(Status::Complete));
    assert_eq!(staged.mode(), Mode::Setup);
    assert!(staged.proof_tree().is_none());
    assert_eq!(staged.status(), Err(ProofError::NoProof));
}

#[rstest]
fn without_auto_finish_the_solved_root_stays_current(mut staged: Assistant) {
    staged.set_auto_finish(false);
    staged.begin_proof(var("n").ge(0)).expect("well-formed goal");
    assert_eq!(staged.use_tactic(Trivial), Ok(Status::Complete));
    assert_eq!(staged.mode(), Mode::ActiveProof);
    assert_eq!(staged.current_node(), staged.proof_tree().map(ProofTree::root));
    assert_eq!(
        staged.proof(),
        Ok("example (n : real) (h : n > 0): n >= 0 := by\n  trivial".to_owned())
    );
    assert!(staged.to_string().ends_with("This goal was solved with \"trivial\"."));
}

#[rstest]
fn exit_parks_the_tree_and_enter_resumes_at_the_root(mut split: Assistant) {
    split.next_goal().expect("tactic mode");
    split.exit_proof().expect("tactic mode");
    assert_eq!(split.mode(), Mode::Setup);
    assert_eq!(split.status(), Ok(Status::Remaining(2)));
    assert!(split.proof().is_ok_and(|script| !script.contains("current goal")));

    split.enter_proof().expect("a tree is parked");
    assert_eq!(split.mode(), Mode::ActiveProof);
    assert_eq!(split.current_node(), split.proof_tree().map(ProofTree::root));
    assert_eq!(
        split.enter_proof(),
        Err(illegal("enter a proof", Mode::ActiveProof))
    );
}

#[rstest]
fn abandon_discards_everything(mut split: Assistant) {
    split.abandon_proof().expect("tactic mode");
    assert_eq!(split.mode(), Mode::Setup);
    assert!(split.proof_tree().is_none());
    assert!(split.current_hypotheses().expect("setup mode").is_empty());
}

#[rstest]
fn navigation_errors_read_as_fragments(mut split: Assistant) {
    split.go_back().expect("the split node is the parent");
    let failures = [
        split.go_back().err(),
        split.go_forward(0).err(),
        split.undo().err(),
    ];
    for failure in failures {
        let message = failure.map(|error| error.to_string()).unwrap_or_default();
        assert!(
            message.starts_with(char::is_lowercase) && !message.ends_with('.'),
            "expected a lower-case fragment, got: {message}"
        );
    }
}

#[rstest]
fn set_current_node_rejects_discarded_nodes(mut split: Assistant) {
    let stale = split.current_node().expect("tactic mode");
    split.undo().expect("undo the split");
    assert_eq!(
        split.set_current_node(stale),
        Err(out_of_range(&format!(
            "node {stale} is not part of the proof tree"
        )))
    );
}

#[rstest]
fn lemmas_add_named_facts(mut staged: Assistant) {
    let positive: Sort = "pos_real".parse().expect("known sort");
    staged.var(positive, "m").expect("setup mode");
    staged
        .begin_proof((var("n") + var("m")).gt(var("n")))
        .expect("well-formed goal");
    staged.use_lemma(AddPos::new(var("n"), var("m")), "sum").expect("premises hold");
    assert_eq!(staged.get_hypothesis("sum"), Ok(&(var("n") + var("m")).gt(0)));
}

#[rstest]
fn list_goals_numbers_every_open_goal(split: Assistant) {
    let listing = split.list_goals().expect("a proof exists");
    assert!(listing.starts_with("Goal 1 of 2:\nx : real\nh : x > 1\n|- x > 0"));
    assert!(listing.contains("Goal 2 of 2:"));
}

#[rstest]
fn simp_all_without_progress_is_declined(mut staged: Assistant) {
    staged.begin_proof(var("n").lt(4)).expect("well-formed goal");
    assert!(matches!(
        staged.use_tactic(SimpAll),
        Err(ProofError::TacticNotApplicable { ref reason, .. }) if reason == "simp_all made no progress"
    ));
}
