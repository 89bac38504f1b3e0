//! The interactive proof session.
//!
//! A [`ProofAssistant`] is always in one of two modes:
//!
//! - **Setup**: variables and facts are accumulated as running assumptions.
//! - **Active proof**: the assumptions have been frozen into the root of a
//!   proof tree and a cursor selects the obligation the next tactic acts on.
//!
//! The tree and cursor only exist inside the active variant of the session,
//! so an active session without a cursor cannot be represented. Leaving a
//! proof with [`ProofAssistant::exit_proof`] parks the tree in setup mode so
//! that [`ProofAssistant::enter_proof`] can resume it.

use std::fmt;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use super::algebra::TermAlgebra;
use super::error::ProofError;
use super::hypothesis::Hypothesis;
use super::lemma::{Lemma, UseLemma};
use super::state::{ProofState, declared_vars, fresh_name, lookup_fact, lookup_var};
use super::tactic::Tactic;
use super::tree::{Node, NodeId, ProofTree};
use crate::config::SessionConfig;

/// The two modes of a proof session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Accumulating variables and assumptions.
    Setup,
    /// Applying tactics to a proof tree.
    ActiveProof,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup mode",
            Self::ActiveProof => "tactic mode",
        })
    }
}

/// Number of open goals left after a tactic application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No open goals remain.
    Complete,
    /// This many goals remain open.
    Remaining(usize),
}

impl Status {
    fn of<A: TermAlgebra>(tree: &ProofTree<A>) -> Self {
        match tree.num_sorries() {
            0 => Self::Complete,
            n => Self::Remaining(n),
        }
    }

    /// Returns `true` once no goals remain.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Returns the number of open goals.
    #[must_use]
    pub const fn remaining(self) -> usize {
        match self {
            Self::Complete => 0,
            Self::Remaining(n) => n,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => f.write_str("Proof complete!"),
            Self::Remaining(1) => f.write_str("1 goal remaining."),
            Self::Remaining(n) => write!(f, "{n} goals remaining."),
        }
    }
}

/// Where the cursor landed after a navigation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// An open goal, numbered by pre-order position (1-indexed).
    Goal {
        /// Position among the open goals.
        index: usize,
        /// Total number of open goals.
        total: usize,
    },
    /// A node already discharged by a tactic.
    Solved {
        /// Rendering of the tactic governing the node.
        tactic: String,
    },
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Goal { index, total } => write!(f, "Moved to goal {index} of {total}."),
            Self::Solved { tactic } => {
                write!(f, "Moved to a proof state currently handled by \"{tactic}\".")
            }
        }
    }
}

/// A proof tree together with the theorem it proves.
#[derive(Debug)]
struct Proof<A: TermAlgebra> {
    theorem: String,
    tree: ProofTree<A>,
}

#[derive(Debug)]
enum Session<A: TermAlgebra> {
    Setup { parked: Option<Proof<A>> },
    Active { proof: Proof<A>, cursor: NodeId },
}

/// A tactic-mode proof session over the term algebra `A`.
#[derive(Debug)]
pub struct ProofAssistant<A: TermAlgebra> {
    session: Session<A>,
    staging: IndexMap<String, Hypothesis<A>>,
    config: SessionConfig,
}

impl<A: TermAlgebra> Default for ProofAssistant<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: TermAlgebra> ProofAssistant<A> {
    /// Creates a session in setup mode with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates a session in setup mode with the given settings.
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            session: Session::Setup { parked: None },
            staging: IndexMap::new(),
            config,
        }
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self.session {
            Session::Setup { .. } => Mode::Setup,
            Session::Active { .. } => Mode::ActiveProof,
        }
    }

    /// Returns the session settings.
    #[must_use]
    pub const fn config(&self) -> SessionConfig {
        self.config
    }

    /// Chooses whether to leave tactic mode once the last goal is closed.
    pub fn set_auto_finish(&mut self, enabled: bool) {
        self.config.auto_finish = enabled;
        if enabled {
            info!("Proof assistant will automatically exit tactic mode when the proof is complete.");
        } else {
            info!("Proof assistant will stay in tactic mode even when the proof is complete.");
        }
    }

    // ── Setup mode ──────────────────────────────────────────────────

    /// Declares a variable of `sort`, priming `name` if it is taken.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] outside setup mode.
    pub fn var(&mut self, sort: A::Sort, name: &str) -> Result<A::Var, ProofError> {
        self.require_setup("introduce variables")?;
        let fresh = fresh_name(&self.staging, name);
        let var = A::declare(&sort, &fresh);
        self.staging.insert(
            fresh,
            Hypothesis::Variable {
                sort,
                var: var.clone(),
            },
        );
        Ok(var)
    }

    /// Declares several variables of the same sort.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] outside setup mode.
    pub fn vars(&mut self, sort: &A::Sort, names: &[&str]) -> Result<Vec<A::Var>, ProofError> {
        self.require_setup("introduce variables")?;
        names
            .iter()
            .map(|name| self.var(sort.clone(), name))
            .collect()
    }

    /// Adds an assumption and returns the name it was stored under.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] outside setup mode,
    /// [`ProofError::NotAProposition`] if `assumption` is not boolean-valued
    /// and [`ProofError::UndefinedVariable`] if it mentions an undeclared
    /// variable.
    pub fn assume(&mut self, assumption: A::Term, name: &str) -> Result<String, ProofError> {
        self.require_setup("add hypotheses")?;
        validate_proposition::<A>(&assumption, &declared_vars(&self.staging))?;
        let fresh = fresh_name(&self.staging, name);
        self.staging
            .insert(fresh.clone(), Hypothesis::Fact(assumption));
        Ok(fresh)
    }

    /// Forgets every staged variable and assumption.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] outside setup mode.
    pub fn clear_hypotheses(&mut self) -> Result<(), ProofError> {
        self.require_setup("clear hypotheses")?;
        self.staging.clear();
        Ok(())
    }

    /// Returns the staged hypotheses (setup) or those of the current state.
    ///
    /// # Errors
    ///
    /// Never fails in setup mode; see [`ProofAssistant::current_proof_state`].
    pub fn current_hypotheses(&self) -> Result<&IndexMap<String, Hypothesis<A>>, ProofError> {
        match &self.session {
            Session::Setup { .. } => Ok(&self.staging),
            Session::Active { .. } => Ok(self.current_proof_state()?.hypotheses()),
        }
    }

    /// Looks up a fact among the staged assumptions or the current state.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NameNotFound`] or
    /// [`ProofError::WrongHypothesisKind`].
    pub fn get_hypothesis(&self, name: &str) -> Result<&A::Term, ProofError> {
        lookup_fact(self.current_hypotheses()?, name)
    }

    /// Looks up a variable among the staged assumptions or the current state.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NameNotFound`] or
    /// [`ProofError::WrongHypothesisKind`].
    pub fn get_var(&self, name: &str) -> Result<&A::Var, ProofError> {
        lookup_var(self.current_hypotheses()?, name)
    }

    /// Looks up several variables by name.
    ///
    /// # Errors
    ///
    /// Fails on the first name [`ProofAssistant::get_var`] rejects.
    pub fn get_vars(&self, names: &[&str]) -> Result<Vec<A::Var>, ProofError> {
        names
            .iter()
            .map(|name| self.get_var(name).cloned())
            .collect()
    }

    /// Returns every variable in scope, in declaration order.
    #[must_use]
    pub fn get_all_vars(&self) -> IndexSet<A::Var> {
        self.current_hypotheses()
            .map(declared_vars)
            .unwrap_or_default()
    }

    // ── Mode transitions ────────────────────────────────────────────

    /// Freezes the staged assumptions into a new proof of `goal`.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] outside setup mode,
    /// [`ProofError::NotAProposition`] or [`ProofError::UndefinedVariable`]
    /// if `goal` is not a well-formed proposition over the staged variables.
    pub fn begin_proof(&mut self, goal: A::Term) -> Result<(), ProofError> {
        self.require_setup("begin a proof")?;
        validate_proposition::<A>(&goal, &declared_vars(&self.staging))?;
        let hypotheses = std::mem::take(&mut self.staging);
        let theorem = theorem_header::<A>(&hypotheses, &goal);
        let tree = ProofTree::new(ProofState::new(goal, hypotheses));
        let cursor = tree.root();
        info!("Starting proof.  Current proof state:\n{}", root_state(&tree));
        self.session = Session::Active {
            proof: Proof { theorem, tree },
            cursor,
        };
        Ok(())
    }

    /// Discards the proof in progress and clears staged assumptions.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn abandon_proof(&mut self) -> Result<(), ProofError> {
        self.require_active("abandon a proof")?;
        self.session = Session::Setup { parked: None };
        self.staging.clear();
        info!("Abandoned proof.");
        Ok(())
    }

    /// Leaves tactic mode, keeping the proof tree for later.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn exit_proof(&mut self) -> Result<(), ProofError> {
        match std::mem::replace(&mut self.session, Session::Setup { parked: None }) {
            Session::Active { proof, .. } => {
                self.session = Session::Setup {
                    parked: Some(proof),
                };
                info!("Exiting tactic mode.");
                Ok(())
            }
            setup @ Session::Setup { .. } => {
                self.session = setup;
                Err(illegal("exit a proof", Mode::Setup))
            }
        }
    }

    /// Re-enters tactic mode at the root of the kept proof tree.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in tactic mode and
    /// [`ProofError::NoProof`] if there is no tree to resume.
    pub fn enter_proof(&mut self) -> Result<(), ProofError> {
        let proof = match &mut self.session {
            Session::Setup { parked } => parked.take().ok_or(ProofError::NoProof)?,
            Session::Active { .. } => return Err(illegal("enter a proof", Mode::ActiveProof)),
        };
        let cursor = proof.tree.root();
        info!("Re-entering tactic mode.  Current proof state:\n{}", root_state(&proof.tree));
        self.session = Session::Active { proof, cursor };
        Ok(())
    }

    // ── Inspection ──────────────────────────────────────────────────

    /// Returns the proof tree, whether active or parked.
    #[must_use]
    pub const fn proof_tree(&self) -> Option<&ProofTree<A>> {
        match &self.session {
            Session::Active { proof, .. }
            | Session::Setup {
                parked: Some(proof),
            } => Some(&proof.tree),
            Session::Setup { parked: None } => None,
        }
    }

    /// Returns the cursor; `None` outside tactic mode.
    #[must_use]
    pub const fn current_node(&self) -> Option<NodeId> {
        match self.session {
            Session::Active { cursor, .. } => Some(cursor),
            Session::Setup { .. } => None,
        }
    }

    /// Returns the obligation under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn current_proof_state(&self) -> Result<&ProofState<A>, ProofError> {
        let (proof, cursor) = self.active("get the proof state")?;
        proof.tree.proof_state(cursor)
    }

    /// Returns the goal under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn current_goal(&self) -> Result<&A::Term, ProofError> {
        self.current_proof_state().map(ProofState::goal)
    }

    /// Checks whether `goal` follows from the current hypotheses.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn test(&self, goal: &A::Term) -> Result<bool, ProofError> {
        Ok(self.current_proof_state()?.test(goal, self.config.verbose))
    }

    /// Counts the open goals of the proof tree.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NoProof`] if there is no proof tree.
    pub fn status(&self) -> Result<Status, ProofError> {
        self.proof_tree().map(Status::of).ok_or(ProofError::NoProof)
    }

    /// Renders the proof as `<theorem> := by` followed by the script.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NoProof`] if there is no proof tree.
    pub fn proof(&self) -> Result<String, ProofError> {
        let (proof, cursor) = match &self.session {
            Session::Active { proof, cursor } => (proof, Some(*cursor)),
            Session::Setup {
                parked: Some(proof),
            } => (proof, None),
            Session::Setup { parked: None } => return Err(ProofError::NoProof),
        };
        Ok(format!(
            "{} := by\n{}",
            proof.theorem,
            proof.tree.render(cursor)
        ))
    }

    /// Lists every open goal with its position.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NoProof`] if there is no proof tree.
    pub fn list_goals(&self) -> Result<String, ProofError> {
        let tree = self.proof_tree().ok_or(ProofError::NoProof)?;
        let total = tree.num_sorries();
        let goals: Vec<String> = tree
            .list_sorries(tree.root())
            .enumerate()
            .filter_map(|(i, id)| {
                let state = tree.get(id)?.proof_state();
                Some(format!("Goal {} of {total}:\n{state}", i + 1))
            })
            .collect();
        Ok(goals.join("\n"))
    }

    // ── Tactics ─────────────────────────────────────────────────────

    /// Applies `tactic` to the goal under the cursor.
    ///
    /// On success the cursor moves to the next open goal after the solved
    /// one in pre-order, else to the previous one. When none remain the
    /// session either leaves tactic mode (auto-finish) or stays on the solved
    /// node.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode and
    /// [`ProofError::TacticNotApplicable`] when the tactic declines; in that
    /// case nothing about the session changes.
    pub fn use_tactic<T: Tactic<A> + 'static>(&mut self, tactic: T) -> Result<Status, ProofError> {
        self.use_shared(Rc::new(tactic))
    }

    /// Applies an already shared tactic; see [`ProofAssistant::use_tactic`].
    ///
    /// # Errors
    ///
    /// Same as [`ProofAssistant::use_tactic`].
    pub fn use_shared(&mut self, tactic: Rc<dyn Tactic<A>>) -> Result<Status, ProofError> {
        let (proof, solved) = self.active_mut("apply tactics")?;
        proof.tree.use_tactic(solved, tactic)?;
        let status = Status::of(&proof.tree);
        info!("{status}");
        self.reposition(solved);
        Ok(status)
    }

    /// Instantiates `lemma` and adds it to the context under `name`.
    ///
    /// # Errors
    ///
    /// Same as [`ProofAssistant::use_tactic`].
    pub fn use_lemma<L: Lemma<A> + 'static>(
        &mut self,
        lemma: L,
        name: &str,
    ) -> Result<Status, ProofError> {
        self.use_tactic(UseLemma::new(name, Rc::new(lemma)))
    }

    /// Applies `tactic` to every goal that is open when the call starts.
    ///
    /// Each application acts on its own node; goals produced along the way
    /// are not revisited. Goals the tactic declines are left open.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode and the
    /// last application's error if the tactic applied to no goal at all.
    pub fn all_goals_use<T: Tactic<A> + 'static>(
        &mut self,
        tactic: T,
    ) -> Result<Status, ProofError> {
        let shared: Rc<dyn Tactic<A>> = Rc::new(tactic);
        let (proof, cursor) = self.active_mut("apply tactics")?;
        let targets: Vec<NodeId> = proof.tree.list_sorries(proof.tree.root()).collect();
        let mut applied = 0_usize;
        let mut last_error = None;
        for node in targets {
            match proof.tree.use_tactic(node, Rc::clone(&shared)) {
                Ok(_) => applied += 1,
                Err(error) => {
                    debug!(%node, %error, "goal left open");
                    last_error = Some(error);
                }
            }
        }
        if applied == 0 {
            return Err(last_error.unwrap_or_else(|| ProofError::TacticNotApplicable {
                tactic: shared.to_string(),
                reason: "there are no open goals".to_owned(),
            }));
        }
        let status = Status::of(&proof.tree);
        info!("{status}");
        if proof.tree.get(cursor).is_none_or(|node| !node.is_open()) {
            self.reposition(cursor);
        }
        Ok(status)
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Moves the cursor to any live node of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode and
    /// [`ProofError::NavigationOutOfRange`] for a node not in the tree.
    pub fn set_current_node(&mut self, node: NodeId) -> Result<Focus, ProofError> {
        let (proof, cursor) = self.active_cursor_mut("set the current node")?;
        let focus = focus_of(&proof.tree, node)?;
        *cursor = node;
        info!("{focus}");
        Ok(focus)
    }

    /// Moves to the next open goal; `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn next_goal(&mut self) -> Result<Option<Focus>, ProofError> {
        let (proof, cursor) = self.active("move to the next goal")?;
        let after = proof.tree.find_sorry(cursor).and_then(|found| found.after);
        self.move_to(after, "No subsequent goal to move to.")
    }

    /// Moves to the previous open goal; `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn previous_goal(&mut self) -> Result<Option<Focus>, ProofError> {
        let (proof, cursor) = self.active("move to the previous goal")?;
        let before = proof.tree.find_sorry(cursor).and_then(|found| found.before);
        self.move_to(before, "No previous goal to move to.")
    }

    /// Moves to the first open goal; `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn first_goal(&mut self) -> Result<Option<Focus>, ProofError> {
        let (proof, _) = self.active("move to the first goal")?;
        let first = proof.tree.first_sorry();
        self.move_to(first, "No goals to move to.")
    }

    /// Moves to the last open goal; `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode.
    pub fn last_goal(&mut self) -> Result<Option<Focus>, ProofError> {
        let (proof, _) = self.active("move to the last goal")?;
        let last = proof.tree.last_sorry();
        self.move_to(last, "No goals to move to.")
    }

    /// Moves to the parent of the current node.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode and
    /// [`ProofError::NavigationOutOfRange`] at the root.
    pub fn go_back(&mut self) -> Result<Focus, ProofError> {
        let parent = self
            .cursor_parent("move back")?
            .ok_or_else(|| {
                info!("Already at start of proof.");
                out_of_range("already at the start of the proof")
            })?;
        let focus = self.set_current_node(parent)?;
        info!("Moved back a step in the proof.");
        Ok(focus)
    }

    /// Moves to the `case`-th (1-indexed) child of the current node.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode and
    /// [`ProofError::NavigationOutOfRange`] if the node has no children or
    /// fewer than `case`.
    pub fn go_forward(&mut self, case: usize) -> Result<Focus, ProofError> {
        let (proof, cursor) = self.active("move forward")?;
        let children = proof
            .tree
            .get(cursor)
            .map(Node::children)
            .unwrap_or_default();
        if children.is_empty() {
            info!("There are no more steps in this branch of the proof.");
            return Err(out_of_range("no further steps in this branch of the proof"));
        }
        let count = children.len();
        let child = case
            .checked_sub(1)
            .and_then(|index| children.get(index))
            .copied()
            .ok_or_else(|| {
                info!("There are only {count} cases after this step of the proof.");
                out_of_range(&format!("case {case} requested but this step has {count}"))
            })?;
        let focus = self.set_current_node(child)?;
        if count == 1 {
            info!("Moved forward a step in the proof.");
        } else {
            info!("Moved forward to case {case} of this step in the proof.");
        }
        Ok(focus)
    }

    /// Moves to the parent and discards the tactic applied there.
    ///
    /// There is no redo: the parent's whole subtree is dropped. Returns the
    /// rendering of the undone tactic.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IllegalModeOperation`] in setup mode and
    /// [`ProofError::NavigationOutOfRange`] at the root.
    pub fn undo(&mut self) -> Result<String, ProofError> {
        let parent = self
            .cursor_parent("undo")?
            .ok_or_else(|| {
                info!("No tactics to undo.");
                out_of_range("no tactic to undo")
            })?;
        let (proof, cursor) = self.active_cursor_mut("undo")?;
        let undone = proof
            .tree
            .revert(parent)?
            .map(|tactic| tactic.to_string())
            .unwrap_or_default();
        *cursor = parent;
        info!("Undid previous tactic ({undone}).");
        Ok(undone)
    }

    // ── Internals ───────────────────────────────────────────────────

    fn require_setup(&self, operation: &'static str) -> Result<(), ProofError> {
        match self.mode() {
            Mode::Setup => Ok(()),
            mode @ Mode::ActiveProof => Err(illegal(operation, mode)),
        }
    }

    fn require_active(&self, operation: &'static str) -> Result<(), ProofError> {
        self.active(operation).map(|_| ())
    }

    fn active(&self, operation: &'static str) -> Result<(&Proof<A>, NodeId), ProofError> {
        match &self.session {
            Session::Active { proof, cursor } => Ok((proof, *cursor)),
            Session::Setup { .. } => Err(illegal(operation, Mode::Setup)),
        }
    }

    fn active_mut(&mut self, operation: &'static str) -> Result<(&mut Proof<A>, NodeId), ProofError> {
        self.active_cursor_mut(operation)
            .map(|(proof, cursor)| (proof, *cursor))
    }

    fn active_cursor_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<(&mut Proof<A>, &mut NodeId), ProofError> {
        match &mut self.session {
            Session::Active { proof, cursor } => Ok((proof, cursor)),
            Session::Setup { .. } => Err(illegal(operation, Mode::Setup)),
        }
    }

    fn cursor_parent(&self, operation: &'static str) -> Result<Option<NodeId>, ProofError> {
        let (proof, cursor) = self.active(operation)?;
        Ok(proof.tree.get(cursor).and_then(|node| node.parent()))
    }

    fn move_to(&mut self, target: Option<NodeId>, none: &str) -> Result<Option<Focus>, ProofError> {
        match target {
            Some(node) => self.set_current_node(node).map(Some),
            None => {
                info!("{none}");
                Ok(None)
            }
        }
    }

    /// Moves the cursor off `from` after it was solved.
    fn reposition(&mut self, from: NodeId) {
        let Session::Active { proof, cursor } = &mut self.session else {
            return;
        };
        let next = proof
            .tree
            .find_sorry(from)
            .and_then(|found| found.after.or(found.before));
        match next {
            Some(node) => *cursor = node,
            None if self.config.auto_finish => {
                self.session = Session::Setup { parked: None };
                info!("All goals cleared; leaving tactic mode.");
            }
            None => *cursor = from,
        }
    }
}

impl<A: TermAlgebra> fmt::Display for ProofAssistant<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (proof, cursor) = match &self.session {
            Session::Setup { .. } if self.staging.is_empty() => {
                return f.write_str("Proof Assistant is in setup mode.  No hypotheses.");
            }
            Session::Setup { .. } => {
                f.write_str("Proof Assistant is in setup mode.  Current hypotheses:")?;
                for (name, hypothesis) in &self.staging {
                    write!(f, "\n{}", A::describe(name, hypothesis))?;
                }
                return Ok(());
            }
            Session::Active { proof, cursor } => (proof, *cursor),
        };
        let Some(node) = proof.tree.get(cursor) else {
            return Err(fmt::Error);
        };
        write!(
            f,
            "Proof Assistant is in tactic mode.  Current proof state:\n{}",
            node.proof_state()
        )?;
        match (node.tactic(), node.children().len()) {
            (None, _) => {
                let total = proof.tree.num_sorries();
                if let Some(counts) = proof.tree.count_sorries(cursor).filter(|_| total > 1) {
                    write!(f, "\nThis is goal {} of {total}.", counts.before + 1)?;
                }
                Ok(())
            }
            (Some(tactic), 0) => write!(f, "\nThis goal was solved with \"{tactic}\"."),
            (Some(tactic), 1) => write!(f, "\nThe next step in the proof is \"{tactic}\"."),
            (Some(tactic), n) => write!(
                f,
                "\nThe next step in the proof is \"{tactic}\", generating {n} sub-goals."
            ),
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn validate_proposition<A: TermAlgebra>(
    term: &A::Term,
    declared: &IndexSet<A::Var>,
) -> Result<(), ProofError> {
    if !A::is_proposition(term) {
        return Err(ProofError::NotAProposition {
            term: term.to_string(),
        });
    }
    if !A::is_defined(term, declared) {
        return Err(ProofError::UndefinedVariable {
            term: term.to_string(),
        });
    }
    Ok(())
}

fn theorem_header<A: TermAlgebra>(
    hypotheses: &IndexMap<String, Hypothesis<A>>,
    goal: &A::Term,
) -> String {
    let binders: Vec<String> = hypotheses
        .iter()
        .map(|(name, hypothesis)| format!("({})", A::describe(name, hypothesis)))
        .collect();
    format!("example {}: {goal}", binders.join(" "))
}

fn root_state<A: TermAlgebra>(tree: &ProofTree<A>) -> String {
    tree.get(tree.root())
        .map(|node| node.proof_state().to_string())
        .unwrap_or_default()
}

fn focus_of<A: TermAlgebra>(tree: &ProofTree<A>, node: NodeId) -> Result<Focus, ProofError> {
    let entry = tree.get(node).ok_or_else(|| {
        out_of_range(&format!("node {node} is not part of the proof tree"))
    })?;
    if let Some(tactic) = entry.tactic() {
        return Ok(Focus::Solved {
            tactic: tactic.to_string(),
        });
    }
    let counts = tree
        .count_sorries(node)
        .ok_or_else(|| out_of_range(&format!("node {node} is not part of the proof tree")))?;
    Ok(Focus::Goal {
        index: counts.before + 1,
        total: counts.before + 1 + counts.after,
    })
}

const fn illegal(operation: &'static str, mode: Mode) -> ProofError {
    ProofError::IllegalModeOperation { operation, mode }
}

fn out_of_range(reason: &str) -> ProofError {
    ProofError::NavigationOutOfRange {
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
