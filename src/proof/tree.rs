//! The proof tree: a record of tactic applications and open obligations.
//!
//! Nodes live in an arena owned by [`ProofTree`] and refer to each other by
//! [`NodeId`]. A node without a tactic is open (a "sorry"); a node with a
//! tactic has exactly the successor states that tactic produced as children.
//! Reverting a node tombstones its whole subtree, so ids of discarded nodes
//! stay invalid and are never reused.
//!
//! Every enumeration walks the tree in depth-first, left-to-right pre-order
//! with an explicit stack, so arbitrarily deep trees are handled without
//! recursion.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::algebra::TermAlgebra;
use super::error::ProofError;
use super::state::ProofState;
use super::tactic::Tactic;

/// Handle to a node of a [`ProofTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One obligation in the tree, together with how it was discharged.
pub struct Node<A: TermAlgebra> {
    state: ProofState<A>,
    tactic: Option<Rc<dyn Tactic<A>>>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl<A: TermAlgebra> Node<A> {
    /// Returns the obligation held by this node.
    #[must_use]
    pub const fn proof_state(&self) -> &ProofState<A> {
        &self.state
    }

    /// Returns the tactic that discharged this node, if any.
    #[must_use]
    pub fn tactic(&self) -> Option<&dyn Tactic<A>> {
        self.tactic.as_deref()
    }

    /// Returns the successor nodes, in the order the tactic produced them.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the parent node; `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns `true` if no tactic has been applied yet.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.tactic.is_none()
    }
}

impl<A: TermAlgebra> fmt::Debug for Node<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("state", &self.state)
            .field("tactic", &self.tactic.as_ref().map(ToString::to_string))
            .field("children", &self.children)
            .field("parent", &self.parent)
            .finish()
    }
}

/// Position of a node relative to the open nodes of its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SorryNeighbors {
    /// Whether the node itself is open.
    pub is_open: bool,
    /// The last open node preceding it in pre-order.
    pub before: Option<NodeId>,
    /// The first open node following it in pre-order.
    pub after: Option<NodeId>,
}

/// Numbers of open nodes around a node, by pre-order position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SorryCounts {
    /// Whether the node itself is open.
    pub is_open: bool,
    /// Open nodes strictly before it.
    pub before: usize,
    /// Open nodes strictly after it.
    pub after: usize,
}

/// An arena-backed tree of proof obligations.
#[derive(Debug)]
pub struct ProofTree<A: TermAlgebra> {
    slots: Vec<Option<Node<A>>>,
    root: NodeId,
}

impl<A: TermAlgebra> ProofTree<A> {
    /// Creates a tree whose only node is an open root holding `state`.
    #[must_use]
    pub fn new(state: ProofState<A>) -> Self {
        let root = Node {
            state,
            tactic: None,
            children: Vec::new(),
            parent: None,
        };
        Self {
            slots: vec![Some(root)],
            root: NodeId(0),
        }
    }

    /// Returns the root node's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node for `id`, or `None` if it was discarded.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<A>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Returns `true` if `id` refers to a live node of this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the obligation held by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NavigationOutOfRange`] for a discarded id.
    pub fn proof_state(&self, id: NodeId) -> Result<&ProofState<A>, ProofError> {
        self.node(id).map(Node::proof_state)
    }

    /// Applies `tactic` to the open node `id` and returns how many
    /// obligations replaced it.
    ///
    /// Either all successors are attached or nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::TacticNotApplicable`] if the node is already
    /// solved or the tactic declines, [`ProofError::UndefinedVariable`] if a
    /// successor mentions an undeclared variable, and
    /// [`ProofError::NavigationOutOfRange`] for a discarded id.
    pub fn use_tactic(&mut self, id: NodeId, tactic: Rc<dyn Tactic<A>>) -> Result<usize, ProofError> {
        let node = self.node(id)?;
        if let Some(existing) = node.tactic() {
            return Err(ProofError::TacticNotApplicable {
                tactic: tactic.to_string(),
                reason: format!("goal is already solved by \"{existing}\""),
            });
        }
        let successors =
            tactic
                .apply(&node.state)
                .map_err(|error| ProofError::TacticNotApplicable {
                    tactic: tactic.to_string(),
                    reason: error.reason,
                })?;
        for state in &successors {
            state.check_scoped()?;
        }

        let mut children = Vec::with_capacity(successors.len());
        for state in successors {
            let child = NodeId(self.slots.len());
            self.slots.push(Some(Node {
                state,
                tactic: None,
                children: Vec::new(),
                parent: Some(id),
            }));
            children.push(child);
        }
        let count = children.len();
        let solved = self.node_mut(id)?;
        debug!(node = %id, tactic = %tactic, children = count, "applied tactic");
        solved.tactic = Some(tactic);
        solved.children = children;
        Ok(count)
    }

    /// Reopens `id`: clears its tactic and discards its subtree.
    ///
    /// Returns the tactic that was removed, or `None` if the node was
    /// already open.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NavigationOutOfRange`] for a discarded id.
    pub fn revert(&mut self, id: NodeId) -> Result<Option<Rc<dyn Tactic<A>>>, ProofError> {
        let node = self.node_mut(id)?;
        let tactic = node.tactic.take();
        let mut doomed = std::mem::take(&mut node.children);
        while let Some(child) = doomed.pop() {
            if let Some(discarded) = self.slots.get_mut(child.0).and_then(Option::take) {
                doomed.extend(discarded.children);
            }
        }
        if let Some(removed) = &tactic {
            debug!(node = %id, tactic = %removed, "reverted tactic");
        }
        Ok(tactic)
    }

    /// Walks the subtree under `from` in pre-order.
    #[must_use]
    pub fn preorder(&self, from: NodeId) -> Preorder<'_, A> {
        Preorder {
            tree: self,
            stack: vec![from],
        }
    }

    /// Enumerates the open nodes under `from` in pre-order.
    #[must_use]
    pub fn list_sorries(&self, from: NodeId) -> Sorries<'_, A> {
        Sorries {
            walk: self.preorder(from),
        }
    }

    /// Counts the open nodes of the whole tree.
    #[must_use]
    pub fn num_sorries(&self) -> usize {
        self.num_sorries_under(self.root)
    }

    /// Counts the open nodes under `from`.
    #[must_use]
    pub fn num_sorries_under(&self, from: NodeId) -> usize {
        self.list_sorries(from).count()
    }

    /// Returns the first open node of the tree.
    #[must_use]
    pub fn first_sorry(&self) -> Option<NodeId> {
        self.list_sorries(self.root).next()
    }

    /// Returns the last open node of the tree.
    #[must_use]
    pub fn last_sorry(&self) -> Option<NodeId> {
        self.list_sorries(self.root).last()
    }

    /// Locates the open nodes immediately around `id` in the whole tree.
    ///
    /// Returns `None` if `id` is not a live node.
    #[must_use]
    pub fn find_sorry(&self, id: NodeId) -> Option<SorryNeighbors> {
        let mut neighbors = SorryNeighbors {
            is_open: false,
            before: None,
            after: None,
        };
        let mut seen = false;
        for current in self.preorder(self.root) {
            let open = self.is_open(current);
            if current == id {
                seen = true;
                neighbors.is_open = open;
            } else if open && seen {
                neighbors.after = Some(current);
                return Some(neighbors);
            } else if open {
                neighbors.before = Some(current);
            }
        }
        seen.then_some(neighbors)
    }

    /// Counts the open nodes before and after `id` in the whole tree.
    ///
    /// Returns `None` if `id` is not a live node.
    #[must_use]
    pub fn count_sorries(&self, id: NodeId) -> Option<SorryCounts> {
        let mut counts = SorryCounts {
            is_open: false,
            before: 0,
            after: 0,
        };
        let mut seen = false;
        for current in self.preorder(self.root) {
            let open = self.is_open(current);
            if current == id {
                seen = true;
                counts.is_open = open;
            } else if open && seen {
                counts.after += 1;
            } else if open {
                counts.before += 1;
            }
        }
        seen.then_some(counts)
    }

    fn is_open(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_open)
    }

    fn node(&self, id: NodeId) -> Result<&Node<A>, ProofError> {
        self.get(id).ok_or_else(|| discarded(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<A>, ProofError> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| discarded(id))
    }
}

fn discarded(id: NodeId) -> ProofError {
    ProofError::NavigationOutOfRange {
        reason: format!("node {id} is not part of the proof tree"),
    }
}

// ── Iterators ───────────────────────────────────────────────────────

/// Pre-order iterator over the live nodes of a subtree.
pub struct Preorder<'a, A: TermAlgebra> {
    tree: &'a ProofTree<A>,
    stack: Vec<NodeId>,
}

impl<A: TermAlgebra> Iterator for Preorder<'_, A> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.tree.get(id) {
                self.stack.extend(node.children.iter().rev());
                return Some(id);
            }
        }
        None
    }
}

impl<A: TermAlgebra> Clone for Preorder<'_, A> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
        }
    }
}

/// Pre-order iterator over the open nodes of a subtree.
///
/// Cloning the iterator restarts enumeration from the clone's position.
pub struct Sorries<'a, A: TermAlgebra> {
    walk: Preorder<'a, A>,
}

impl<A: TermAlgebra> Iterator for Sorries<'_, A> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let tree = self.walk.tree;
        self.walk.by_ref().find(|&id| tree.is_open(id))
    }
}

impl<A: TermAlgebra> Clone for Sorries<'_, A> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
