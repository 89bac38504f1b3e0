//! Rendering a proof tree as a tactic script.

use super::algebra::TermAlgebra;
use super::tree::{NodeId, ProofTree};

/// Placeholder emitted for an open obligation.
pub const SORRY: &str = "sorry";

/// Suffix marking the obligation under the cursor.
const CURRENT_MARKER: &str = " -- current goal";

/// Indentation added per nesting level.
const INDENT: &str = "  ";

enum Item {
    Node(NodeId, usize),
    Line(String, usize),
}

impl<A: TermAlgebra> ProofTree<A> {
    /// Renders the tree as a proof script body.
    ///
    /// A solved node emits its tactic. With one child the script continues
    /// at the same depth; with several, each child becomes a `case i =>`
    /// block indented one level further. Open nodes emit `sorry`, tagged
    /// when they are `current`.
    #[must_use]
    pub fn render(&self, current: Option<NodeId>) -> String {
        let mut lines = Vec::new();
        let mut stack = vec![Item::Node(self.root(), 1)];
        while let Some(item) = stack.pop() {
            let (id, depth) = match item {
                Item::Line(text, depth) => {
                    lines.push(indented(&text, depth));
                    continue;
                }
                Item::Node(id, depth) => (id, depth),
            };
            let Some(node) = self.get(id) else {
                continue;
            };
            let Some(tactic) = node.tactic() else {
                let marker = if current == Some(id) { CURRENT_MARKER } else { "" };
                lines.push(indented(&format!("{SORRY}{marker}"), depth));
                continue;
            };
            lines.push(indented(&tactic.to_string(), depth));
            match node.children() {
                [] => {}
                [only] => stack.push(Item::Node(*only, depth)),
                children => {
                    for (case, child) in children.iter().enumerate().rev() {
                        stack.push(Item::Node(*child, depth + 1));
                        stack.push(Item::Line(format!("case {} =>", case + 1), depth));
                    }
                }
            }
        }
        lines.join("\n")
    }
}

fn indented(text: &str, depth: usize) -> String {
    format!("{}{text}", INDENT.repeat(depth))
}
