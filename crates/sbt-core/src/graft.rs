//! Grafting: copy the structure of another tree into this one.

use crate::node::NodeId;
use crate::Tree;

impl<T: 'static> Tree<T> {
    /// Insert a structural copy of every root of `other` at the build cursor, as
    /// if its nodes had been built here.
    ///
    /// Kinds, configuration, names and child order are kept; runtime state is
    /// not (every copied node starts with status Fail and inactive). Callbacks of
    /// action leaves are shared with `other`.
    pub fn insert_tree(&mut self, other: &Tree<T>) -> &mut Self {
        for &other_root in other.roots() {
            let Some(original) = other.node(other_root) else {
                continue;
            };
            let parent = self.cursor.last().copied();
            let cloned_root = self.push_node(original.structural_copy(parent));
            self.attach(cloned_root);

            let mut stack: Vec<(NodeId, NodeId)> = vec![(other_root, cloned_root)];
            while let Some((original, clone)) = stack.pop() {
                let Some(source) = other.node(original) else {
                    continue;
                };
                for &child in source.children() {
                    let Some(child_node) = other.node(child) else {
                        continue;
                    };
                    let copy = self.push_node(child_node.structural_copy(Some(clone)));
                    self.nodes[clone.index()].children.push(copy);
                    stack.push((child, copy));
                }
            }

            // The copy arrives complete: do not leave it open on the cursor.
            if self.nodes[cloned_root.index()].class().is_structural() {
                self.cursor.pop();
            }
            tracing::debug!(
                target: "sbt",
                root = cloned_root.index(),
                nodes = self.len(),
                "grafted subtree"
            );
        }
        self
    }
}
