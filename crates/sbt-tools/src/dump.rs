//! Plain or rich-text rendering of a tree for on-screen debugging.

use std::fmt::Write as _;

use sbt_core::{NodeClass, NodeId, Status, Tree};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DumpOptions {
    /// Wrap recently changed, non-failed nodes in `<color=#..>` tags.
    pub rich_text: bool,
    /// Spaces per depth level; 0 disables indentation.
    pub tab_width: usize,
    pub root_index: usize,
    /// Ticks after which a node's highlight has faded out completely.
    pub colored_age_ticks: u64,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            rich_text: false,
            tab_width: 3,
            root_index: 0,
            colored_age_ticks: 30,
        }
    }
}

/// Render the selected root depth-first, one node per line.
///
/// A decorator shares its line with its child (`invert . fail`). An unknown
/// root renders as an empty string.
pub fn dump<T: 'static>(tree: &Tree<T>, options: &DumpOptions) -> String {
    let mut out = String::new();
    if let Some(&root) = tree.roots().get(options.root_index) {
        write_node(tree, options, root, 0, true, &mut out);
    }
    out
}

fn write_node<T: 'static>(
    tree: &Tree<T>,
    options: &DumpOptions,
    id: NodeId,
    depth: usize,
    indent: bool,
    out: &mut String,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    if indent {
        out.extend(std::iter::repeat(' ').take(depth * options.tab_width));
    }

    let highlight = options
        .rich_text
        .then(|| highlight(tree.tick_count(), node.last_change_tick(), node.status(), options))
        .flatten();
    match highlight {
        Some(shade) => {
            let _ = write!(out, "<color=#{shade:02x}ff{shade:02x}>{}</color>", node.name());
        }
        None => out.push_str(node.name()),
    }

    match node.class() {
        NodeClass::Decorator => {
            out.push_str(" . ");
            if let Some(&child) = node.children().first() {
                write_node(tree, options, child, depth, false, out);
            }
        }
        NodeClass::Composite => {
            out.push('\n');
            for &child in node.children() {
                write_node(tree, options, child, depth + 1, true, out);
            }
        }
        NodeClass::Leaf => out.push('\n'),
    }
}

/// Green shade for a node that changed `age` ticks ago: 0 is brightest; `None`
/// once the age reaches `colored_age_ticks` or the node failed.
fn highlight(now: u64, changed: u64, status: Status, options: &DumpOptions) -> Option<u8> {
    if status.is_fail() || options.colored_age_ticks == 0 {
        return None;
    }
    let age = now.saturating_sub(changed).min(options.colored_age_ticks);
    let fraction = age as f64 / options.colored_age_ticks as f64;
    (fraction < 1.0).then(|| (fraction * 255.0) as u8)
}
