use std::collections::HashSet;

use thiserror::Error;

use crate::NodeId;

/// Malformed-tree conditions.
///
/// None of these abort construction or ticking: they are rendered to text and
/// handed to the tree's [`ErrorSink`], and the tree keeps going in a possibly
/// incomplete state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Malformed Behaviour Tree: too many end() calls!")]
    TooManyEnds,

    #[error("Malformed Behaviour Tree: end() used without composite node!")]
    EndWithoutComposite,

    #[error("Malformed Behaviour Tree: composite node '{name}' with no children!")]
    EmptyComposite { name: String },

    #[error("Malformed Behaviour Tree: composite node '{name}' ticked without children")]
    EmptyCompositeTicked { name: String },

    #[error("Malformed Behaviour Tree: decorator '{name}' ticked without a child")]
    DecoratorWithoutChild { name: String },

    #[error("Malformed Behaviour Tree: no root at index {index} (tree has {roots})")]
    NoRoot { index: usize, roots: usize },
}

/// Single-argument text callback receiving malformed-tree reports.
pub type ErrorSink = Box<dyn FnMut(&str)>;

pub(crate) fn default_error_sink() -> ErrorSink {
    Box::new(|message| tracing::error!(target: "sbt", "{message}"))
}

/// Reports collected by hooks during a pass; flushed to the sink by the tree.
///
/// A node reports at most once over its lifetime, so a malformed tree ticked
/// every frame does not flood the sink.
#[derive(Default)]
pub(crate) struct Faults {
    pending: Vec<BuildError>,
    reported: HashSet<NodeId>,
}

impl Faults {
    pub(crate) fn push_once(&mut self, node: NodeId, error: BuildError) {
        if self.reported.insert(node) {
            self.pending.push(error);
        }
    }

    /// Node ids are about to be reused.
    pub(crate) fn forget_nodes(&mut self) {
        self.pending.clear();
        self.reported.clear();
    }

    pub(crate) fn take(&mut self) -> Vec<BuildError> {
        std::mem::take(&mut self.pending)
    }
}
