//! Reactive behaviour tree engine with incremental, worklist-driven ticking.
//!
//! A [`Tree`] owns an arena of nodes, a shared context value `T` handed to leaf
//! callbacks, and an active worklist. Each call to [`Tree::tick`] evaluates only
//! the nodes that are currently active, lets children report to their parents in
//! reverse order, retires concluded nodes and repeats until no node asked for more
//! work within the same tick.
//!
//! Trees are built with a fluent surface (`tree.sequence().success().end()`) and a
//! finished tree can be grafted into another one with [`Tree::insert_tree`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod agenda;
mod builder;
mod composite;
pub mod config;
mod decorator;
pub mod error;
mod graft;
pub mod leaf;
pub mod node;
pub mod rng;
pub mod status;
pub mod tick;
pub mod trace;
pub mod tree;

pub use config::TreeConfig;
pub use error::{BuildError, ErrorSink};
pub use leaf::Leaf;
pub use node::{Node, NodeClass, NodeId};
pub use rng::{DeterministicRng, SplitMix64};
pub use status::Status;
pub use tick::TickContext;
pub use trace::{NullTraceSink, TraceEvent, TraceLog, TraceSink};
pub use tree::Tree;
