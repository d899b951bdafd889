//! Arena nodes and the hook interface every node kind implements.
//!
//! Nodes live in the tree's arena and refer to each other by [`NodeId`]. The
//! parent link is a plain id: ownership flows strictly downward through
//! `children`, and the back-reference is only ever used to route child reports.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::agenda::Agenda;
use crate::composite::{Parallel, Race, RandomSelector, Selector, Sequence};
use crate::decorator::{Invert, Override, Repeat, Retry};
use crate::error::{BuildError, Faults};
use crate::leaf::{Action, Custom, Fixed, Wait};
use crate::rng::{DeterministicRng, SplitMix64};
use crate::{Status, TickContext};

/// Index of a node inside the arena of the tree that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeClass {
    Leaf,
    Composite,
    Decorator,
}

impl NodeClass {
    /// Composites and decorators own children and sit on the build cursor while open.
    pub fn is_structural(self) -> bool {
        !matches!(self, NodeClass::Leaf)
    }
}

/// A node of a [`crate::Tree`].
///
/// Only read access is public; status changes happen through the engine.
pub struct Node<T> {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: Kind<T>,
    pub(crate) status: Status,
    pub(crate) last_change_tick: u64,
}

impl<T: 'static> Node<T> {
    pub(crate) fn new(name: String, kind: Kind<T>, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            kind,
            status: Status::Fail,
            last_change_tick: 0,
        }
    }

    /// Same kind, configuration and name; no runtime state and no children yet.
    pub(crate) fn structural_copy(&self, parent: Option<NodeId>) -> Self {
        Self::new(self.name.clone(), self.kind.fresh_copy(), parent)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn class(&self) -> NodeClass {
        self.kind.class()
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.kind_name()
    }

    /// Tick counter value at the last status write.
    pub fn last_change_tick(&self) -> u64 {
        self.last_change_tick
    }

    pub(crate) fn set_status(&mut self, status: Status, tick: u64) {
        self.status = status;
        self.last_change_tick = tick;
    }
}

impl<T: 'static> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind.kind_name())
            .field("status", &self.status)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish()
    }
}

/// Closed set of node kinds.
pub(crate) enum Kind<T> {
    Fixed(Fixed),
    Action(Action<T>),
    Wait(Wait),
    Custom(Custom<T>),
    Sequence(Sequence),
    Selector(Selector),
    Parallel(Parallel),
    Race(Race),
    RandomSelector(RandomSelector),
    Invert(Invert),
    Override(Override),
    Repeat(Repeat),
    Retry(Retry),
}

impl<T: 'static> Kind<T> {
    pub(crate) fn class(&self) -> NodeClass {
        match self {
            Kind::Fixed(_) | Kind::Action(_) | Kind::Wait(_) | Kind::Custom(_) => NodeClass::Leaf,
            Kind::Sequence(_)
            | Kind::Selector(_)
            | Kind::Parallel(_)
            | Kind::Race(_)
            | Kind::RandomSelector(_) => NodeClass::Composite,
            Kind::Invert(_) | Kind::Override(_) | Kind::Repeat(_) | Kind::Retry(_) => {
                NodeClass::Decorator
            }
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Kind::Fixed(f) if f.0.is_success() => "success",
            Kind::Fixed(_) => "fail",
            Kind::Action(_) => "action",
            Kind::Wait(_) => "wait",
            Kind::Custom(_) => "leaf",
            Kind::Sequence(_) => "sequence",
            Kind::Selector(_) => "selector",
            Kind::Parallel(_) => "parallel",
            Kind::Race(_) => "race",
            Kind::RandomSelector(_) => "random selector",
            Kind::Invert(_) => "invert",
            Kind::Override(_) => "override",
            Kind::Repeat(_) => "repeat",
            Kind::Retry(_) => "retry",
        }
    }

    pub(crate) fn fresh_copy(&self) -> Self {
        match self {
            Kind::Fixed(f) => Kind::Fixed(*f),
            Kind::Action(a) => Kind::Action(a.clone()),
            Kind::Wait(w) => Kind::Wait(Wait::new(w.duration())),
            Kind::Custom(c) => Kind::Custom(c.fresh_copy()),
            Kind::Sequence(_) => Kind::Sequence(Sequence::default()),
            Kind::Selector(_) => Kind::Selector(Selector::default()),
            Kind::Parallel(_) => Kind::Parallel(Parallel::default()),
            Kind::Race(_) => Kind::Race(Race::default()),
            Kind::RandomSelector(_) => Kind::RandomSelector(RandomSelector),
            Kind::Invert(_) => Kind::Invert(Invert),
            Kind::Override(o) => Kind::Override(Override::new(o.fixed())),
            Kind::Repeat(_) => Kind::Repeat(Repeat::default()),
            Kind::Retry(_) => Kind::Retry(Retry::default()),
        }
    }

    pub(crate) fn behavior(&mut self) -> &mut dyn Behavior<T> {
        match self {
            Kind::Fixed(b) => b,
            Kind::Action(b) => b,
            Kind::Wait(b) => b,
            Kind::Custom(b) => b,
            Kind::Sequence(b) => b,
            Kind::Selector(b) => b,
            Kind::Parallel(b) => b,
            Kind::Race(b) => b,
            Kind::RandomSelector(b) => b,
            Kind::Invert(b) => b,
            Kind::Override(b) => b,
            Kind::Repeat(b) => b,
            Kind::Retry(b) => b,
        }
    }
}

/// Hooks invoked by the engine.
///
/// Hooks never touch the worklist directly: they may only schedule a node for
/// the current tick or request a retirement through [`NodeCx`].
pub(crate) trait Behavior<T> {
    /// Called before `on_tick` whenever the node is evaluated while not Running.
    fn on_start(&mut self, _cx: &mut NodeCx<'_, T>) {}

    /// Called once per tick while the node is active.
    fn on_tick(&mut self, _cx: &mut NodeCx<'_, T>) {}

    /// A child delivers its status during the reverse pass.
    fn on_child_report(&mut self, _child: Status, _cx: &mut NodeCx<'_, T>) {}

    /// The node left the worklist.
    fn on_remove(&mut self, cx: &mut NodeCx<'_, T>) {
        cx.retire_children();
    }
}

/// What a hook may see and do while the engine evaluates one node.
pub(crate) struct NodeCx<'a, T> {
    id: NodeId,
    name: &'a str,
    children: &'a [NodeId],
    status: Status,
    written: bool,
    clock: TickContext,
    agenda: &'a mut Agenda,
    rng: &'a mut SplitMix64,
    context: &'a mut T,
    faults: &'a mut Faults,
}

impl<'a, T> NodeCx<'a, T> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: NodeId,
        name: &'a str,
        children: &'a [NodeId],
        status: Status,
        clock: TickContext,
        agenda: &'a mut Agenda,
        rng: &'a mut SplitMix64,
        context: &'a mut T,
        faults: &'a mut Faults,
    ) -> Self {
        Self {
            id,
            name,
            children,
            status,
            written: false,
            clock,
            agenda,
            rng,
            context,
            faults,
        }
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
        self.written = true;
    }

    /// The status to store back on the node, if a hook wrote one.
    pub(crate) fn written(&self) -> Option<Status> {
        self.written.then_some(self.status)
    }

    pub(crate) fn children(&self) -> &'a [NodeId] {
        self.children
    }

    pub(crate) fn clock(&self) -> TickContext {
        self.clock
    }

    pub(crate) fn context(&mut self) -> &mut T {
        self.context
    }

    pub(crate) fn random_index(&mut self, len: usize) -> usize {
        self.rng.next_index(len)
    }

    /// Append `node` to this tick's worklist.
    pub(crate) fn schedule(&mut self, node: NodeId) -> bool {
        self.agenda.schedule(node)
    }

    pub(crate) fn retire_children(&mut self) {
        for &child in self.children {
            self.agenda.retire(child, true);
        }
    }

    pub(crate) fn report(&mut self, error: BuildError) {
        self.faults.push_once(self.id, error);
    }

    /// Conclude with Fail and report, for composites reached without children.
    pub(crate) fn fail_empty_composite(&mut self) {
        self.report(BuildError::EmptyCompositeTicked {
            name: self.name.to_string(),
        });
        self.set_status(Status::Fail);
    }

    /// Schedule the single child of a decorator, or conclude with Fail and report.
    pub(crate) fn start_decorated(&mut self) -> Option<NodeId> {
        match self.children.first().copied() {
            Some(child) => {
                self.schedule(child);
                Some(child)
            }
            None => {
                self.report(BuildError::DecoratorWithoutChild {
                    name: self.name.to_string(),
                });
                self.set_status(Status::Fail);
                None
            }
        }
    }
}
