//! Compact engine events for replay and tooling.
//!
//! `tracing` carries the human-readable log; these events are plain data a host
//! can record per tick and inspect afterwards.

use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{NodeId, Status};

/// `a` = id of the root scheduled by this call, [`RESUMED`] when a busy tree continues.
pub const TICK_BEGIN: &str = "sbt.tick.begin";
/// `a` = settle passes, `b` = [`Status::code`] of the call.
pub const TICK_END: &str = "sbt.tick.end";
/// `a` = node id.
pub const NODE_START: &str = "sbt.node.start";
/// `a` = node id, `b` = [`Status::code`] the node left with.
pub const NODE_RETIRE: &str = "sbt.node.retire";

pub const RESUMED: u64 = u64::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }

    pub(crate) fn tick_begin(tick: u64, root: Option<NodeId>) -> Self {
        Self::new(tick, TICK_BEGIN).with_a(root.map_or(RESUMED, |r| r.index() as u64))
    }

    pub(crate) fn tick_end(tick: u64, passes: u64, status: Status) -> Self {
        Self::new(tick, TICK_END).with_a(passes).with_b(status.code())
    }

    pub(crate) fn node_start(tick: u64, node: NodeId) -> Self {
        Self::new(tick, NODE_START).with_a(node.index() as u64)
    }

    pub(crate) fn node_retire(tick: u64, node: NodeId, status: Status) -> Self {
        Self::new(tick, NODE_RETIRE)
            .with_a(node.index() as u64)
            .with_b(status.code())
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Discards everything; installing it is the same as having no sink.
#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

/// An in-memory recording, filterable by tag.
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }

    /// Events recorded during one `tick` call.
    pub fn at_tick(&self, tick: u64) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
