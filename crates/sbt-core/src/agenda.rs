//! Worklist bookkeeping for one tree: which nodes are active, which were stamped
//! in the current tick, and which are waiting to be retired.

use crate::NodeId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Slot {
    active: bool,
    scheduled: Option<u64>,
    evaluated: Option<u64>,
}

#[derive(Debug, Default)]
pub(crate) struct Agenda {
    active: Vec<NodeId>,
    retiring: Vec<(NodeId, bool)>,
    slots: Vec<Slot>,
    tick: u64,
    unsettled: bool,
}

impl Agenda {
    pub(crate) fn tick(&self) -> u64 {
        self.tick
    }

    pub(crate) fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Grow the slot table alongside the node arena.
    pub(crate) fn track(&mut self, node: NodeId) {
        if self.slots.len() <= node.index() {
            self.slots.resize(node.index() + 1, Slot::default());
        }
    }

    pub(crate) fn active(&self) -> &[NodeId] {
        &self.active
    }

    pub(crate) fn active_at(&self, index: usize) -> Option<NodeId> {
        self.active.get(index).copied()
    }

    pub(crate) fn is_active(&self, node: NodeId) -> bool {
        self.slots.get(node.index()).is_some_and(|s| s.active)
    }

    /// Appends `node` to the worklist unless it is already active or was already
    /// scheduled during this tick.
    pub(crate) fn schedule(&mut self, node: NodeId) -> bool {
        let tick = self.tick;
        let Some(slot) = self.slots.get_mut(node.index()) else {
            return false;
        };
        if slot.active || slot.scheduled == Some(tick) {
            return false;
        }
        slot.active = true;
        slot.scheduled = Some(tick);
        self.active.push(node);
        self.unsettled = true;
        tracing::trace!(target: "sbt", node = node.index(), tick, "schedule");
        true
    }

    /// Stamps `node` as evaluated for this tick; false if it already was.
    pub(crate) fn begin_evaluation(&mut self, node: NodeId) -> bool {
        let tick = self.tick;
        match self.slots.get_mut(node.index()) {
            Some(slot) if slot.evaluated != Some(tick) => {
                slot.evaluated = Some(tick);
                true
            }
            _ => false,
        }
    }

    /// Queue an active node for removal, optionally forcing its status to Fail.
    pub(crate) fn retire(&mut self, node: NodeId, force_fail: bool) {
        if let Some(slot) = self.slots.get_mut(node.index()) {
            if slot.active {
                slot.active = false;
                self.retiring.push((node, force_fail));
            }
        }
    }

    pub(crate) fn next_retired(&mut self) -> Option<(NodeId, bool)> {
        self.retiring.pop()
    }

    /// Drop `node` from the worklist, keeping the order of the others.
    pub(crate) fn remove(&mut self, node: NodeId) -> bool {
        match self.active.iter().position(|n| *n == node) {
            Some(pos) => {
                self.active.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_unsettled(&mut self, unsettled: bool) {
        self.unsettled = unsettled;
    }

    pub(crate) fn is_unsettled(&self) -> bool {
        self.unsettled
    }

    /// Forget everything queued; returns the nodes that were active or retiring.
    pub(crate) fn clear_pending(&mut self) -> Vec<NodeId> {
        let mut touched: Vec<NodeId> = self.active.drain(..).collect();
        touched.extend(self.retiring.drain(..).map(|(n, _)| n));
        for node in &touched {
            if let Some(slot) = self.slots.get_mut(node.index()) {
                *slot = Slot::default();
            }
        }
        self.unsettled = false;
        touched
    }

    pub(crate) fn forget_nodes(&mut self) {
        self.clear_pending();
        self.slots.clear();
    }
}
