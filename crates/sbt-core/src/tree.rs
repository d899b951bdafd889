//! The tree engine: node arena, active worklist and the tick loop.

use std::fmt;

use crate::agenda::Agenda;
use crate::error::{default_error_sink, BuildError, ErrorSink, Faults};
use crate::node::{Kind, Node, NodeCx, NodeId};
use crate::rng::SplitMix64;
use crate::trace::{TraceEvent, TraceSink};
use crate::{Status, TickContext, TreeConfig};

/// A behaviour tree over a shared context value `T`.
///
/// One call to [`Tree::tick`] runs the whole settle loop:
///
/// 1. If nothing is active, the selected root is scheduled.
/// 2. Forward pass: every active node not yet evaluated this tick is evaluated in
///    worklist order (`on_start` when it is not Running, then `on_tick`). Nodes
///    scheduled during the pass are visited in the same pass.
/// 3. Reverse pass: from the last worklist entry down to index 1 each node
///    reports to its parent; concluded nodes are queued for retirement, and so is
///    the first entry when it is no longer Running.
/// 4. Retirement: queued nodes leave the worklist (LIFO); structural nodes force
///    their still-active children to Fail and queue them too.
///
/// The loop repeats while a reverse pass scheduled new work. Parents are always
/// appended before their children, which is what lets the reverse pass deliver
/// every child report before its parent is retired.
pub struct Tree<T> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) cursor: Vec<NodeId>,
    pub(crate) last_built: Option<NodeId>,
    pub(crate) agenda: Agenda,
    context: T,
    rng: SplitMix64,
    dt: f64,
    current_root: Option<NodeId>,
    faults: Faults,
    errors: Vec<BuildError>,
    error_sink: ErrorSink,
    trace: Option<Box<dyn TraceSink>>,
}

impl<T: 'static> Tree<T> {
    pub fn new(context: T) -> Self {
        Self::with_config(context, TreeConfig::default())
    }

    pub fn with_config(context: T, config: TreeConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SplitMix64::new(seed),
            None => SplitMix64::from_clock(),
        };
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            cursor: Vec::new(),
            last_built: None,
            agenda: Agenda::default(),
            context,
            rng,
            dt: 0.0,
            current_root: None,
            faults: Faults::default(),
            errors: Vec::new(),
            error_sink: default_error_sink(),
            trace: None,
        }
    }

    /// Replace the sink receiving malformed-tree reports (defaults to `tracing::error!`).
    pub fn with_error_sink(mut self, sink: impl FnMut(&str) + 'static) -> Self {
        self.error_sink = Box::new(sink);
        self
    }

    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) -> Option<Box<dyn TraceSink>> {
        std::mem::replace(&mut self.trace, sink)
    }

    pub fn context(&self) -> &T {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut T {
        &mut self.context
    }

    pub fn into_context(self) -> T {
        self.context
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    /// Every node id, in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The active worklist, in scheduling order.
    pub fn active_nodes(&self) -> &[NodeId] {
        self.agenda.active()
    }

    pub fn is_active(&self, id: NodeId) -> bool {
        self.agenda.is_active(id)
    }

    /// Number of completed or in-progress `tick` calls.
    pub fn tick_count(&self) -> u64 {
        self.agenda.tick()
    }

    /// Delta of the most recent `tick` call.
    pub fn delta_time(&self) -> f64 {
        self.dt
    }

    /// Every malformed-tree condition reported so far.
    pub fn build_errors(&self) -> &[BuildError] {
        &self.errors
    }

    /// Tick the first root.
    pub fn tick(&mut self, dt: f64) -> Status {
        self.tick_root(dt, 0)
    }

    /// Tick the tree; `root_index` selects the root to start when nothing is active.
    pub fn tick_root(&mut self, dt: f64, root_index: usize) -> Status {
        self.dt = dt;
        let tick = self.agenda.advance();

        if self.agenda.active().is_empty() {
            let Some(&root) = self.roots.get(root_index) else {
                self.report_once(BuildError::NoRoot {
                    index: root_index,
                    roots: self.roots.len(),
                });
                return Status::Fail;
            };
            self.current_root = Some(root);
            self.agenda.schedule(root);
            self.emit(TraceEvent::tick_begin(tick, Some(root)));
        } else {
            self.emit(TraceEvent::tick_begin(tick, None));
        }

        let mut passes = 0u64;
        self.agenda.set_unsettled(true);
        while self.agenda.is_unsettled() && !self.agenda.active().is_empty() {
            passes += 1;
            self.forward_pass();
            self.agenda.set_unsettled(false);
            self.report_pass();
            self.retire_pass();
            self.flush_faults();
        }

        let status = if self.agenda.active().is_empty() {
            self.current_root
                .and_then(|root| self.node(root))
                .map_or(Status::Success, |root| root.status)
        } else {
            Status::Running
        };

        tracing::debug!(target: "sbt", tick, passes, ?status, active = self.agenda.active().len(), "tick");
        self.emit(TraceEvent::tick_end(tick, passes, status));
        status
    }

    /// Conclude every active node with Fail and empty the worklist; the structure
    /// stays intact.
    pub fn reset(&mut self) {
        let tick = self.agenda.tick();
        for id in self.agenda.clear_pending() {
            if let Some(node) = self.nodes.get_mut(id.index()) {
                node.set_status(Status::Fail, tick);
            }
        }
        self.current_root = None;
    }

    /// Reset, then drop every node, root and open build cursor.
    pub fn clear(&mut self) -> &mut Self {
        self.reset();
        self.nodes.clear();
        self.roots.clear();
        self.cursor.clear();
        self.last_built = None;
        self.agenda.forget_nodes();
        self.faults.forget_nodes();
        self
    }

    pub(crate) fn push_node(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.agenda.track(id);
        id
    }

    pub(crate) fn report(&mut self, error: BuildError) {
        (self.error_sink)(&error.to_string());
        self.errors.push(error);
    }

    /// Report `error` unless an identical report was already made.
    fn report_once(&mut self, error: BuildError) {
        if !self.errors.contains(&error) {
            self.report(error);
        }
    }

    fn flush_faults(&mut self) {
        for error in self.faults.take() {
            self.report(error);
        }
    }

    fn emit(&mut self, event: TraceEvent) {
        if let Some(sink) = self.trace.as_mut() {
            sink.emit(event);
        }
    }

    fn forward_pass(&mut self) {
        // The worklist may grow while we walk it.
        let mut index = 0;
        while let Some(id) = self.agenda.active_at(index) {
            if self.agenda.begin_evaluation(id) {
                self.evaluate(id);
            }
            index += 1;
        }
    }

    fn report_pass(&mut self) {
        let len = self.agenda.active().len();
        for index in (1..len).rev() {
            let Some(id) = self.agenda.active_at(index) else {
                continue;
            };
            let (status, parent) = {
                let node = &self.nodes[id.index()];
                (node.status, node.parent)
            };
            if let Some(parent) = parent {
                self.with_cx(parent, |kind, cx| {
                    kind.behavior().on_child_report(status, cx)
                });
            }
            if !status.is_running() {
                self.agenda.retire(id, false);
            }
        }
        if let Some(first) = self.agenda.active_at(0) {
            if !self.nodes[first.index()].status.is_running() {
                self.agenda.retire(first, false);
            }
        }
    }

    fn retire_pass(&mut self) {
        let tick = self.agenda.tick();
        while let Some((id, force_fail)) = self.agenda.next_retired() {
            if force_fail {
                self.nodes[id.index()].set_status(Status::Fail, tick);
            }
            if self.agenda.remove(id) {
                let status = self.nodes[id.index()].status;
                tracing::trace!(target: "sbt", node = id.index(), ?status, force_fail, "retire");
                self.emit(TraceEvent::node_retire(tick, id, status));
                self.with_cx(id, |kind, cx| kind.behavior().on_remove(cx));
            }
        }
    }

    fn evaluate(&mut self, id: NodeId) {
        let started = self.with_cx(id, |kind, cx| {
            let behavior = kind.behavior();
            let start = !cx.status().is_running();
            if start {
                behavior.on_start(cx);
            }
            behavior.on_tick(cx);
            start
        });
        if started {
            let tick = self.agenda.tick();
            tracing::trace!(target: "sbt", node = id.index(), tick, "start");
            self.emit(TraceEvent::node_start(tick, id));
        }
    }

    /// Run `f` against the hook state of node `id`, writing back any status it set.
    fn with_cx<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Kind<T>, &mut NodeCx<'_, T>) -> R) -> R {
        let Tree {
            nodes,
            agenda,
            context,
            rng,
            faults,
            dt,
            ..
        } = self;
        let clock = TickContext {
            tick: agenda.tick(),
            dt: *dt,
        };
        let Node {
            name,
            children,
            kind,
            status,
            last_change_tick,
            ..
        } = &mut nodes[id.index()];
        let mut cx = NodeCx::new(id, name, children, *status, clock, agenda, rng, context, faults);
        let out = f(kind, &mut cx);
        if let Some(written) = cx.written() {
            *status = written;
            *last_change_tick = clock.tick;
        }
        out
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("context", &self.context)
            .field("nodes", &self.nodes)
            .field("roots", &self.roots)
            .field("active", &self.agenda.active())
            .field("tick", &self.agenda.tick())
            .finish()
    }
}
