use std::cell::RefCell;
use std::rc::Rc;

use sbt_core::trace::{NODE_RETIRE, NODE_START, RESUMED, TICK_BEGIN, TICK_END};
use sbt_core::{NullTraceSink, Status, TraceEvent, TraceLog, TraceSink, Tree, TreeConfig};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<TraceLog>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

fn traced() -> (Tree<()>, Rc<RefCell<TraceLog>>) {
    let handle = RcSink::default();
    let shared = handle.0.clone();
    let tree = Tree::with_config((), TreeConfig::seeded(2)).with_trace_sink(Box::new(handle));
    (tree, shared)
}

fn ids(log: &TraceLog, tag: &str) -> Vec<u64> {
    log.with_tag(tag).map(|e| e.a).collect()
}

#[test]
fn sequence_trace_records_starts_retirements_and_passes() {
    let (mut tree, shared) = traced();
    tree.sequence().success().success().end();
    assert_eq!(tree.tick(0.1), Status::Success);

    let log = shared.borrow();
    assert_eq!(log.events.first().map(|e| e.tag.as_ref()), Some(TICK_BEGIN));
    assert_eq!(log.events[0].a, 0);
    assert_eq!(ids(&log, NODE_START), vec![0, 1, 2]);
    // The sequence is retired before its second child: retirements drain LIFO.
    assert_eq!(ids(&log, NODE_RETIRE), vec![1, 0, 2]);
    assert!(log
        .with_tag(NODE_RETIRE)
        .all(|e| e.b == Status::Success.code()));

    let end = log.events.last().unwrap();
    assert_eq!(end.tag, TICK_END);
    assert_eq!(end.tick, 1);
    assert_eq!(end.a, 2);
    assert_eq!(end.b, Status::Success.code());
}

#[test]
fn resumed_tick_marks_begin_and_skips_start() {
    let (mut tree, shared) = traced();
    tree.wait(1.0);
    tree.tick(0.5);
    tree.tick(0.5);

    let log = shared.borrow();
    let begins: Vec<_> = log.with_tag(TICK_BEGIN).map(|e| (e.tick, e.a)).collect();
    assert_eq!(begins, vec![(1, 0), (2, RESUMED)]);
    assert_eq!(ids(&log, NODE_START), vec![0]);

    let ends: Vec<_> = log.with_tag(TICK_END).map(|e| e.b).collect();
    assert_eq!(
        ends,
        vec![Status::Running.code(), Status::Success.code()]
    );
}

#[test]
fn forced_retirement_is_traced_as_fail() {
    let (mut tree, shared) = traced();
    tree.parallel().wait(5.0).fail().end();
    assert_eq!(tree.tick(0.1), Status::Fail);

    let log = shared.borrow();
    let retired: Vec<_> = log.with_tag(NODE_RETIRE).map(|e| (e.a, e.b)).collect();
    let fail = Status::Fail.code();
    // The parallel goes first; it then forces the running wait out before the
    // already-queued fail leaf is drained.
    assert_eq!(retired, vec![(0, fail), (1, fail), (2, fail)]);
}

#[test]
fn trace_sink_can_be_swapped_out() {
    let (mut tree, shared) = traced();
    tree.success();

    let previous = tree.set_trace_sink(None);
    assert!(previous.is_some());
    tree.tick(0.1);
    assert!(shared.borrow().events.is_empty());
}

#[test]
fn trace_log_splits_events_by_tick() {
    let (mut tree, shared) = traced();
    tree.wait(0.5);
    tree.tick(0.25);
    tree.tick(0.25);

    let log = shared.borrow();
    let first: Vec<_> = log.at_tick(1).map(|e| e.tag.as_ref()).collect();
    assert_eq!(first, vec![TICK_BEGIN, NODE_START, TICK_END]);
    let second: Vec<_> = log.at_tick(2).map(|e| e.tag.as_ref()).collect();
    assert_eq!(second, vec![TICK_BEGIN, NODE_RETIRE, TICK_END]);
    drop(log);

    shared.borrow_mut().clear();
    assert!(shared.borrow().events.is_empty());
}

#[test]
fn null_sink_swallows_events() {
    let mut tree =
        Tree::with_config((), TreeConfig::seeded(2)).with_trace_sink(Box::new(NullTraceSink));
    tree.sequence().success().end();
    assert_eq!(tree.tick(0.1), Status::Success);

    let previous = tree.set_trace_sink(Some(Box::new(TraceLog::default())));
    assert!(previous.is_some());
    assert_eq!(tree.tick(0.1), Status::Success);
}
