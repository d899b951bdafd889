//! Composite nodes: own an ordered list of children and aggregate their results.
//!
//! All composite logic lives in `on_start` and `on_child_report`; `on_tick` is a
//! no-op. When a composite concludes, its still-running children are retired by
//! the engine's removal pass, not here.

use crate::node::{Behavior, NodeCx};
use crate::Status;

/// SEQUENCE runs its children one by one until the first one fails.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Sequence {
    index: usize,
}

impl<T> Behavior<T> for Sequence {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        let Some(&first) = cx.children().first() else {
            cx.fail_empty_composite();
            return;
        };
        cx.set_status(Status::Running);
        self.index = 0;
        cx.schedule(first);
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        advance(&mut self.index, child, Status::Fail, cx);
    }
}

/// SELECTOR (fallback) runs its children one by one until the first one succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Selector {
    index: usize,
}

impl<T> Behavior<T> for Selector {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        let Some(&first) = cx.children().first() else {
            cx.fail_empty_composite();
            return;
        };
        cx.set_status(Status::Running);
        self.index = 0;
        cx.schedule(first);
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        advance(&mut self.index, child, Status::Success, cx);
    }
}

/// Shared stepping of Sequence/Selector: adopt the child's result on `stop` or
/// after the last child, otherwise schedule the next child within this tick.
fn advance<T>(index: &mut usize, child: Status, stop: Status, cx: &mut NodeCx<'_, T>) {
    if child.is_running() {
        return;
    }
    let children = cx.children();
    *index += 1;
    match children.get(*index) {
        Some(&next) if child != stop => {
            cx.schedule(next);
        }
        _ => cx.set_status(child),
    }
}

/// PARALLEL starts all children at once; succeeds when all succeed, fails as soon
/// as one fails.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Parallel {
    successes: usize,
}

impl<T> Behavior<T> for Parallel {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        if cx.children().is_empty() {
            cx.fail_empty_composite();
            return;
        }
        cx.set_status(Status::Running);
        self.successes = 0;
        for &child in cx.children() {
            cx.schedule(child);
        }
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        match child {
            Status::Success => {
                self.successes += 1;
                if self.successes == cx.children().len() {
                    cx.set_status(Status::Success);
                }
            }
            Status::Fail => cx.set_status(Status::Fail),
            Status::Running => {}
        }
    }
}

/// RACE starts all children at once (last child first); succeeds as soon as one
/// succeeds, fails when all fail.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Race {
    failures: usize,
}

impl<T> Behavior<T> for Race {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        if cx.children().is_empty() {
            cx.fail_empty_composite();
            return;
        }
        cx.set_status(Status::Running);
        self.failures = 0;
        for &child in cx.children().iter().rev() {
            cx.schedule(child);
        }
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        match child {
            Status::Success => cx.set_status(Status::Success),
            Status::Fail => {
                self.failures += 1;
                if self.failures == cx.children().len() {
                    cx.set_status(Status::Fail);
                }
            }
            Status::Running => {}
        }
    }
}

/// RANDOM SELECTOR picks one child uniformly and returns whatever it returns.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RandomSelector;

impl<T> Behavior<T> for RandomSelector {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        let count = cx.children().len();
        if count == 0 {
            cx.fail_empty_composite();
            return;
        }
        cx.set_status(Status::Running);
        let pick = cx.children()[cx.random_index(count)];
        cx.schedule(pick);
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        cx.set_status(child);
    }
}
