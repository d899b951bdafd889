//! Decorator nodes: own exactly one child and transform its result.
//!
//! A decorator closes itself on the build cursor as soon as it receives its
//! child, so the childless case only shows up in hand-broken trees; it is
//! reported and concludes with Fail.

use crate::node::{Behavior, NodeCx};
use crate::Status;

/// INVERT swaps Success and Fail of its child; Running passes through.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Invert;

impl<T> Behavior<T> for Invert {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        if cx.start_decorated().is_some() {
            cx.set_status(Status::Running);
        }
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        cx.set_status(child.invert());
    }
}

/// OVERRIDE reports a fixed status once its child is no longer Running.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Override {
    fixed: Status,
}

impl Override {
    pub(crate) fn new(fixed: Status) -> Self {
        Self { fixed }
    }

    pub(crate) fn fixed(&self) -> Status {
        self.fixed
    }
}

impl<T> Behavior<T> for Override {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        if cx.start_decorated().is_some() {
            cx.set_status(Status::Running);
        }
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        cx.set_status(if child.is_running() {
            Status::Running
        } else {
            self.fixed
        });
    }
}

/// REPEAT restarts its child every tick until the child fails.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Repeat {
    child_running: bool,
}

impl<T> Behavior<T> for Repeat {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        restart_loop(&mut self.child_running, cx);
    }

    fn on_tick(&mut self, cx: &mut NodeCx<'_, T>) {
        reschedule(self.child_running, cx);
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        self.child_running = child.is_running();
        if child.is_fail() {
            cx.set_status(Status::Fail);
        }
    }
}

/// RETRY restarts its child every tick until the child succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Retry {
    child_running: bool,
}

impl<T> Behavior<T> for Retry {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        restart_loop(&mut self.child_running, cx);
    }

    fn on_tick(&mut self, cx: &mut NodeCx<'_, T>) {
        reschedule(self.child_running, cx);
    }

    fn on_child_report(&mut self, child: Status, cx: &mut NodeCx<'_, T>) {
        self.child_running = child.is_running();
        if child.is_success() {
            cx.set_status(Status::Success);
        }
    }
}

// Repeat/Retry only go Running on start; the child is (re)scheduled from on_tick.
fn restart_loop<T>(child_running: &mut bool, cx: &mut NodeCx<'_, T>) {
    *child_running = false;
    if cx.children().is_empty() {
        cx.start_decorated();
        return;
    }
    cx.set_status(Status::Running);
}

fn reschedule<T>(child_running: bool, cx: &mut NodeCx<'_, T>) {
    if child_running || !cx.status().is_running() {
        return;
    }
    if let Some(&child) = cx.children().first() {
        cx.schedule(child);
    }
}
