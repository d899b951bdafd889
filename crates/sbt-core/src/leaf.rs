//! Terminal nodes: fixed results, callback actions, timed waits and user leaves.

use std::rc::Rc;

use crate::node::{Behavior, NodeCx};
use crate::{Status, TickContext};

/// A user-defined terminal node.
///
/// `on_start` runs whenever the leaf is evaluated while not Running; `on_tick`
/// runs on every evaluation and returns the new status. Grafting copies a leaf
/// through `clone_leaf`, which should carry configuration but no progress.
///
/// ```
/// use sbt_core::{Leaf, Status, TickContext, Tree, TreeConfig};
///
/// struct Countdown { from: u32, left: u32 }
///
/// impl Leaf<()> for Countdown {
///     fn on_start(&mut self, _tick: &TickContext, _ctx: &mut ()) {
///         self.left = self.from;
///     }
///
///     fn on_tick(&mut self, _tick: &TickContext, _ctx: &mut ()) -> Status {
///         self.left = self.left.saturating_sub(1);
///         if self.left == 0 { Status::Success } else { Status::Running }
///     }
///
///     fn clone_leaf(&self) -> Box<dyn Leaf<()>> {
///         Box::new(Countdown { from: self.from, left: 0 })
///     }
/// }
///
/// let mut tree = Tree::with_config((), TreeConfig::seeded(1));
/// tree.leaf(Countdown { from: 2, left: 0 }).name("countdown");
/// assert_eq!(tree.tick(0.1), Status::Running);
/// assert_eq!(tree.tick(0.1), Status::Success);
/// ```
pub trait Leaf<T>: 'static {
    fn on_start(&mut self, _tick: &TickContext, _ctx: &mut T) {}

    fn on_tick(&mut self, tick: &TickContext, ctx: &mut T) -> Status;

    fn clone_leaf(&self) -> Box<dyn Leaf<T>>;
}

pub(crate) type StartFn<T> = Rc<dyn Fn(&TickContext, &mut T)>;
pub(crate) type RunFn<T> = Rc<dyn Fn(&TickContext, &mut T) -> Status>;

/// SUCCESS / FAIL: concludes with a fixed status as soon as it starts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fixed(pub(crate) Status);

impl<T> Behavior<T> for Fixed {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        cx.set_status(self.0);
    }
}

/// ACTION: optional start callback plus a run callback evaluated every tick.
///
/// Callbacks are shared, not duplicated, when the node is grafted.
pub(crate) struct Action<T> {
    start: Option<StartFn<T>>,
    run: RunFn<T>,
}

impl<T> Action<T> {
    pub(crate) fn new(start: Option<StartFn<T>>, run: RunFn<T>) -> Self {
        Self { start, run }
    }
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            run: Rc::clone(&self.run),
        }
    }
}

impl<T> Behavior<T> for Action<T> {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        if let Some(start) = &self.start {
            let clock = cx.clock();
            start(&clock, cx.context());
        }
    }

    fn on_tick(&mut self, cx: &mut NodeCx<'_, T>) {
        let clock = cx.clock();
        let status = (self.run)(&clock, cx.context());
        cx.set_status(status);
    }
}

/// WAIT: Running until the accumulated tree delta reaches `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Wait {
    duration: f64,
    remaining: f64,
}

impl Wait {
    pub(crate) fn new(duration: f64) -> Self {
        Self {
            duration,
            remaining: duration,
        }
    }

    pub(crate) fn duration(&self) -> f64 {
        self.duration
    }

    /// Debug name: `wait 1.5`, at most two decimals.
    pub(crate) fn default_name(duration: f64) -> String {
        let formatted = format!("{duration:.2}");
        let trimmed = if formatted.contains('.') {
            formatted.trim_end_matches('0').trim_end_matches('.')
        } else {
            formatted.as_str()
        };
        format!("wait {trimmed}")
    }
}

impl<T> Behavior<T> for Wait {
    fn on_start(&mut self, _cx: &mut NodeCx<'_, T>) {
        self.remaining = self.duration;
    }

    fn on_tick(&mut self, cx: &mut NodeCx<'_, T>) {
        self.remaining -= cx.clock().dt;
        cx.set_status(if self.remaining <= 0.0 {
            Status::Success
        } else {
            Status::Running
        });
    }
}

pub(crate) struct Custom<T>(pub(crate) Box<dyn Leaf<T>>);

impl<T: 'static> Custom<T> {
    pub(crate) fn fresh_copy(&self) -> Self {
        Custom(self.0.clone_leaf())
    }
}

impl<T: 'static> Behavior<T> for Custom<T> {
    fn on_start(&mut self, cx: &mut NodeCx<'_, T>) {
        let clock = cx.clock();
        self.0.on_start(&clock, cx.context());
    }

    fn on_tick(&mut self, cx: &mut NodeCx<'_, T>) {
        let clock = cx.clock();
        let status = self.0.on_tick(&clock, cx.context());
        cx.set_status(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_names_trim_trailing_zeros() {
        assert_eq!(Wait::default_name(1.0), "wait 1");
        assert_eq!(Wait::default_name(1.5), "wait 1.5");
        assert_eq!(Wait::default_name(1.0 / 3.0), "wait 0.33");
        assert_eq!(Wait::default_name(2.25), "wait 2.25");
    }
}
