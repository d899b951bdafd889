//! Fluent construction.
//!
//! Every call appends one node at the build cursor: as the next child of the open
//! composite, as the child of the open decorator (which then closes), or as a new
//! root when nothing is open. Composites stay open until [`Tree::end`].
//!
//! ```
//! use sbt_core::{Status, Tree, TreeConfig};
//!
//! let mut tree = Tree::with_config(0u32, TreeConfig::seeded(7));
//! tree.sequence()
//!     .name("greet")
//!     .effect(|_, n: &mut u32| *n += 1, Status::Success)
//!     .wait(0.5)
//!     .end();
//!
//! assert_eq!(tree.tick(0.25), Status::Running);
//! assert_eq!(tree.tick(0.25), Status::Success);
//! assert_eq!(*tree.context(), 1);
//! ```

use std::rc::Rc;

use crate::composite::{Parallel, Race, RandomSelector, Selector, Sequence};
use crate::decorator::{Invert, Override, Repeat, Retry};
use crate::error::BuildError;
use crate::leaf::{Action, Custom, Fixed, Wait};
use crate::node::{Kind, Node, NodeClass, NodeId};
use crate::{Leaf, Status, TickContext, Tree};

impl<T: 'static> Tree<T> {
    /// Run children in order until one fails. Close with [`Tree::end`].
    pub fn sequence(&mut self) -> &mut Self {
        self.register("sequence", Kind::Sequence(Sequence::default()))
    }

    /// Run children in order until one succeeds. Close with [`Tree::end`].
    pub fn selector(&mut self) -> &mut Self {
        self.register("selector", Kind::Selector(Selector::default()))
    }

    /// Run all children at once until one fails or all succeed. Close with [`Tree::end`].
    pub fn parallel(&mut self) -> &mut Self {
        self.register("parallel", Kind::Parallel(Parallel::default()))
    }

    /// Run all children at once until one succeeds or all fail. Close with [`Tree::end`].
    pub fn race(&mut self) -> &mut Self {
        self.register("race", Kind::Race(Race::default()))
    }

    /// Run one child chosen at random. Close with [`Tree::end`].
    pub fn random_selector(&mut self) -> &mut Self {
        self.register("random selector", Kind::RandomSelector(RandomSelector))
    }

    pub fn invert(&mut self) -> &mut Self {
        self.register("invert", Kind::Invert(Invert))
    }

    /// Report `status` whenever the child is no longer Running.
    pub fn override_with(&mut self, status: Status) -> &mut Self {
        self.register("override", Kind::Override(Override::new(status)))
    }

    /// Restart the child until it fails.
    pub fn repeat(&mut self) -> &mut Self {
        self.register("repeat", Kind::Repeat(Repeat::default()))
    }

    /// Restart the child until it succeeds.
    pub fn retry(&mut self) -> &mut Self {
        self.register("retry", Kind::Retry(Retry::default()))
    }

    pub fn success(&mut self) -> &mut Self {
        self.register("success", Kind::Fixed(Fixed(Status::Success)))
    }

    pub fn fail(&mut self) -> &mut Self {
        self.register("fail", Kind::Fixed(Fixed(Status::Fail)))
    }

    /// Running until `seconds` of tree delta have accumulated, then Success.
    pub fn wait(&mut self, seconds: f64) -> &mut Self {
        self.register(Wait::default_name(seconds), Kind::Wait(Wait::new(seconds)))
    }

    /// A callback evaluated every tick; its return value becomes the node status.
    pub fn action(&mut self, run: impl Fn(&TickContext, &mut T) -> Status + 'static) -> &mut Self {
        self.register("action", Kind::Action(Action::new(None, Rc::new(run))))
    }

    /// Like [`Tree::action`], with `start` called whenever the node (re)starts.
    pub fn action_with_start(
        &mut self,
        start: impl Fn(&TickContext, &mut T) + 'static,
        run: impl Fn(&TickContext, &mut T) -> Status + 'static,
    ) -> &mut Self {
        self.register(
            "action",
            Kind::Action(Action::new(Some(Rc::new(start)), Rc::new(run))),
        )
    }

    /// Success when the predicate holds, Fail otherwise.
    pub fn condition(&mut self, pred: impl Fn(&T) -> bool + 'static) -> &mut Self {
        let run = move |_: &TickContext, ctx: &mut T| Status::from(pred(ctx));
        self.register("condition", Kind::Action(Action::new(None, Rc::new(run))))
    }

    /// Run a side effect and always report `result`.
    pub fn effect(
        &mut self,
        f: impl Fn(&TickContext, &mut T) + 'static,
        result: Status,
    ) -> &mut Self {
        let run = move |tick: &TickContext, ctx: &mut T| {
            f(tick, ctx);
            result
        };
        self.register("action", Kind::Action(Action::new(None, Rc::new(run))))
    }

    pub fn leaf(&mut self, leaf: impl Leaf<T>) -> &mut Self {
        self.register("leaf", Kind::Custom(Custom(Box::new(leaf))))
    }

    /// Rename the most recently added node (debug name only).
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        if let Some(id) = self.last_built {
            self.nodes[id.index()].name = name.into();
        }
        self
    }

    /// Close the open composite.
    pub fn end(&mut self) -> &mut Self {
        let Some(&open) = self.cursor.last() else {
            self.report(BuildError::TooManyEnds);
            return self;
        };
        let node = &self.nodes[open.index()];
        if node.class() != NodeClass::Composite {
            self.report(BuildError::EndWithoutComposite);
            return self;
        }
        if node.children.is_empty() {
            let name = node.name.clone();
            self.report(BuildError::EmptyComposite { name });
            return self;
        }
        self.cursor.pop();
        self
    }

    fn register(&mut self, name: impl Into<String>, kind: Kind<T>) -> &mut Self {
        let parent = self.cursor.last().copied();
        let id = self.push_node(Node::new(name.into(), kind, parent));
        self.attach(id);
        self
    }

    /// Hook a freshly created node into the structure at the cursor and open it
    /// if it is structural.
    pub(crate) fn attach(&mut self, id: NodeId) {
        match self.cursor.last().copied() {
            Some(open) => {
                let parent = &mut self.nodes[open.index()];
                parent.children.push(id);
                if parent.class() == NodeClass::Decorator {
                    self.cursor.pop();
                }
                self.nodes[id.index()].parent = Some(open);
            }
            None => self.roots.push(id),
        }
        if self.nodes[id.index()].class().is_structural() {
            self.cursor.push(id);
        }
        self.last_built = Some(id);
        tracing::trace!(target: "sbt", node = id.index(), name = %self.nodes[id.index()].name, "register");
    }
}
