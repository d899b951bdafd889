//! The demo tree: a guard walking between waypoints who drops everything to
//! investigate when an alarm goes off.

use sbt_core::{Leaf, Status, TickContext, Tree, TreeConfig};

/// Simulation seconds after which the alarm sounds (once).
const ALARM_AT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GuardPost {
    pub clock: f64,
    pub alarm: bool,
    alarm_armed: bool,
    pub position: f64,
    pub waypoints: Vec<f64>,
    pub next_waypoint: usize,
    pub alerts: u32,
    pub glances: u32,
}

impl Default for GuardPost {
    fn default() -> Self {
        Self {
            clock: 0.0,
            alarm: false,
            alarm_armed: true,
            position: 0.0,
            waypoints: vec![2.0, -1.0],
            next_waypoint: 0,
            alerts: 0,
            glances: 0,
        }
    }
}

impl GuardPost {
    /// Move the world clock forward; trips the alarm once it is due.
    pub fn advance(&mut self, dt: f64) {
        self.clock += dt;
        if self.alarm_armed && self.clock >= ALARM_AT {
            self.alarm_armed = false;
            self.alarm = true;
        }
    }
}

/// Walks towards the current waypoint at `speed` units per second.
struct Walk {
    speed: f64,
}

impl Leaf<GuardPost> for Walk {
    fn on_tick(&mut self, tick: &TickContext, post: &mut GuardPost) -> Status {
        let Some(&target) = post.waypoints.get(post.next_waypoint) else {
            return Status::Fail;
        };
        let step = self.speed * tick.dt;
        let delta = target - post.position;
        if delta.abs() <= step {
            post.position = target;
            post.next_waypoint = (post.next_waypoint + 1) % post.waypoints.len();
            Status::Success
        } else {
            post.position += step.copysign(delta);
            Status::Running
        }
    }

    fn clone_leaf(&self) -> Box<dyn Leaf<GuardPost>> {
        Box::new(Walk { speed: self.speed })
    }
}

/// The patrol leg, built as its own tree and grafted into the guard.
fn patrol(config: &TreeConfig) -> Tree<GuardPost> {
    let mut patrol = Tree::with_config(GuardPost::default(), config.clone());
    patrol
        .sequence()
        .name("patrol")
        .leaf(Walk { speed: 2.0 })
        .name("walk")
        .random_selector()
        .name("idle")
        .wait(0.5)
        .effect(|_, post: &mut GuardPost| post.glances += 1, Status::Success)
        .name("look around")
        .end()
        .end();
    patrol
}

pub fn guard_tree(config: TreeConfig) -> Tree<GuardPost> {
    let patrol = patrol(&config);

    let mut tree = Tree::with_config(GuardPost::default(), config);
    tree.repeat()
        .name("shift")
        .selector()
        .name("guard")
        .sequence()
        .name("respond")
        .condition(|post: &GuardPost| post.alarm)
        .name("alarm?")
        .effect(|_, post: &mut GuardPost| post.alerts += 1, Status::Success)
        .name("sound alarm")
        .wait(1.0)
        .name("investigate")
        .effect(|_, post: &mut GuardPost| post.alarm = false, Status::Success)
        .name("stand down")
        .end()
        .insert_tree(&patrol)
        .end();
    tree
}
