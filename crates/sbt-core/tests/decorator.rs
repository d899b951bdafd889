use sbt_core::{Status, Tree, TreeConfig};

#[derive(Debug, Default)]
struct Counter {
    starts: u32,
    ticks: u32,
    flip_at: u32,
}

fn tree() -> Tree<Counter> {
    Tree::with_config(Counter::default(), TreeConfig::seeded(3))
}

#[test]
fn invert_swaps_terminal_results() {
    let mut tree = tree();
    tree.invert().success();
    assert_eq!(tree.tick(0.1), Status::Fail);

    let mut tree = self::tree();
    tree.invert().fail();
    assert_eq!(tree.tick(0.1), Status::Success);
}

#[test]
fn double_invert_is_identity() {
    for leaf in [Status::Success, Status::Fail] {
        let mut tree = tree();
        tree.invert().invert().action(move |_, _| leaf);
        assert_eq!(tree.tick(0.1), leaf);
    }
}

#[test]
fn invert_passes_running_through() {
    let mut tree = tree();
    tree.invert().wait(1.0);
    assert_eq!(tree.tick(0.5), Status::Running);
    assert_eq!(tree.node(tree.roots()[0]).unwrap().status(), Status::Running);
    assert_eq!(tree.tick(0.5), Status::Fail);
}

#[test]
fn override_clamps_terminal_results_only() {
    let mut tree = tree();
    tree.override_with(Status::Success).fail();
    assert_eq!(tree.tick(0.1), Status::Success);

    let mut tree = self::tree();
    tree.override_with(Status::Fail).wait(1.0);
    assert_eq!(tree.tick(0.5), Status::Running);
    assert_eq!(tree.tick(0.5), Status::Fail);
}

#[test]
fn repeat_restarts_child_every_tick_until_it_fails() {
    let mut tree = tree();
    tree.context_mut().flip_at = 3;
    tree.repeat().action(|_, c: &mut Counter| {
        c.ticks += 1;
        if c.ticks >= c.flip_at {
            Status::Fail
        } else {
            Status::Success
        }
    });

    assert_eq!(tree.tick(0.1), Status::Running);
    assert_eq!(tree.context().ticks, 1);
    assert_eq!(tree.tick(0.1), Status::Running);
    assert_eq!(tree.context().ticks, 2);
    assert_eq!(tree.tick(0.1), Status::Fail);
    assert_eq!(tree.context().ticks, 3);
    assert!(tree.active_nodes().is_empty());
}

#[test]
fn repeat_stays_running_while_child_never_fails() {
    let mut tree = tree();
    tree.repeat().success();
    for _ in 0..10 {
        assert_eq!(tree.tick(0.1), Status::Running);
        assert_eq!(tree.active_nodes().len(), 1);
    }
}

#[test]
fn repeat_does_not_restart_a_running_child() {
    let mut tree = tree();
    tree.repeat().action_with_start(
        |_, c: &mut Counter| c.starts += 1,
        |_, c: &mut Counter| {
            c.ticks += 1;
            if c.ticks % 2 == 0 {
                Status::Success
            } else {
                Status::Running
            }
        },
    );

    for _ in 0..4 {
        assert_eq!(tree.tick(0.1), Status::Running);
    }
    assert_eq!(tree.context().ticks, 4);
    assert_eq!(tree.context().starts, 2);
}

#[test]
fn retry_restarts_child_until_it_succeeds() {
    let mut tree = tree();
    tree.context_mut().flip_at = 4;
    tree.retry().action(|_, c: &mut Counter| {
        c.ticks += 1;
        Status::from(c.ticks >= c.flip_at)
    });

    for expected in 1..4 {
        assert_eq!(tree.tick(0.1), Status::Running);
        assert_eq!(tree.context().ticks, expected);
    }
    assert_eq!(tree.tick(0.1), Status::Success);
    assert!(tree.active_nodes().is_empty());
}

#[test]
fn decorator_closes_after_its_child() {
    let mut tree = tree();
    tree.sequence().invert().fail().success().end();

    let root = tree.roots()[0];
    assert_eq!(tree.node(root).unwrap().children().len(), 2);
    assert_eq!(tree.tick(0.1), Status::Success);
}
