use sbt_core::{Status, Tree, TreeConfig};
use sbt_tools::{dump, DumpOptions};

fn guard() -> Tree<()> {
    let mut tree = Tree::with_config((), TreeConfig::seeded(4));
    tree.sequence().invert().fail().wait(1.0).end();
    tree
}

#[test]
fn plain_dump_indents_children_and_inlines_decorators() {
    let tree = guard();
    assert_eq!(
        dump(&tree, &DumpOptions::default()),
        "sequence\n   invert . fail\n   wait 1\n"
    );
}

#[test]
fn tab_width_controls_indentation() {
    let tree = guard();
    let options = DumpOptions {
        tab_width: 0,
        ..DumpOptions::default()
    };
    assert_eq!(dump(&tree, &options), "sequence\ninvert . fail\nwait 1\n");
}

#[test]
fn composite_under_decorator_keeps_its_depth() {
    let mut tree = Tree::with_config((), TreeConfig::seeded(4));
    tree.repeat().sequence().name("loop").success().end();
    assert_eq!(
        dump(&tree, &DumpOptions::default()),
        "repeat . loop\n   success\n"
    );
}

#[test]
fn rich_text_highlights_fresh_non_failed_nodes() {
    let mut tree = guard();
    let options = DumpOptions {
        rich_text: true,
        ..DumpOptions::default()
    };

    // Nothing has run yet: every node is Fail.
    assert_eq!(dump(&tree, &options), dump(&tree, &DumpOptions::default()));

    assert_eq!(tree.tick(0.5), Status::Running);
    assert_eq!(
        dump(&tree, &options),
        "<color=#00ff00>sequence</color>\n   \
         <color=#00ff00>invert</color> . fail\n   \
         <color=#00ff00>wait 1</color>\n"
    );
}

#[test]
fn rich_text_highlight_fades_out() {
    let mut tree = Tree::with_config((), TreeConfig::seeded(4));
    tree.success();
    tree.tick(0.1);

    let options = DumpOptions {
        rich_text: true,
        colored_age_ticks: 2,
        ..DumpOptions::default()
    };
    assert_eq!(dump(&tree, &options), "<color=#00ff00>success</color>\n");

    // An empty worklist restarts the root, which rewrites its status.
    tree.tick(0.1);
    assert_eq!(dump(&tree, &options), "<color=#00ff00>success</color>\n");

    let mut idle = Tree::with_config((), TreeConfig::seeded(4));
    idle.success().wait(10.0);
    idle.tick(0.1);
    idle.tick_root(0.1, 1);
    idle.tick_root(0.1, 1);
    // Root 0 changed on tick 1 and it is now tick 3.
    assert_eq!(dump(&idle, &options), "success\n");
}

#[test]
fn unknown_root_renders_nothing() {
    let tree = guard();
    let options = DumpOptions {
        root_index: 1,
        ..DumpOptions::default()
    };
    assert_eq!(dump(&tree, &options), "");
}
