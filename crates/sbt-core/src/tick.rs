/// Timing information of the tick in progress, as seen by leaf callbacks.
///
/// Leaves never receive the delta from their parent: every node of a tree (and of
/// any grafted subtree) reads the same value recorded by [`crate::Tree::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt: f64,
}
