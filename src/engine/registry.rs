//! Node registry - the arena of evaluation contexts.
//!
//! A [`Node`] is one re-evaluable scope of a view tree. Nodes live in a
//! thread-local arena and are addressed by generational handles:
//! - Released slots go to a free pool for O(1) reuse
//! - Every release bumps the slot's generation, so stale handles read as dead
//! - Children are keyed by their position in the parent's body, so the same
//!   position yields the same node across rebuilds
//!
//! The evaluation stack records which node's body is currently running.
//! State reads consult [`current_node`] to know who depends on them.

use std::cell::RefCell;
use std::collections::BTreeMap;

use bitflags::bitflags;

bitflags! {
    /// Per-slot flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        const ALIVE = 1 << 0;
        const NEEDS_REBUILD = 1 << 1;
        /// Reached during the parent's current evaluation.
        const VISITED = 1 << 2;
    }
}

/// Handle to an evaluation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    index: u32,
    generation: u32,
}

impl Node {
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    flags: NodeFlags,
    parent: Option<Node>,
    children: BTreeMap<usize, Node>,
}

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    static SLOTS: RefCell<Vec<Slot>> = const { RefCell::new(Vec::new()) };

    /// Pool of released indices for reuse.
    static FREE_INDICES: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };

    /// Nodes whose bodies are being evaluated, innermost last.
    static EVAL_STACK: RefCell<Vec<Node>> = const { RefCell::new(Vec::new()) };
}

/// Run `f` on the slot `node` refers to, if it is still alive.
fn with_live_slot<R>(node: Node, f: impl FnOnce(&mut Slot) -> R) -> Option<R> {
    SLOTS.with(|slots| {
        let mut slots = slots.borrow_mut();
        let slot = slots.get_mut(node.index())?;
        if slot.generation != node.generation || !slot.flags.contains(NodeFlags::ALIVE) {
            return None;
        }
        Some(f(slot))
    })
}

// =============================================================================
// Allocation
// =============================================================================

fn allocate(parent: Option<Node>) -> Node {
    let reused = FREE_INDICES.with(|free| free.borrow_mut().pop());

    SLOTS.with(|slots| {
        let mut slots = slots.borrow_mut();
        let index = match reused {
            Some(index) => index,
            None => {
                slots.push(Slot::default());
                (slots.len() - 1) as u32
            }
        };
        let slot = &mut slots[index as usize];
        slot.flags = NodeFlags::ALIVE | NodeFlags::VISITED;
        slot.parent = parent;
        slot.children.clear();
        Node {
            index,
            generation: slot.generation,
        }
    })
}

/// Create a root node.
pub fn create_node() -> Node {
    allocate(None)
}

/// The child of `parent` at `position`, created on first use.
///
/// Returns a detached node if `parent` is dead.
pub fn child_node(parent: Node, position: usize) -> Node {
    let existing = with_live_slot(parent, |slot| slot.children.get(&position).copied());
    let Some(existing) = existing else {
        return allocate(None);
    };

    if let Some(child) = existing {
        if with_live_slot(child, |slot| slot.flags.insert(NodeFlags::VISITED)).is_some() {
            return child;
        }
    }

    let child = allocate(Some(parent));
    with_live_slot(parent, |slot| slot.children.insert(position, child));
    child
}

/// Release `node` and all its descendants.
pub fn release_node(node: Node) {
    let Some((parent, children)) = with_live_slot(node, |slot| {
        (slot.parent, std::mem::take(&mut slot.children))
    }) else {
        return;
    };

    for child in children.into_values() {
        release_node(child);
    }

    if let Some(parent) = parent {
        with_live_slot(parent, |slot| slot.children.retain(|_, child| *child != node));
    }

    with_live_slot(node, |slot| {
        slot.flags = NodeFlags::empty();
        slot.parent = None;
        slot.generation = slot.generation.wrapping_add(1);
    });
    FREE_INDICES.with(|free| free.borrow_mut().push(node.index));

    tracing::debug!(index = node.index, generation = node.generation, "released node");
}

// =============================================================================
// Flags
// =============================================================================

pub fn is_alive(node: Node) -> bool {
    with_live_slot(node, |_| ()).is_some()
}

pub fn needs_rebuild(node: Node) -> bool {
    with_live_slot(node, |slot| slot.flags.contains(NodeFlags::NEEDS_REBUILD)).unwrap_or(false)
}

/// Flag `node` for rebuild. Returns `false` if the node is dead.
pub fn mark_needs_rebuild(node: Node) -> bool {
    with_live_slot(node, |slot| slot.flags.insert(NodeFlags::NEEDS_REBUILD)).is_some()
}

/// Whether `node` or any of its descendants needs a rebuild.
pub fn subtree_needs_rebuild(node: Node) -> bool {
    let Some((dirty, children)) = with_live_slot(node, |slot| {
        (
            slot.flags.contains(NodeFlags::NEEDS_REBUILD),
            slot.children.values().copied().collect::<Vec<_>>(),
        )
    }) else {
        return false;
    };
    dirty || children.into_iter().any(subtree_needs_rebuild)
}

/// Every live node flagged for rebuild, in index order.
pub fn dirty_nodes() -> Vec<Node> {
    SLOTS.with(|slots| {
        slots
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.flags.contains(NodeFlags::ALIVE | NodeFlags::NEEDS_REBUILD))
            .map(|(index, slot)| Node {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    })
}

// =============================================================================
// Tree
// =============================================================================

pub fn parent(node: Node) -> Option<Node> {
    with_live_slot(node, |slot| slot.parent).flatten()
}

/// Live children in position order.
pub fn children(node: Node) -> Vec<Node> {
    with_live_slot(node, |slot| slot.children.values().copied().collect()).unwrap_or_default()
}

pub fn live_node_count() -> usize {
    SLOTS.with(|slots| {
        slots
            .borrow()
            .iter()
            .filter(|slot| slot.flags.contains(NodeFlags::ALIVE))
            .count()
    })
}

// =============================================================================
// Evaluation
// =============================================================================

/// The node whose body is currently being evaluated.
pub fn current_node() -> Option<Node> {
    EVAL_STACK.with(|stack| stack.borrow().last().copied())
}

struct EvalGuard;

impl Drop for EvalGuard {
    fn drop(&mut self) {
        EVAL_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Evaluate `node`'s body.
///
/// Clears the node's rebuild flag and makes it the current node while
/// `body` runs. Children the body no longer reaches are released
/// afterwards.
pub fn evaluate<R>(node: Node, body: impl FnOnce() -> R) -> R {
    let children = with_live_slot(node, |slot| {
        slot.flags.remove(NodeFlags::NEEDS_REBUILD);
        slot.children.values().copied().collect::<Vec<_>>()
    })
    .unwrap_or_default();
    for child in &children {
        with_live_slot(*child, |slot| slot.flags.remove(NodeFlags::VISITED));
    }

    EVAL_STACK.with(|stack| stack.borrow_mut().push(node));
    let result = {
        let _guard = EvalGuard;
        body()
    };

    for child in children {
        let visited = with_live_slot(child, |slot| slot.flags.contains(NodeFlags::VISITED));
        if visited == Some(false) {
            release_node(child);
        }
    }
    result
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Drop every node and clear the evaluation stack.
pub fn reset_nodes() {
    SLOTS.with(|slots| slots.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    EVAL_STACK.with(|stack| stack.borrow_mut().clear());
}
