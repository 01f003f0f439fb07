//! State - a mutable cell that remembers who read it.
//!
//! Reading a `State` while a node's body is being evaluated records that
//! node as a dependent. Writing flags every live dependent for rebuild and
//! forgets the dead ones. Dependents are a set: reading the same state
//! twice from one node records it once.
//!
//! ```
//! use spark_views::engine::{create_node, evaluate, needs_rebuild};
//! use spark_views::state::State;
//!
//! let count = State::new(0);
//! let node = create_node();
//! evaluate(node, || count.get());
//!
//! count.set(1);
//! assert!(needs_rebuild(node));
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::engine::{Node, current_node, is_alive, mark_needs_rebuild};

use super::binding::{Binding, SourceId};
use super::observed::Tracked;

struct Inner<T> {
    value: RefCell<T>,
    dependents: RefCell<HashSet<Node>>,
}

/// Shared mutable state. Clones share the same value and dependents.
pub struct State<T> {
    inner: Rc<Inner<T>>,
}

impl<T> State<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                dependents: RefCell::new(HashSet::new()),
            }),
        }
    }

    /// Record `node` as depending on this state.
    pub fn add_dependency(&self, node: Node) {
        if is_alive(node) {
            self.inner.dependents.borrow_mut().insert(node);
        }
    }

    fn track(&self) {
        if let Some(node) = current_node() {
            self.add_dependency(node);
        }
    }

    /// Borrow the value, tracked against the current node.
    ///
    /// Writes to this state from inside `f` are dropped with a warning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.track();
        f(&self.inner.value.borrow())
    }

    /// Store `value` and notify, or hand it back if the value is borrowed
    /// by an enclosing [`State::with`] or [`State::update`].
    pub fn try_set(&self, value: T) -> Result<(), T> {
        match self.inner.value.try_borrow_mut() {
            Ok(mut slot) => *slot = value,
            Err(_) => return Err(value),
        }
        self.notify();
        Ok(())
    }

    pub fn set(&self, value: T) {
        if self.try_set(value).is_err() {
            tracing::warn!("state written while borrowed; write dropped");
        }
    }

    /// Mutate the value in place, then notify. Dropped with a warning if
    /// the value is already borrowed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        match self.inner.value.try_borrow_mut() {
            Ok(mut slot) => f(&mut slot),
            Err(_) => {
                tracing::warn!("state updated while borrowed; update dropped");
                return;
            }
        }
        self.notify();
    }

    /// Flag every live dependent for rebuild and drop dead ones.
    fn notify(&self) {
        let mut dependents = self.inner.dependents.borrow_mut();
        let before = dependents.len();
        dependents.retain(|&node| mark_needs_rebuild(node));
        tracing::debug!(
            marked = dependents.len(),
            pruned = before - dependents.len(),
            "state changed"
        );
    }

    /// Recorded dependents; may include nodes that died since the last write.
    pub fn dependent_count(&self) -> usize {
        self.inner.dependents.borrow().len()
    }

    pub fn is_dependent(&self, node: Node) -> bool {
        self.inner.dependents.borrow().contains(&node)
    }

    /// Whether both handles share one cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> State<T> {
    /// Read the value, tracked against the current node.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Read the value on behalf of an explicit node.
    pub fn get_for(&self, node: Node) -> T {
        self.add_dependency(node);
        self.get_untracked()
    }

    pub fn get_untracked(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: Clone + 'static> State<T> {
    /// A binding that reads and writes this state.
    pub fn binding(&self) -> Binding<T> {
        let (read, write) = (self.clone(), self.clone());
        Binding::new(SourceId::of(&self.inner), move || read.get(), move |value| write.set(value))
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Tracked for State<T> {
    fn add_dependency(&self, node: Node) {
        State::add_dependency(self, node);
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &self.inner.value.borrow())
            .field("dependents", &self.dependent_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{create_node, evaluate, needs_rebuild, release_node, reset_nodes};

    #[test]
    fn test_read_outside_evaluation_is_untracked() {
        reset_nodes();

        let state = State::new(1);
        assert_eq!(state.get(), 1);
        assert_eq!(state.dependent_count(), 0);
    }

    #[test]
    fn test_repeated_reads_record_once() {
        reset_nodes();

        let state = State::new(String::from("a"));
        let node = create_node();
        evaluate(node, || {
            state.get();
            state.get();
            state.with(|s| s.len());
        });
        assert_eq!(state.dependent_count(), 1);

        // A second evaluation doesn't add another entry either.
        evaluate(node, || state.get());
        assert_eq!(state.dependent_count(), 1);
    }

    #[test]
    fn test_write_marks_live_and_prunes_dead() {
        reset_nodes();

        let state = State::new(0);
        let (a, b, dead) = (create_node(), create_node(), create_node());
        for node in [a, b, dead] {
            evaluate(node, || state.get());
        }
        release_node(dead);

        state.set(1);
        assert!(needs_rebuild(a));
        assert!(needs_rebuild(b));
        assert!(!needs_rebuild(dead));
        assert_eq!(state.dependent_count(), 2);
        assert!(!state.is_dependent(dead));
    }

    #[test]
    fn test_reused_index_is_not_a_dependent() {
        reset_nodes();

        let state = State::new(0);
        let old = create_node();
        evaluate(old, || state.get());
        release_node(old);

        let fresh = create_node();
        assert_eq!(fresh.index(), old.index());
        state.set(1);
        assert!(!needs_rebuild(fresh));
    }

    #[test]
    fn test_innermost_node_is_the_reader() {
        reset_nodes();

        let state = State::new(0);
        let (outer, inner) = (create_node(), create_node());
        evaluate(outer, || evaluate(inner, || state.get()));

        state.set(2);
        assert!(needs_rebuild(inner));
        assert!(!needs_rebuild(outer));
    }

    #[test]
    fn test_get_for_explicit_node() {
        reset_nodes();

        let state = State::new(7);
        let node = create_node();
        assert_eq!(state.get_for(node), 7);
        state.update(|v| *v += 1);
        assert!(needs_rebuild(node));
        assert_eq!(state.get_untracked(), 8);
    }

    #[test]
    fn test_binding_round_trip_and_identity() {
        reset_nodes();

        let state = State::new(3);
        let binding = state.binding();
        binding.set(9);
        assert_eq!(state.get_untracked(), 9);
        assert_eq!(binding.get(), 9);

        assert_eq!(binding, state.clone().binding());
        assert_ne!(binding, State::new(9).binding());
        assert!(state.ptr_eq(&state.clone()));
    }

    #[test]
    fn test_binding_write_invalidates_readers() {
        reset_nodes();

        let state = State::new(false);
        let node = create_node();
        evaluate(node, || state.get());
        state.binding().set(true);
        assert!(needs_rebuild(node));
    }

    #[test]
    fn test_write_inside_borrow_is_dropped_not_fatal() {
        reset_nodes();

        let state = State::new(1);
        state.with(|v| state.set(*v + 1));
        assert_eq!(state.get(), 1);

        assert_eq!(state.with(|_| state.try_set(5)), Err(5));
        state.with(|_| state.binding().set(9));
        state.update(|v| {
            state.update(|w| *w += 100);
            *v += 1;
        });
        assert_eq!(state.get(), 2);

        assert_eq!(state.try_set(3), Ok(()));
        assert_eq!(state.get(), 3);
    }
}
