//! Observed objects - external state that announces its own changes.
//!
//! An [`Observable`] owns a [`Publisher`] and sends on it whenever it is
//! about to change. [`ObservedObject`] wraps a shared observable and keeps
//! exactly one subscription, for the node that read it most recently; a
//! change flags that one node. Reading from a different node replaces the
//! subscription.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use crate::engine::{Node, current_node, mark_needs_rebuild};

use super::binding::{Binding, SourceId};

/// Anything a node can be registered against.
pub trait Tracked {
    fn add_dependency(&self, node: Node);
}

// =============================================================================
// Publisher
// =============================================================================

type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    callbacks: Vec<(u64, Callback)>,
}

/// A change notification with any number of subscribers.
#[derive(Clone, Default)]
pub struct Publisher {
    subscribers: Rc<RefCell<Subscribers>>,
}

impl Publisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `callback` on every send until the subscription is dropped.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let mut subscribers = self.subscribers.borrow_mut();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.callbacks.push((id, Rc::new(callback)));
        Subscription {
            subscribers: Rc::downgrade(&self.subscribers),
            id,
        }
    }

    /// Notify every subscriber. Callbacks may subscribe or unsubscribe.
    pub fn send(&self) {
        let callbacks: Vec<Callback> = self
            .subscribers
            .borrow()
            .callbacks
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().callbacks.len()
    }
}

impl fmt::Debug for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Unsubscribes when dropped.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    subscribers: Weak<RefCell<Subscribers>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// =============================================================================
// ObservedObject
// =============================================================================

/// External state with a will-change notification.
pub trait Observable {
    fn object_will_change(&self) -> &Publisher;
}

pub struct ObservedObject<O: Observable> {
    object: Rc<O>,
    subscription: RefCell<Option<(Node, Subscription)>>,
}

impl<O: Observable + 'static> ObservedObject<O> {
    pub fn new(object: Rc<O>) -> Self {
        Self {
            object,
            subscription: RefCell::new(None),
        }
    }

    /// The object, tracked against the current node.
    pub fn get(&self) -> &O {
        if let Some(node) = current_node() {
            self.add_dependency(node);
        }
        &self.object
    }

    pub fn object(&self) -> &Rc<O> {
        &self.object
    }

    /// Make `node` the one node this object invalidates.
    pub fn add_dependency(&self, node: Node) {
        let mut subscription = self.subscription.borrow_mut();
        if matches!(&*subscription, Some((current, _)) if *current == node) {
            return;
        }
        let handle = self.object.object_will_change().subscribe(move || {
            mark_needs_rebuild(node);
        });
        // Replacing drops, and so cancels, the previous subscription.
        *subscription = Some((node, handle));
    }

    /// The node currently subscribed, if any.
    pub fn subscriber(&self) -> Option<Node> {
        self.subscription.borrow().as_ref().map(|(node, _)| *node)
    }

    /// A binding to one field of the object. Writes go through `set` and
    /// then announce the change.
    pub fn binding<T: 'static>(
        &self,
        key: &'static str,
        get: impl Fn(&O) -> T + 'static,
        set: impl Fn(&O, T) + 'static,
    ) -> Binding<T> {
        let (read, write) = (Rc::clone(&self.object), Rc::clone(&self.object));
        Binding::new(
            SourceId::keyed(&self.object, key),
            move || get(&read),
            move |value| {
                set(&write, value);
                write.object_will_change().send();
            },
        )
    }
}

impl<O: Observable> Deref for ObservedObject<O> {
    type Target = O;

    /// Untracked access.
    fn deref(&self) -> &O {
        &self.object
    }
}

impl<O: Observable + 'static> Tracked for ObservedObject<O> {
    fn add_dependency(&self, node: Node) {
        ObservedObject::add_dependency(self, node);
    }
}

impl<O: Observable> PartialEq for ObservedObject<O> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.object, &other.object)
    }
}

impl<O: Observable> fmt::Debug for ObservedObject<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservedObject")
            .field("subscriber", &self.subscription.borrow().as_ref().map(|(node, _)| *node))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{create_node, evaluate, needs_rebuild, release_node, reset_nodes};
    use std::cell::Cell;

    #[derive(Default)]
    struct Document {
        changed: Publisher,
        title: RefCell<String>,
    }

    impl Document {
        fn rename(&self, title: &str) {
            self.changed.send();
            *self.title.borrow_mut() = title.to_string();
        }
    }

    impl Observable for Document {
        fn object_will_change(&self) -> &Publisher {
            &self.changed
        }
    }

    #[test]
    fn test_publisher_unsubscribes_on_drop() {
        let publisher = Publisher::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let subscription = publisher.subscribe(move || counter.set(counter.get() + 1));

        publisher.send();
        assert_eq!(hits.get(), 1);
        drop(subscription);
        publisher.send();
        assert_eq!(hits.get(), 1);
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_publisher() {
        let publisher = Publisher::new();
        let subscription = publisher.subscribe(|| {});
        drop(publisher);
        drop(subscription);
    }

    #[test]
    fn test_change_marks_latest_reader_only() {
        reset_nodes();

        let observed = ObservedObject::new(Rc::new(Document::default()));
        let (first, second) = (create_node(), create_node());
        evaluate(first, || observed.get().title.borrow().len());
        evaluate(second, || observed.get().title.borrow().len());
        assert_eq!(observed.subscriber(), Some(second));
        assert_eq!(observed.object_will_change().subscriber_count(), 1);

        observed.rename("draft");
        assert!(needs_rebuild(second));
        assert!(!needs_rebuild(first));
    }

    #[test]
    fn test_same_node_keeps_subscription() {
        reset_nodes();

        let observed = ObservedObject::new(Rc::new(Document::default()));
        let node = create_node();
        evaluate(node, || {
            observed.get();
            observed.get();
        });
        assert_eq!(observed.object_will_change().subscriber_count(), 1);
    }

    #[test]
    fn test_dead_subscriber_is_harmless() {
        reset_nodes();

        let observed = ObservedObject::new(Rc::new(Document::default()));
        let node = create_node();
        observed.add_dependency(node);
        release_node(node);
        observed.rename("x");
        assert!(!needs_rebuild(node));
    }

    #[test]
    fn test_field_binding() {
        reset_nodes();

        let doc = Rc::new(Document::default());
        let observed = ObservedObject::new(Rc::clone(&doc));
        let node = create_node();
        observed.add_dependency(node);

        let title = observed.binding(
            "title",
            |d: &Document| d.title.borrow().clone(),
            |d: &Document, v: String| *d.title.borrow_mut() = v,
        );
        title.set("hello".into());
        assert_eq!(*doc.title.borrow(), "hello");
        assert!(needs_rebuild(node));

        let again = ObservedObject::new(doc).binding("title", |d: &Document| d.title.borrow().clone(), |_, _: String| {});
        assert_eq!(title, again);
    }

    #[test]
    fn test_identity_equality() {
        let doc = Rc::new(Document::default());
        assert_eq!(ObservedObject::new(Rc::clone(&doc)), ObservedObject::new(doc));
        assert_ne!(
            ObservedObject::new(Rc::new(Document::default())),
            ObservedObject::new(Rc::new(Document::default()))
        );
    }
}
