//! Binding - a get/set pair over some piece of state.
//!
//! Consumers can read and write through a binding without knowing what
//! backs it. Two bindings are equal when they point at the same source,
//! whatever their current values.

use std::fmt;
use std::rc::Rc;

/// Identity of whatever a binding reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId {
    addr: usize,
    key: &'static str,
}

impl SourceId {
    /// Identity of the allocation behind `rc`.
    pub fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Self::keyed(rc, "")
    }

    /// Identity of the `key` field of the allocation behind `rc`.
    pub fn keyed<T: ?Sized>(rc: &Rc<T>, key: &'static str) -> Self {
        Self {
            addr: Rc::as_ptr(rc) as *const () as usize,
            key,
        }
    }
}

pub struct Binding<T> {
    get: Rc<dyn Fn() -> T>,
    set: Rc<dyn Fn(T)>,
    source: SourceId,
}

impl<T> Binding<T> {
    /// The closures must keep the source alive so `source` stays unique.
    pub fn new(source: SourceId, get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
            source,
        }
    }

    pub fn get(&self) -> T {
        (self.get)()
    }

    pub fn set(&self, value: T) {
        (self.set)(value)
    }

    pub fn source(&self) -> SourceId {
        self.source
    }
}

impl<T: Clone + 'static> Binding<T> {
    /// A binding that always reads `value` and ignores writes.
    pub fn constant(value: T) -> Self {
        let value = Rc::new(value);
        let source = SourceId::of(&value);
        Self::new(source, move || T::clone(&value), |_| {})
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
            source: self.source,
        }
    }
}

impl<T> PartialEq for Binding<T> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl<T> Eq for Binding<T> {}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("source", &self.source).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_get_set_through_closures() {
        let cell = Rc::new(Cell::new(1));
        let (read, write) = (Rc::clone(&cell), Rc::clone(&cell));
        let binding = Binding::new(SourceId::of(&cell), move || read.get(), move |v| write.set(v));

        binding.set(5);
        assert_eq!(binding.get(), 5);
        assert_eq!(cell.get(), 5);
    }

    #[test]
    fn test_constant_ignores_writes() {
        let binding = Binding::constant(String::from("fixed"));
        binding.set(String::from("changed"));
        assert_eq!(binding.get(), "fixed");
        assert_eq!(binding, binding.clone());
        assert_ne!(binding, Binding::constant(String::from("fixed")));
    }

    #[test]
    fn test_keyed_sources_differ() {
        let rc = Rc::new(0u8);
        assert_eq!(SourceId::keyed(&rc, "a"), SourceId::keyed(&rc, "a"));
        assert_ne!(SourceId::keyed(&rc, "a"), SourceId::keyed(&rc, "b"));
        assert_ne!(SourceId::of(&rc), SourceId::keyed(&rc, "a"));
    }
}
