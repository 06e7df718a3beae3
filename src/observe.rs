//! Push-based listener registries.
//!
//! [`Tracked`] holds a value and calls its watchers whenever the value
//! changes. Overlays and external bindings hang off these cells instead of
//! polling the render state.

use std::fmt;

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// Ordered collection of callbacks receiving `&T`.
pub(crate) struct Listeners<T> {
    entries: Vec<(ListenerId, Callback<T>)>,
    next_id: u64,
}

impl<T> Listeners<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn add(&mut self, callback: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Call every listener in registration order.
    pub(crate) fn emit(&mut self, value: &T) {
        for (_, callback) in &mut self.entries {
            callback(value);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// A value cell that notifies watchers on change.
#[derive(Debug)]
pub(crate) struct Tracked<T> {
    value: T,
    watchers: Listeners<T>,
}

impl<T: Copy + PartialEq> Tracked<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            watchers: Listeners::new(),
        }
    }

    pub(crate) fn get(&self) -> T {
        self.value
    }

    /// Store `value`, notifying watchers if it differs from the current one.
    pub(crate) fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.watchers.emit(&value);
        true
    }

    pub(crate) fn watch(&mut self, callback: impl FnMut(&T) + 'static) -> ListenerId {
        self.watchers.add(callback)
    }

    pub(crate) fn unwatch(&mut self, id: ListenerId) -> bool {
        self.watchers.remove(id)
    }

    pub(crate) fn watcher_count(&self) -> usize {
        self.watchers.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listeners_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let first = Rc::clone(&log);
        listeners.add(move |value: &i32| first.borrow_mut().push(("first", *value)));
        let second = Rc::clone(&log);
        listeners.add(move |value: &i32| second.borrow_mut().push(("second", *value)));

        listeners.emit(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn tracked_notifies_only_on_change() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut cell = Tracked::new(None::<f64>);
        cell.watch(move |value| sink.borrow_mut().push(*value));

        assert!(cell.set(Some(1.0)));
        assert!(!cell.set(Some(1.0)));
        assert!(cell.set(None));
        assert_eq!(*calls.borrow(), vec![Some(1.0), None]);
    }

    #[test]
    fn unwatch_severs_binding() {
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let mut cell = Tracked::new(0.0_f64);
        let id = cell.watch(move |_| *sink.borrow_mut() += 1);
        cell.set(1.0);
        assert!(cell.unwatch(id));
        cell.set(2.0);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(cell.watcher_count(), 0);
        assert_eq!(cell.get(), 2.0);
    }
}
