//! Change notification for state containers.
//!
//! UI layers subscribe here instead of relying on framework reactivity;
//! the Leptos frontend forwards each notification into a signal.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type ListenerId = u64;

pub struct Listeners<T> {
    next_id: Cell<ListenerId>,
    entries: RefCell<Vec<(ListenerId, Rc<dyn Fn(&T)>)>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Calls every listener with `value`.
    ///
    /// Listeners may subscribe or unsubscribe while being notified; the
    /// change applies from the next notification.
    pub fn notify(&self, value: &T) {
        let current: Vec<Rc<dyn Fn(&T)>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in current {
            listener(value);
        }
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}
