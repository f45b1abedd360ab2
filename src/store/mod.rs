//! Resource stores
//!
//! Every store follows one template: raise `loading`, clear `error`, call the
//! API, fold the result into local data, lower `loading`. Fetches swallow
//! failures into `error`; mutations record them and hand them back.

use std::cell::RefCell;
use std::future::Future;

use storeadmin_shared::{Entity, EntityId};
use tracing::error;

use crate::error::ApiResult;
use crate::notify::{ListenerId, Listeners};

mod categories;
mod directory;
mod notifications;
mod orders;
mod products;

pub use categories::CategoriesStore;
pub use directory::{CartsData, CartsStore, TransactionsStore, UsersStore, WalletsStore};
pub use notifications::NotificationsStore;
pub use orders::{OrderLists, OrdersStore};
pub use products::ProductsStore;

/// Observable state of a store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot<S> {
    pub data: S,
    pub loading: bool,
    /// Message of the most recent failure.
    pub error: Option<String>,
}

pub type ListSnapshot<T> = Snapshot<Vec<T>>;

pub struct StoreCell<S> {
    state: RefCell<Snapshot<S>>,
    listeners: Listeners<Snapshot<S>>,
}

impl<S: Clone + Default> StoreCell<S> {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(Snapshot::default()),
            listeners: Listeners::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot<S> {
        self.state.borrow().clone()
    }

    /// Reads the state without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&Snapshot<S>) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self, listener: impl Fn(&Snapshot<S>) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn modify<R>(&self, f: impl FnOnce(&mut Snapshot<S>) -> R) -> R {
        let out = f(&mut self.state.borrow_mut());
        if !self.listeners.is_empty() {
            let current = self.snapshot();
            self.listeners.notify(&current);
        }
        out
    }

    /// Runs one operation through the store lifecycle.
    ///
    /// `apply` folds a successful result into the data and produces the
    /// caller's return value. No borrow is held while `call` is pending.
    pub(crate) async fn settle<R, O, Fut>(
        &self,
        call: Fut,
        apply: impl FnOnce(&mut S, R) -> O,
    ) -> ApiResult<O>
    where
        Fut: Future<Output = ApiResult<R>>,
    {
        self.modify(|snap| {
            snap.loading = true;
            snap.error = None;
        });

        let outcome = call.await;

        self.modify(|snap| {
            snap.loading = false;
            match outcome {
                Ok(value) => Ok(apply(&mut snap.data, value)),
                Err(err) => {
                    snap.error = Some(err.to_string());
                    Err(err)
                }
            }
        })
    }

    /// Fetch flavour of [`settle`](Self::settle): failures are logged and
    /// left in `error`, never returned.
    pub(crate) async fn refresh<R, Fut>(&self, what: &str, call: Fut, apply: impl FnOnce(&mut S, R))
    where
        Fut: Future<Output = ApiResult<R>>,
    {
        if let Err(err) = self.settle(call, apply).await {
            error!(error = %err, "Error fetching {}", what);
        }
    }
}

impl<S: Clone + Default> Default for StoreCell<S> {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================
// List reconciliation
// =========================================================

/// Replaces the first item with `id`. Returns `false`, leaving the list as
/// it was, when nothing matches.
pub(crate) fn replace_by_id<T: Entity>(items: &mut [T], id: &EntityId, value: T) -> bool {
    match items.iter_mut().find(|item| item.id() == id) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// Drops every item with `id`.
pub(crate) fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &EntityId) {
    items.retain(|item| item.id() != id);
}

#[cfg(test)]
mod tests;
