//! Session store
//!
//! Holds the bearer token and the signed-in profile, mirrored into durable
//! storage under the `token` and `user` keys. The REST client receives the
//! store explicitly and the router observes it through [`SessionStore::subscribe`].

use std::cell::RefCell;
use std::rc::Rc;

use storeadmin_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, UserProfile};
use tracing::{debug, warn};

use crate::notify::{ListenerId, Listeners};
use crate::storage::KeyValueStorage;

/// Client-held authentication state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// An empty token does not count.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

pub struct SessionStore {
    storage: Rc<dyn KeyValueStorage>,
    state: RefCell<Session>,
    listeners: Listeners<Session>,
}

impl SessionStore {
    /// Creates an empty, unauthenticated session.
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            state: RefCell::new(Session::default()),
            listeners: Listeners::new(),
        }
    }

    /// Creates a session seeded from storage, as on page load.
    ///
    /// Token and profile are read independently; a profile that fails to
    /// parse is treated as absent.
    pub fn restore(storage: Rc<dyn KeyValueStorage>) -> Self {
        let store = Self::new(storage);
        let token = store.persisted_token();
        let user = store.persisted_user();
        *store.state.borrow_mut() = Session { token, user };
        store
    }

    /// Overwrites the session and persists both values. No validation.
    pub fn login(&self, user: UserProfile, token: impl Into<String>) {
        let token = token.into();
        self.storage.set(STORAGE_TOKEN_KEY, &token);
        match serde_json::to_string(&user) {
            Ok(raw) => {
                self.storage.set(STORAGE_USER_KEY, &raw);
            }
            Err(e) => warn!(error = %e, "could not persist user profile"),
        }
        self.replace(Session {
            token: Some(token),
            user: Some(user),
        });
        debug!("session started");
    }

    /// Clears memory and storage. Idempotent.
    pub fn logout(&self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_USER_KEY);
        self.replace(Session::default());
        debug!("session cleared");
    }

    /// Restores the session from storage when both a token and a readable
    /// profile are persisted; otherwise memory is left as it is.
    pub fn check_auth(&self) {
        let (Some(token), Some(user)) = (self.persisted_token(), self.persisted_user()) else {
            return;
        };
        self.replace(Session {
            token: Some(token),
            user: Some(user),
        });
    }

    /// Reaction to a server-side rejection of the token.
    ///
    /// Only the token is dropped; the persisted profile stays.
    pub fn expire(&self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        let mut next = self.snapshot();
        next.token = None;
        self.replace(next);
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Token as currently persisted, bypassing memory.
    pub fn persisted_token(&self) -> Option<String> {
        self.storage
            .get(STORAGE_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    fn persisted_user(&self) -> Option<UserProfile> {
        let raw = self.storage.get(STORAGE_USER_KEY)?;
        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable stored profile");
                None
            }
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn replace(&self, next: Session) {
        *self.state.borrow_mut() = next;
        let current = self.snapshot();
        self.listeners.notify(&current);
    }
}
