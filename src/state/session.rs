//! Persisted auth session: store, offline-account registry, tagged state.
//!
//! DESIGN
//! ======
//! `SessionStore` is a cheap-clone handle over an injected storage backend,
//! so pages and the auth client share one service and tests can swap in an
//! in-memory backend. Observers registered with [`SessionStore::subscribe`]
//! are invoked synchronously, in subscription order, after every session
//! mutation; an observer reading the store while being notified always sees
//! the new value.
//!
//! The three storage keys are stable strings shared with earlier deployments
//! of this app; changing them would strand existing logged-in browsers.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::util::storage::SessionStorage;

/// Storage key holding the logged-in username.
pub const AUTH_USER_KEY: &str = "cineverse_user";
/// Storage key holding the offline-mode flag (literal `"true"` when set).
pub const OFFLINE_MODE_KEY: &str = "cineverse_offline_mode";
/// Storage key holding the JSON array of offline-registered usernames.
pub const OFFLINE_USERS_KEY: &str = "cineverse_offline_users";

/// The authentication state of this browser, derived from persisted storage.
///
/// An offline flag left behind by a logged-out user does not surface here;
/// it only distinguishes the two authenticated variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No logged-in user.
    Anonymous,
    /// Logged in against the backend.
    AuthenticatedOnline(String),
    /// Logged in against the local offline-account registry.
    AuthenticatedOffline(String),
}

impl SessionState {
    /// Username of the logged-in user, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::AuthenticatedOnline(username) | Self::AuthenticatedOffline(username) => {
                Some(username)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, Self::AuthenticatedOffline(_))
    }
}

/// Handle returned by [`SessionStore::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&SessionState) + Send + Sync>;

/// Injectable session service over a [`SessionStorage`] backend.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    observers: Arc<Mutex<Vec<(SubscriptionId, Observer)>>>,
    next_id: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            observers: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The persisted username, or `None`. Never fails.
    pub fn get_session(&self) -> Option<String> {
        self.storage.get(AUTH_USER_KEY)
    }

    /// Persist `username` as the logged-in user and notify observers.
    pub fn set_session(&self, username: &str) {
        self.storage.set(AUTH_USER_KEY, username);
        self.notify();
    }

    /// Remove the logged-in user and the offline flag, then notify observers.
    pub fn clear_session(&self) {
        self.storage.remove(AUTH_USER_KEY);
        self.storage.remove(OFFLINE_MODE_KEY);
        self.notify();
    }

    pub fn is_offline_mode(&self) -> bool {
        self.storage.get(OFFLINE_MODE_KEY).as_deref() == Some("true")
    }

    pub fn set_offline_flag(&self) {
        self.storage.set(OFFLINE_MODE_KEY, "true");
    }

    pub fn clear_offline_flag(&self) {
        self.storage.remove(OFFLINE_MODE_KEY);
    }

    /// Usernames registered while the backend was unreachable.
    ///
    /// Malformed stored data (not JSON, not an array) degrades to an empty
    /// list; non-string elements are dropped.
    pub fn offline_users(&self) -> Vec<String> {
        let Some(raw) = self.storage.get(OFFLINE_USERS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(username) => Some(username),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Add `username` to the offline registry (if absent) and set the
    /// offline flag. The registry never shrinks.
    pub fn register_offline_user(&self, username: &str) {
        let mut users = self.offline_users();
        if !users.iter().any(|existing| existing == username) {
            users.push(username.to_owned());
            if let Ok(encoded) = serde_json::to_string(&users) {
                self.storage.set(OFFLINE_USERS_KEY, &encoded);
            }
        }
        self.storage.set(OFFLINE_MODE_KEY, "true");
    }

    pub fn is_registered_offline_user(&self, username: &str) -> bool {
        self.offline_users().iter().any(|user| user == username)
    }

    /// Derive the tagged session state from the persisted fields.
    pub fn session_state(&self) -> SessionState {
        match self.get_session() {
            None => SessionState::Anonymous,
            Some(username) if self.is_offline_mode() => {
                SessionState::AuthenticatedOffline(username)
            }
            Some(username) => SessionState::AuthenticatedOnline(username),
        }
    }

    /// Register an observer for session changes. Observers run synchronously
    /// in subscription order after `set_session`/`clear_session`.
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut observers) = self.observers.lock() {
            observers.push((id, Arc::new(observer)));
        }
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut observers) = self.observers.lock() {
            observers.retain(|(existing, _)| *existing != id);
        }
    }

    fn notify(&self) {
        let state = self.session_state();
        // Snapshot first: an observer may (un)subscribe while being notified.
        let observers: Vec<Observer> = match self.observers.lock() {
            Ok(observers) => observers.iter().map(|(_, observer)| observer.clone()).collect(),
            Err(_) => return,
        };
        for observer in observers {
            observer(&state);
        }
    }
}
