use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::*;
use crate::util::storage::MemoryStorage;

fn store() -> SessionStore {
    SessionStore::new(Arc::new(MemoryStorage::default()))
}

// =============================================================
// Session username
// =============================================================

#[test]
fn set_session_then_get_session_returns_username() {
    let store = store();
    store.set_session("alice");
    assert_eq!(store.get_session(), Some("alice".to_owned()));
}

#[test]
fn clear_session_removes_username_and_offline_flag() {
    let store = store();
    store.set_session("alice");
    store.set_offline_flag();
    store.clear_session();
    assert_eq!(store.get_session(), None);
    assert!(!store.is_offline_mode());
}

#[test]
fn set_session_is_idempotent() {
    let store = store();
    store.set_session("alice");
    store.set_session("alice");
    assert_eq!(store.get_session(), Some("alice".to_owned()));
}

// =============================================================
// Offline registry
// =============================================================

#[test]
fn register_offline_user_sets_offline_flag() {
    let store = store();
    assert!(!store.is_offline_mode());
    store.register_offline_user("bob");
    assert!(store.is_offline_mode());
    assert!(store.is_registered_offline_user("bob"));
}

#[test]
fn register_offline_user_twice_keeps_one_entry() {
    let store = store();
    store.register_offline_user("bob");
    store.register_offline_user("bob");
    assert_eq!(store.offline_users(), vec!["bob".to_owned()]);
}

#[test]
fn registry_preserves_insertion_across_users() {
    let store = store();
    store.register_offline_user("bob");
    store.register_offline_user("carol");
    assert!(store.is_registered_offline_user("bob"));
    assert!(store.is_registered_offline_user("carol"));
    assert!(!store.is_registered_offline_user("mallory"));
}

#[test]
fn malformed_registry_degrades_to_empty() {
    let backend = Arc::new(MemoryStorage::default());
    backend.set(OFFLINE_USERS_KEY, "not json");
    let store = SessionStore::new(backend);
    assert_eq!(store.offline_users(), Vec::<String>::new());
}

#[test]
fn non_array_registry_degrades_to_empty() {
    let backend = Arc::new(MemoryStorage::default());
    backend.set(OFFLINE_USERS_KEY, "{\"bob\":true}");
    let store = SessionStore::new(backend);
    assert!(!store.is_registered_offline_user("bob"));
}

#[test]
fn non_string_registry_entries_are_dropped() {
    let backend = Arc::new(MemoryStorage::default());
    backend.set(OFFLINE_USERS_KEY, "[\"bob\", 7, null, \"carol\"]");
    let store = SessionStore::new(backend);
    assert_eq!(store.offline_users(), vec!["bob".to_owned(), "carol".to_owned()]);
}

#[test]
fn registration_survives_malformed_existing_registry() {
    let backend = Arc::new(MemoryStorage::default());
    backend.set(OFFLINE_USERS_KEY, "42");
    let store = SessionStore::new(backend);
    store.register_offline_user("bob");
    assert!(store.is_registered_offline_user("bob"));
}

// =============================================================
// Tagged session state
// =============================================================

#[test]
fn state_is_anonymous_with_no_session() {
    assert_eq!(store().session_state(), SessionState::Anonymous);
}

#[test]
fn state_is_online_for_plain_session() {
    let store = store();
    store.set_session("alice");
    assert_eq!(
        store.session_state(),
        SessionState::AuthenticatedOnline("alice".to_owned())
    );
}

#[test]
fn state_is_offline_when_flag_is_set() {
    let store = store();
    store.register_offline_user("bob");
    store.set_session("bob");
    assert_eq!(
        store.session_state(),
        SessionState::AuthenticatedOffline("bob".to_owned())
    );
}

#[test]
fn stale_offline_flag_without_session_is_anonymous() {
    let store = store();
    store.set_offline_flag();
    assert_eq!(store.session_state(), SessionState::Anonymous);
    // The flag itself survives until an online login or logout clears it.
    assert!(store.is_offline_mode());
}

#[test]
fn session_state_accessors() {
    let anonymous = SessionState::Anonymous;
    let online = SessionState::AuthenticatedOnline("alice".to_owned());
    let offline = SessionState::AuthenticatedOffline("bob".to_owned());
    assert_eq!(anonymous.username(), None);
    assert_eq!(online.username(), Some("alice"));
    assert_eq!(offline.username(), Some("bob"));
    assert!(!anonymous.is_authenticated());
    assert!(online.is_authenticated());
    assert!(!online.is_offline());
    assert!(offline.is_offline());
}

// =============================================================
// Observers
// =============================================================

#[test]
fn observers_run_in_subscription_order_with_new_state() {
    let store = store();
    let order = Arc::new(Mutex::new(Vec::new()));

    let first = order.clone();
    store.subscribe(move |state| {
        if let Ok(mut seen) = first.lock() {
            seen.push(("first", state.clone()));
        }
    });
    let second = order.clone();
    store.subscribe(move |state| {
        if let Ok(mut seen) = second.lock() {
            seen.push(("second", state.clone()));
        }
    });

    store.set_session("alice");

    let seen = order.lock().expect("order lock");
    let expected = SessionState::AuthenticatedOnline("alice".to_owned());
    assert_eq!(
        *seen,
        vec![("first", expected.clone()), ("second", expected)]
    );
}

#[test]
fn observer_reading_store_during_notification_sees_new_value() {
    let store = store();
    let observed = Arc::new(Mutex::new(None));
    let observed_in_callback = observed.clone();
    let store_in_callback = store.clone();
    store.subscribe(move |_| {
        if let Ok(mut slot) = observed_in_callback.lock() {
            *slot = Some(store_in_callback.get_session());
        }
    });

    store.set_session("alice");
    assert_eq!(
        observed.lock().expect("observed lock").clone(),
        Some(Some("alice".to_owned()))
    );

    store.clear_session();
    assert_eq!(observed.lock().expect("observed lock").clone(), Some(None));
}

#[test]
fn unsubscribed_observer_is_not_notified() {
    let store = store();
    let count = Arc::new(AtomicUsize::new(0));
    let count_in_callback = count.clone();
    let id = store.subscribe(move |_| {
        count_in_callback.fetch_add(1, Ordering::Relaxed);
    });

    store.set_session("alice");
    store.unsubscribe(id);
    store.clear_session();

    assert_eq!(count.load(Ordering::Relaxed), 1);
}

#[test]
fn registry_mutations_do_not_notify() {
    let store = store();
    let count = Arc::new(AtomicUsize::new(0));
    let count_in_callback = count.clone();
    store.subscribe(move |_| {
        count_in_callback.fetch_add(1, Ordering::Relaxed);
    });

    store.register_offline_user("bob");
    store.set_offline_flag();
    store.clear_offline_flag();

    assert_eq!(count.load(Ordering::Relaxed), 0);
}
