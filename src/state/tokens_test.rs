use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

/// Counting fake for the durable layer.
#[derive(Default)]
struct FakeDurable {
    value: Mutex<Option<String>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    clears: AtomicUsize,
}

impl FakeDurable {
    fn seeded(token: &str) -> Self {
        Self {
            value: Mutex::new(Some(token.to_owned())),
            ..Self::default()
        }
    }
}

impl DurableTokenStore for &'static FakeDurable {
    fn read(&self) -> Option<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.value.lock().expect("durable lock").clone()
    }

    fn write(&self, token: &str) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.value.lock().expect("durable lock") = Some(token.to_owned());
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.value.lock().expect("durable lock") = None;
    }
}

fn store_with(durable: &'static FakeDurable) -> TokenStore {
    TokenStore::new(Box::new(durable))
}

fn leak(durable: FakeDurable) -> &'static FakeDurable {
    Box::leak(Box::new(durable))
}

// =============================================================
// set_access_token
// =============================================================

#[test]
fn set_writes_memory_and_durable() {
    let durable = leak(FakeDurable::default());
    let store = store_with(durable);

    store.set_access_token(Some("tok123"));

    assert_eq!(store.get_access_token(), Some("tok123".to_owned()));
    assert_eq!(durable.writes.load(Ordering::SeqCst), 1);
    assert_eq!(
        *durable.value.lock().expect("durable lock"),
        Some("tok123".to_owned())
    );
}

#[test]
fn set_none_clears_memory_and_durable() {
    let durable = leak(FakeDurable::seeded("tok123"));
    let store = store_with(durable);
    store.set_access_token(Some("tok123"));

    store.set_access_token(None);

    assert_eq!(store.get_access_token(), None);
    assert_eq!(durable.clears.load(Ordering::SeqCst), 1);
    assert_eq!(*durable.value.lock().expect("durable lock"), None);
}

// =============================================================
// get_access_token — durable recovery
// =============================================================

#[test]
fn get_recovers_from_durable_when_memory_empty() {
    let durable = leak(FakeDurable::seeded("tokXYZ"));
    let store = store_with(durable);

    assert_eq!(store.get_access_token(), Some("tokXYZ".to_owned()));
}

#[test]
fn recovery_is_cached_after_first_read() {
    let durable = leak(FakeDurable::seeded("tokXYZ"));
    let store = store_with(durable);

    assert_eq!(store.get_access_token(), Some("tokXYZ".to_owned()));
    assert_eq!(store.get_access_token(), Some("tokXYZ".to_owned()));

    // Second call must be answered from memory, not re-read from durable.
    assert_eq!(durable.reads.load(Ordering::SeqCst), 1);
}

#[test]
fn get_with_nothing_anywhere_is_none() {
    let durable = leak(FakeDurable::default());
    let store = store_with(durable);

    assert_eq!(store.get_access_token(), None);
    assert!(!store.has_token());
}

#[test]
fn reads_never_write_back_into_durable() {
    let durable = leak(FakeDurable::default());
    let store = store_with(durable);
    store.set_access_token(Some("tok123"));
    let writes_after_set = durable.writes.load(Ordering::SeqCst);

    let _ = store.get_access_token();
    let _ = store.has_token();

    assert_eq!(durable.writes.load(Ordering::SeqCst), writes_after_set);
}

#[test]
fn memory_wins_over_durable_once_set() {
    let durable = leak(FakeDurable::seeded("stale"));
    let store = store_with(durable);

    store.set_access_token(Some("fresh"));

    assert_eq!(store.get_access_token(), Some("fresh".to_owned()));
}

#[test]
fn has_token_reflects_presence() {
    let durable = leak(FakeDurable::default());
    let store = store_with(durable);

    assert!(!store.has_token());
    store.set_access_token(Some("tok123"));
    assert!(store.has_token());
}
