use super::*;
use crate::util::storage::MemoryStorage;

fn session() -> Session {
    Session {
        access_token: "acc-1".to_owned(),
        refresh_token: "ref-1".to_owned(),
        role: "customer".to_owned(),
    }
}

/// Storage that accepts the access token but rejects every other key.
#[derive(Clone, Default)]
struct FlakyStorage {
    inner: MemoryStorage,
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == ACCESS_TOKEN_KEY {
            self.inner.set(key, value)
        } else {
            Err(StorageError::Write { key: key.to_owned() })
        }
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

#[test]
fn load_returns_none_when_nothing_stored() {
    let store = SessionStore::new(MemoryStorage::new());
    assert_eq!(store.load(), None);
    assert!(!store.is_present());
}

#[test]
fn save_then_load_uses_fixed_keys() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    store.save(&session()).unwrap();

    assert_eq!(storage.get("accessToken").as_deref(), Some("acc-1"));
    assert_eq!(storage.get("refreshToken").as_deref(), Some("ref-1"));
    assert_eq!(storage.get("role").as_deref(), Some("customer"));
    assert_eq!(store.load(), Some(session()));
}

#[test]
fn load_tolerates_missing_refresh_and_role() {
    let storage = MemoryStorage::new();
    storage.set(ACCESS_TOKEN_KEY, "only-access").unwrap();
    let store = SessionStore::new(storage);

    let loaded = store.load().unwrap();
    assert_eq!(loaded.access_token, "only-access");
    assert_eq!(loaded.refresh_token, "");
    assert_eq!(loaded.role, "");
    assert_eq!(store.refresh_token(), None);
}

#[test]
fn empty_access_token_is_not_a_session() {
    let storage = MemoryStorage::new();
    storage.set(ACCESS_TOKEN_KEY, "").unwrap();
    assert_eq!(SessionStore::new(storage).load(), None);
}

#[test]
fn save_removes_stale_optional_keys() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    store.save(&session()).unwrap();

    store
        .save(&Session { access_token: "acc-2".to_owned(), ..Session::default() })
        .unwrap();
    assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
    assert_eq!(storage.get(ROLE_KEY), None);
}

#[test]
fn clear_removes_every_session_key() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    store.save(&session()).unwrap();
    store.clear();

    for key in SESSION_KEYS {
        assert_eq!(storage.get(key), None, "{key} should be gone");
    }
    assert!(storage.is_empty());
}

#[test]
fn replace_access_token_keeps_refresh_and_role() {
    let store = SessionStore::new(MemoryStorage::new());
    store.save(&session()).unwrap();
    store.replace_access_token("acc-new").unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.access_token, "acc-new");
    assert_eq!(loaded.refresh_token, "ref-1");
    assert_eq!(loaded.role, "customer");
}

#[test]
fn failed_save_leaves_no_partial_session() {
    let storage = FlakyStorage::default();
    let store = SessionStore::new(storage.clone());

    let err = store.save(&session()).unwrap_err();
    assert_eq!(err, StorageError::Write { key: REFRESH_TOKEN_KEY.to_owned() });
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    assert!(!store.is_present());
}
