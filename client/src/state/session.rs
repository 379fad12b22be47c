//! Persisted session (token pair + role).
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the only code that touches the session keys in durable
//! storage. `AuthContext` owns one store and routes every login/logout
//! through it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::util::storage::{KeyValueStorage, StorageError};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLE_KEY: &str = "role";

/// Every storage key owned by the session store.
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY];

/// The authenticated visitor's token pair and role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub role: String,
}

/// Reads and writes the session under fixed storage keys.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the persisted session.
    ///
    /// A session exists iff a non-empty access token is stored; missing
    /// refresh/role entries load as empty strings.
    pub fn load(&self) -> Option<Session> {
        let access_token = self.storage.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())?;
        Some(Session {
            access_token,
            refresh_token: self.storage.get(REFRESH_TOKEN_KEY).unwrap_or_default(),
            role: self.storage.get(ROLE_KEY).unwrap_or_default(),
        })
    }

    pub fn is_present(&self) -> bool {
        self.load().is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.load().map(|s| s.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Persist `session`, replacing whatever was stored.
    ///
    /// Empty refresh/role values remove their keys. A failed write leaves no
    /// partial session behind.
    ///
    /// # Errors
    ///
    /// Returns the storage error of the first rejected write.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let result = self.write_all(session);
        if result.is_err() {
            self.clear();
        }
        result
    }

    fn write_all(&self, session: &Session) -> Result<(), StorageError> {
        self.storage.set(ACCESS_TOKEN_KEY, &session.access_token)?;
        self.write_optional(REFRESH_TOKEN_KEY, &session.refresh_token)?;
        self.write_optional(ROLE_KEY, &session.role)
    }

    fn write_optional(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.is_empty() {
            self.storage.remove(key);
            Ok(())
        } else {
            self.storage.set(key, value)
        }
    }

    /// Swap in a freshly issued access token, keeping refresh token and role.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write is rejected.
    pub fn replace_access_token(&self, access_token: &str) -> Result<(), StorageError> {
        self.storage.set(ACCESS_TOKEN_KEY, access_token)
    }

    /// Remove every session key.
    pub fn clear(&self) {
        for key in SESSION_KEYS {
            self.storage.remove(key);
        }
    }
}
