#![forbid(unsafe_code)]

//! Tab-lifetime session flags.
//!
//! A [`SessionFlag`] is a named boolean that starts unset and is set at most
//! once per tab. The backing [`SessionStore`] is injected: the browser host
//! wraps `window.sessionStorage`, tests use [`MemorySessionStore`].
//!
//! # Storage layout
//!
//! One string key per flag, value `"true"`. Any other value (or no value)
//! reads as unset. There is no schema version.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Read fails | Flag reads as unset, logged at `warn` |
//! | Write fails | Flag stays unset in storage, logged at `warn` |

use std::collections::HashMap;
use std::fmt;

/// Errors raised by a [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage is available (privacy mode, sandboxed frame).
    Unavailable(String),
    /// The storage call itself failed (quota, security error).
    Access(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "session storage unavailable: {msg}"),
            Self::Access(msg) => write!(f, "session storage access failed: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value storage scoped to one tab.
pub trait SessionStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-memory store: one instance models one tab.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    data: HashMap<String, String>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn name(&self) -> &str {
        "MemorySessionStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// The one-time behaviours gated per tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionFlag {
    /// The first-visit warning panel has been shown.
    WarningShown,
    /// The easter-egg video has been played.
    EasterEggPlayed,
}

impl SessionFlag {
    /// Storage key for this flag.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::WarningShown => "warningShown",
            Self::EasterEggPlayed => "easterEggPlayed",
        }
    }
}

const SET_VALUE: &str = "true";

/// Typed flag access over a [`SessionStore`].
#[derive(Debug, Clone)]
pub struct SessionFlags<S> {
    store: S,
}

impl<S: SessionStore> SessionFlags<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether `flag` is set. Storage errors read as unset.
    #[must_use]
    pub fn is_set(&self, flag: SessionFlag) -> bool {
        match self.store.get(flag.key()) {
            Ok(value) => value.as_deref() == Some(SET_VALUE),
            Err(err) => {
                tracing::warn!(flag = flag.key(), store = self.store.name(), %err, "session flag read failed");
                false
            }
        }
    }

    /// Set `flag`. Storage errors are logged and swallowed.
    pub fn set(&mut self, flag: SessionFlag) {
        if let Err(err) = self.store.set(flag.key(), SET_VALUE) {
            tracing::warn!(flag = flag.key(), store = self.store.name(), %err, "session flag write failed");
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
