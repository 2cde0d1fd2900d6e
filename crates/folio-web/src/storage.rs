#![forbid(unsafe_code)]

//! `window.sessionStorage` as a [`SessionStore`].
//!
//! Storage can be missing (opaque origins) or throw on access (sandboxed
//! iframes, privacy modes). Both surface as [`StorageError`]s, which the flag
//! layer reads as "unset".

use folio_core::session::StorageResult;
use folio_core::{SessionStore, StorageError};
use web_sys::{Storage, Window};

pub struct WebSessionStore {
    storage: Option<Storage>,
}

impl WebSessionStore {
    pub fn new(window: &Window) -> Self {
        let storage = match window.session_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(?err, "sessionStorage access threw");
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> StorageResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("window.sessionStorage".into()))
    }
}

impl SessionStore for WebSessionStore {
    fn name(&self) -> &str {
        "sessionStorage"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Access(format!("{err:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Access(format!("{err:?}")))
    }
}
