//! Session-scoped persistence for the player's restorable state.
//!
//! Only `{currentIndex, isShuffle, isRepeat}` survive a reload. Everything else the
//! player tracks is transient.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, SessionStorage, Storage};
#[cfg(not(target_arch = "wasm32"))]
use once_cell::sync::Lazy;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::{Arc, Mutex};

pub const PLAYER_STATE_KEY: &str = "playerState";

#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(target_arch = "wasm32")]
    #[error("session storage error: {0}")]
    Browser(#[from] StorageError),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Restorable subset of the player state, serialized as
/// `{"currentIndex": 0, "isShuffle": false, "isRepeat": false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub is_shuffle: bool,
    #[serde(default)]
    pub is_repeat: bool,
}

impl PersistedState {
    /// Reads whatever fields are well-typed and keeps defaults for the rest.
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let current_index = object
            .get("currentIndex")
            .and_then(Value::as_u64)
            .and_then(|index| usize::try_from(index).ok())
            .unwrap_or(0);
        let is_shuffle = object
            .get("isShuffle")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let is_repeat = object
            .get("isRepeat")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Some(Self {
            current_index,
            is_shuffle,
            is_repeat,
        })
    }
}

/// Key/value store scoped to the browsing session.
pub trait SessionStore {
    fn load_value(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn save_value(&self, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// `window.sessionStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSession;

#[cfg(target_arch = "wasm32")]
impl SessionStore for BrowserSession {
    fn load_value(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match SessionStorage::get::<Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_value(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        SessionStorage::set(key, value)?;
        Ok(())
    }
}

/// In-memory store holding serialized entries, shared between clones.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

#[cfg(not(target_arch = "wasm32"))]
static PROCESS_SESSION: Lazy<MemorySession> = Lazy::new(MemorySession::default);

#[cfg(not(target_arch = "wasm32"))]
impl MemorySession {
    /// The store that lives as long as the process, standing in for a browser session.
    pub fn process() -> Self {
        PROCESS_SESSION.clone()
    }

    #[allow(dead_code)]
    pub fn insert_raw(&self, key: &str, raw: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), raw.to_string());
        }
    }

    #[allow(dead_code)]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionStore for MemorySession {
    fn load_value(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        match entries.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save_value(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .insert(key.to_string(), raw);
        Ok(())
    }
}

/// The session store for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn session_store() -> std::rc::Rc<dyn SessionStore> {
    std::rc::Rc::new(BrowserSession)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn session_store() -> std::rc::Rc<dyn SessionStore> {
    std::rc::Rc::new(MemorySession::process())
}

/// Restores the saved state, falling back to defaults for anything absent, malformed,
/// or pointing past the end of a catalog of `track_count` tracks.
pub fn load_player_state(store: &dyn SessionStore, track_count: usize) -> PersistedState {
    let value = match store.load_value(PLAYER_STATE_KEY) {
        Ok(Some(value)) => value,
        Ok(None) => return PersistedState::default(),
        Err(err) => {
            debug!("discarding saved player state: {err}");
            return PersistedState::default();
        }
    };

    let Some(mut state) = PersistedState::from_value(&value) else {
        debug!("saved player state is not an object, using defaults");
        return PersistedState::default();
    };

    if state.current_index >= track_count {
        debug!(
            index = state.current_index,
            track_count, "saved track index out of range, starting from the first track"
        );
        state.current_index = 0;
    }
    state
}

pub fn save_player_state(store: &dyn SessionStore, state: PersistedState) -> Result<(), StoreError> {
    let value = serde_json::to_value(state)?;
    store.save_value(PLAYER_STATE_KEY, &value)
}

/// Saves and logs on failure; persistence never interrupts playback.
pub fn persist_player_state(store: &dyn SessionStore, state: PersistedState) {
    if let Err(err) = save_player_state(store, state) {
        warn!("failed to persist player state: {err}");
    }
}
