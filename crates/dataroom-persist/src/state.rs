//! Saving and restoring the full application state.

use dataroom_types::AppState;
use serde_json::Value;
use tracing::{debug, warn};

use crate::backend::SlotBackend;
use crate::error::PersistResult;

/// Slot holding the serialized [`AppState`].
pub const STATE_KEY: &str = "dataroom-state-v1";

/// Reads and writes [`AppState`] as JSON in a single slot.
#[derive(Debug)]
pub struct StateStore<B> {
    backend: B,
    key: String,
}

impl<B: SlotBackend> StateStore<B> {
    /// A store using the standard [`STATE_KEY`] slot.
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STATE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Restore the last saved state.
    ///
    /// Returns `Ok(None)` when nothing was saved or the saved text is not a
    /// usable state (bad JSON, missing `data` or `ui`, wrong field types).
    /// Only backend failures are errors.
    pub fn load(&self) -> PersistResult<Option<AppState>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            debug!(key = %self.key, "no saved state");
            return Ok(None);
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved state is not valid JSON, ignoring");
                return Ok(None);
            }
        };
        if value.get("data").is_none() || value.get("ui").is_none() {
            warn!(key = %self.key, "saved state lacks data or ui, ignoring");
            return Ok(None);
        }

        match serde_json::from_value::<AppState>(value) {
            Ok(state) => {
                debug!(
                    key = %self.key,
                    datarooms = state.data.datarooms.len(),
                    folders = state.data.folders.len(),
                    files = state.data.files.len(),
                    "loaded state"
                );
                Ok(Some(state))
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved state has unexpected shape, ignoring");
                Ok(None)
            }
        }
    }

    /// Overwrite the slot with `state`.
    pub fn save(&self, state: &AppState) -> PersistResult<()> {
        let json = serde_json::to_string(state)?;
        self.backend.set(&self.key, &json)
    }

    /// Forget the saved state. Returns `true` if there was one.
    pub fn clear(&self) -> PersistResult<bool> {
        self.backend.remove(&self.key)
    }
}
