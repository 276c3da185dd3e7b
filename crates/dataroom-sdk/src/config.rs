use std::path::{Path, PathBuf};

use dataroom_content::DEFAULT_QUOTA_BYTES;
use dataroom_naming::extension_of;
use dataroom_state::ReducerConfig;
use serde::{Deserialize, Serialize};

use crate::error::SessionResult;

/// Settings for a [`Session`](crate::Session), loadable from TOML.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```toml
/// state_dir = "/var/lib/dataroom"
/// storage_quota_bytes = 104857600
///
/// [reducer]
/// folder_names = "deduplicate"
///
/// [reducer.touch]
/// rename_file = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding the persisted slots.
    pub state_dir: PathBuf,
    /// Total bytes of file content one session may hold.
    pub storage_quota_bytes: u64,
    /// An upload is accepted when its extension or its MIME type is listed.
    pub accepted_extensions: Vec<String>,
    pub accepted_mime_types: Vec<String>,
    pub reducer: ReducerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(".dataroom"),
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            accepted_extensions: vec!["pdf".into()],
            accepted_mime_types: vec!["application/pdf".into()],
            reducer: ReducerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> SessionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> SessionResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> SessionResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Whether an upload named `name` with type `mime_type` is allowed.
    pub fn accepts(&self, name: &str, mime_type: &str) -> bool {
        let mime_ok = self
            .accepted_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime_type.trim()));
        let ext_ok = extension_of(name).is_some_and(|ext| {
            self.accepted_extensions
                .iter()
                .any(|accepted| accepted.trim_start_matches('.').eq_ignore_ascii_case(&ext))
        });
        mime_ok || ext_ok
    }

    /// Human-readable list of accepted extensions, for error messages.
    pub fn accepted_summary(&self) -> String {
        self.accepted_extensions
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
