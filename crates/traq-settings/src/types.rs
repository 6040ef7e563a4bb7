//! Settings types with compiled defaults.

use serde::{Deserialize, Serialize};

/// Root settings for the traq client.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraqSettings {
    /// Settings schema version.
    pub version: String,
    /// Backend connection settings.
    pub backend: BackendSettings,
    /// Terminal UI settings.
    pub ui: UiSettings,
}

impl Default for TraqSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            backend: BackendSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

/// Backend connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendSettings {
    /// Base URL of the task backend, without a trailing slash.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Terminal UI settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiSettings {
    /// Elapsed-time ticker interval in milliseconds.
    pub tick_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { tick_ms: 1000 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
