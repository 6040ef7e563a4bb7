//! # traq-settings
//!
//! Configuration management with layered sources for the traq client.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`TraqSettings::default()`]
//! 2. **User file** — `~/.traq/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `TRAQ_*` overrides (highest priority)
//!
//! The backend base URL lives here rather than in a compiled constant so
//! the same binary can point at different deployments.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{BackendSettings, TraqSettings, UiSettings};

use std::path::PathBuf;

/// Resolve the traq data directory (`~/.traq`, or `TRAQ_DATA_DIR`).
///
/// Holds the settings file and the session file.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TRAQ_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".traq")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = TraqSettings::default();
        let _path = settings_path();
    }

    #[test]
    fn deep_merge_re_exported() {
        let a = serde_json::json!({"x": 1});
        let b = serde_json::json!({"y": 2});
        let merged = deep_merge(a, b);
        assert_eq!(merged["x"], 1);
        assert_eq!(merged["y"], 2);
    }

    #[test]
    fn default_settings_are_valid() {
        let settings = TraqSettings::default();
        assert_eq!(settings.version, "0.1.0");
        assert_eq!(settings.backend.base_url, "http://localhost:8000");
        assert_eq!(settings.backend.timeout_ms, 30_000);
        assert_eq!(settings.ui.tick_ms, 1000);
    }

    #[test]
    fn data_dir_ends_with_dot_traq() {
        // TRAQ_DATA_DIR may or may not be set in the test environment; only
        // assert the fallback shape when it isn't.
        if std::env::var("TRAQ_DATA_DIR").is_err() {
            assert!(data_dir().ends_with(".traq"));
        }
    }
}
