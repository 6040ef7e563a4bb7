//! # traq-auth
//!
//! Session persistence for the traq client.
//!
//! Sign-in itself is handled by an external identity provider; this crate
//! only stores what the provider hands back — the signed-in user's identity
//! and the bearer access token used to authorize API calls. The session is
//! persisted to `~/.traq/session.json` with secure file permissions and is
//! read-only for the views.

#![deny(unsafe_code)]

pub mod errors;
pub mod storage;
pub mod types;

pub use errors::AuthError;
pub use storage::{clear_session, load_session, save_session, session_file_path};
pub use types::{SessionStorage, UserProfile};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
