//! Session storage types.

use serde::{Deserialize, Serialize};

/// Current session storage schema version.
pub const STORAGE_VERSION: u32 = 1;

/// Identity of the signed-in user, as reported by the identity provider.
///
/// All fields are optional: a session created from a bare pasted token has
/// no identity attached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// On-disk session: the signed-in user plus the bearer access token.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStorage {
    /// Storage schema version.
    pub version: u32,
    /// Signed-in user identity, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    /// Bearer token attached to every authenticated API call.
    pub access_token: String,
    /// RFC 3339 timestamp of the last write, stamped on save.
    pub last_updated: String,
}

impl SessionStorage {
    /// Create a new session around an access token, with no identity.
    pub fn new(access_token: String) -> Self {
        Self {
            version: STORAGE_VERSION,
            user: None,
            access_token,
            last_updated: String::new(),
        }
    }

    /// Attach a user identity to the session.
    #[must_use]
    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = Some(user);
        self
    }

    /// A short label for the signed-in user, for the app bar.
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref().or(u.email.as_deref()))
            .unwrap_or("signed in")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
