//! Sign-in and sign-up screen state.
//!
//! The sign-up form posts to `/auth/register` and surfaces failures as the
//! backend's HTTP status text in a blocking modal. The sign-in screen takes
//! a provider-issued access token; validating it is the backend's job.

use tracing::warn;

use traq_api::{ApiClient, ApiError, RegisterRequest};

/// Which sign-up field has keyboard focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignUpField {
    /// Display name.
    #[default]
    Name,
    /// Email address.
    Email,
    /// Password.
    Password,
}

impl SignUpField {
    /// The field after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Password,
            Self::Password => Self::Name,
        }
    }
}

/// Sign-up form state. Fields are plain buffers updated per keystroke.
#[derive(Debug, Default)]
pub struct SignUpForm {
    /// Display name buffer.
    pub name: String,
    /// Email buffer.
    pub email: String,
    /// Password buffer (rendered masked).
    pub password: String,
    /// Focused field.
    pub focus: SignUpField,
    /// Modal text, blocking until dismissed.
    pub notice: Option<String>,
}

impl SignUpForm {
    /// Append a character to the focused field.
    pub fn type_char(&mut self, c: char) {
        self.field_mut().push(c);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        let _ = self.field_mut().pop();
    }

    /// Move focus to the next field.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            SignUpField::Name => &mut self.name,
            SignUpField::Email => &mut self.email,
            SignUpField::Password => &mut self.password,
        }
    }

    /// Dismiss the modal notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Post the registration. Returns `true` on success so the shell can
    /// route back to sign-in; either way a modal notice is set.
    pub async fn submit(&mut self, api: &ApiClient) -> bool {
        let request = RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };
        match api.register(&request).await {
            Ok(_) => {
                self.notice = Some("User Registered!".to_string());
                self.password.clear();
                true
            }
            Err(ApiError::Status { status, message }) => {
                warn!(status, %message, "registration rejected");
                self.notice = Some(message);
                false
            }
            Err(e) => {
                warn!(error = %e, "registration failed");
                self.notice = Some(e.to_string());
                false
            }
        }
    }
}

/// Sign-in screen state: a single token buffer.
///
/// Tokens come from the external identity provider; we store whatever is
/// pasted and let the backend reject bad ones on first use.
#[derive(Debug, Default)]
pub struct SignInForm {
    /// Access token buffer (rendered masked).
    pub token: String,
    /// One-line hint, e.g. after an empty submit.
    pub notice: Option<String>,
}

impl SignInForm {
    /// Append a character to the token buffer.
    pub fn type_char(&mut self, c: char) {
        self.token.push(c);
    }

    /// Delete the last character of the token buffer.
    pub fn backspace(&mut self) {
        let _ = self.token.pop();
    }

    /// Take the token out of the form, or set a hint when it is empty.
    pub fn take_token(&mut self) -> Option<String> {
        let token = self.token.trim();
        if token.is_empty() {
            self.notice = Some("Paste an access token first".to_string());
            None
        } else {
            let token = token.to_string();
            self.token.clear();
            self.notice = None;
            Some(token)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
