//! API error types.

/// Errors that can occur when talking to the task backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, body decode).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// HTTP status text (what the sign-up flow surfaces to the user).
        message: String,
    },

    /// An authenticated call was attempted without a stored session.
    #[error("not signed in")]
    NotSignedIn,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ApiError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend returned 500: Internal Server Error"
        );
    }

    #[test]
    fn not_signed_in_display() {
        assert_eq!(ApiError::NotSignedIn.to_string(), "not signed in");
    }
}
