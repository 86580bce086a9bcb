//! Error types used throughout the client

use thiserror::Error;

/// Main error type for the Tigris client.
///
/// Error text never includes the site identifier, the SSO constant password,
/// or the raw SSO URL.
#[derive(Error, Debug)]
pub enum TigrisError {
    /// Credentials rejected at login, or a stale/invalid session detected at
    /// calendar-fetch time. Recoverable by logging in again.
    #[error("authentication failed{}: {message}", fmt_code(.code))]
    Auth {
        /// Server-provided error code (login envelope code or error-redirect
        /// code), when one was supplied.
        code: Option<String>,
        message: String,
    },

    /// Network-level failure, propagated from the transport without
    /// reinterpretation. Timeouts and cancellations stay in this kind.
    #[error("network error: {0}")]
    Transport(String),

    /// Non-zero application-level response code, or an error-redirect code
    /// not recognized as an authentication failure. The raw code is kept for
    /// caller inspection since the upstream taxonomy is undocumented.
    #[error("remote error (code {code}): {message}")]
    Remote { code: String, message: String },

    /// Response body did not match the expected envelope shape. Rare in
    /// practice; signals an upstream contract change.
    #[error("unexpected response shape: {0}")]
    Parse(String),

    /// Caller-side validation failure, raised before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

fn fmt_code(code: &Option<String>) -> String {
    match code {
        Some(code) => format!(" (code {code})"),
        None => String::new(),
    }
}

impl TigrisError {
    /// Server error code carried by this error, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            TigrisError::Auth { code, .. } => code.as_deref(),
            TigrisError::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type alias for Tigris client operations
pub type Result<T> = std::result::Result<T, TigrisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_display_includes_code_when_present() {
        let err = TigrisError::Auth { code: Some("403".into()), message: "denied".into() };
        assert_eq!(err.to_string(), "authentication failed (code 403): denied");
        assert_eq!(err.code(), Some("403"));
    }

    #[test]
    fn auth_display_omits_missing_code() {
        let err = TigrisError::Auth { code: None, message: "denied".into() };
        assert_eq!(err.to_string(), "authentication failed: denied");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn remote_exposes_code() {
        let err = TigrisError::Remote { code: "500".into(), message: "server error".into() };
        assert_eq!(err.code(), Some("500"));
    }
}
