//! Client error types.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors reported by the client layer.
///
/// Transport errors are folded into these kinds with a readable message;
/// `reqwest` errors never reach callers directly.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The auth service rejected the email/password pair.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Login failed for any other reason (network, server, bad payload).
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// Account creation failed, whether rejected or unreachable.
    #[error("registration failed: {0}")]
    RegistrationFailed(String),

    /// The API refused the bearer token, or none was sent.
    #[error("not authorized to {action}")]
    Unauthorized { action: String },

    /// A resource request failed.
    #[error("failed to {action}: {message}")]
    Request { action: String, message: String },

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns true if signing in (again) may resolve the error.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidCredentials(_) | ClientError::Unauthorized { .. }
        )
    }
}
