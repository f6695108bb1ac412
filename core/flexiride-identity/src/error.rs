//! Error types for the identity store.

use thiserror::Error;

/// Result type for identity storage operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Errors raised by key/value backends.
///
/// These stay inside the crate boundary in practice: [`crate::IdentityStore`]
/// logs them and carries on.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session could not be encoded into a record.
    #[error("record encoding error: {0}")]
    Record(#[from] flexiride_types::Error),

    /// Stored record does not decode to a session.
    #[error("malformed persisted record: {0}")]
    Malformed(String),

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// In-memory backend lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    LockPoisoned,
}
