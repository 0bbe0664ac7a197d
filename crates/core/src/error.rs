//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// One variant per failure kind the API boundary knows how to map to a
/// status code. Infrastructure failures are collapsed into `Internal`; the
/// underlying cause is only ever logged server-side.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. missing or malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A uniqueness conflict (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Bad credentials or a bad/expired token. The message is always
    /// generic; it never distinguishes "no such user" from "wrong password".
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A requested resource was not found — or is owned by someone else,
    /// which must be indistinguishable.
    #[error("not found")]
    NotFound,

    /// Unexpected store/runtime failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
