//! Error types for the authentication core

use thiserror::Error;

/// Boxed source error carried by the opaque failure kinds
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Token verification failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

/// Authentication error kinds returned by every core operation.
///
/// `UserExists`, `InvalidCredentials` and `ValidationFailed` are safe to show
/// to the caller. `StoreFailure` and `Internal` keep their cause for the
/// operator log only; their `Display` never includes it.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User already exists")]
    UserExists,

    /// Unknown email and wrong password both map here.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Server error")]
    StoreFailure(#[source] BoxError),

    #[error("Server error")]
    Internal(#[source] BoxError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UserExists => "USER_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::ValidationFailed(_) => "VALIDATION_FAILED",
            AuthError::StoreFailure(_) => "STORE_FAILURE",
            AuthError::Internal(_) => "INTERNAL_ERROR",
            AuthError::Token(TokenError::Expired) => "TOKEN_EXPIRED",
            AuthError::Token(TokenError::Invalid) => "TOKEN_INVALID",
        }
    }

    /// Whether this kind hides an internal cause from the caller
    pub fn is_internal(&self) -> bool {
        matches!(self, AuthError::StoreFailure(_) | AuthError::Internal(_))
    }

    pub fn store<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        AuthError::StoreFailure(err.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        AuthError::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_kinds_hide_cause() {
        let err = AuthError::store("connection refused on 10.0.0.5:5432");
        assert_eq!(err.to_string(), "Server error");
        assert!(err.is_internal());

        let err = AuthError::internal("hash backend exploded");
        assert_eq!(err.to_string(), "Server error");
        assert!(err.is_internal());
    }

    #[test]
    fn test_source_is_kept_for_logging() {
        use std::error::Error as _;

        let err = AuthError::store("connection refused");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(AuthError::UserExists.code(), "USER_EXISTS");
        assert_eq!(AuthError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(AuthError::from(TokenError::Expired).code(), "TOKEN_EXPIRED");
        assert_eq!(AuthError::from(TokenError::Invalid).code(), "TOKEN_INVALID");
        assert!(!AuthError::UserExists.is_internal());
    }
}
