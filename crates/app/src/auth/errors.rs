//! Auth errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::token::TokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("admin access required to register an admin")]
    AdminRequired,

    #[error("current password is incorrect")]
    Unauthorized,

    #[error("password must be at least 6 characters")]
    WeakPassword,

    #[error("user not found")]
    NotFound,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("password hashing failed")]
    PasswordHash(#[source] argon2::password_hash::Error),

    #[error("session token error")]
    Token(#[from] TokenError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateEmail,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => {
                Self::InvalidData("value violates a user constraint".to_string())
            }
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Authorization gate denials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("authentication required")]
    MissingCredential,

    #[error("invalid session token")]
    InvalidCredential,

    #[error("session token expired")]
    ExpiredCredential,

    #[error("admin access required")]
    AdminRequired,
}
