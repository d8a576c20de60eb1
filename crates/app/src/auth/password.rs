//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::auth::errors::AuthServiceError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Hash a password using Argon2id with a fresh random salt.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AuthServiceError::PasswordHash)
}

/// Verify a password against a stored PHC hash string.
///
/// A mismatch is `Ok(false)`; only a malformed stored hash is an error.
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, AuthServiceError> {
    let parsed_hash = PasswordHash::new(hash).map_err(AuthServiceError::PasswordHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(AuthServiceError::PasswordHash(error)),
    }
}

pub(crate) fn validate_password_strength(password: &str) -> Result<(), AuthServiceError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthServiceError::WeakPassword);
    }

    Ok(())
}
