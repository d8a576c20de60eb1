//! Session tokens.
//!
//! Stateless HS256 JWTs. Nothing is persisted; a token is valid until it
//! expires or the signing secret changes.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::records::UserUuid;

/// Lifetime of every issued session token.
pub const SESSION_LIFETIME: SignedDuration = SignedDuration::from_hours(2);

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User UUID.
    pub sub: Uuid,

    /// Whether this user was an admin when the token was issued.
    pub is_admin: bool,

    /// Issued-at (Unix seconds).
    pub iat: i64,

    /// Expiry (Unix seconds).
    pub exp: i64,
}

impl SessionClaims {
    #[must_use]
    pub fn user(&self) -> UserUuid {
        UserUuid::from_uuid(self.sub)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("session token expired")]
    Expired,

    #[error("session token invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign session token")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// Signs and verifies session tokens with a shared HS256 secret.
#[derive(Clone)]
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("keys", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SessionTokens {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
        }
    }

    /// Issue a token for `user`, valid from now for [`SESSION_LIFETIME`].
    pub fn issue(&self, user: UserUuid, is_admin: bool) -> Result<String, TokenError> {
        self.issue_at(user, is_admin, Timestamp::now())
    }

    /// Issue a token as if it had been issued at `issued_at`.
    pub fn issue_at(
        &self,
        user: UserUuid,
        is_admin: bool,
        issued_at: Timestamp,
    ) -> Result<String, TokenError> {
        let iat = issued_at.as_second();

        let claims = SessionClaims {
            sub: user.into_uuid(),
            is_admin,
            iat,
            exp: iat.saturating_add(SESSION_LIFETIME.as_secs()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|error| match error.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(error),
            })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn tokens(secret: &str) -> SessionTokens {
        SessionTokens::new(&SecretString::from(secret))
    }

    #[test]
    fn issued_token_verifies_with_claims() -> TestResult {
        let tokens = tokens("a-test-signing-secret");
        let user = UserUuid::new();

        let token = tokens.issue(user, true)?;
        let claims = tokens.verify(&token)?;

        assert_eq!(claims.user(), user);
        assert!(claims.is_admin);
        assert_eq!(claims.exp - claims.iat, 2 * 60 * 60);

        Ok(())
    }

    #[test]
    fn expired_token_is_reported_as_expired() -> TestResult {
        let tokens = tokens("a-test-signing-secret");
        let issued_at = Timestamp::now() - SignedDuration::from_hours(3);

        let token = tokens.issue_at(UserUuid::new(), true, issued_at)?;

        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));

        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() -> TestResult {
        let token = tokens("first-secret").issue(UserUuid::new(), false)?;

        let result = tokens("second-secret").verify(&token);

        assert!(matches!(result, Err(TokenError::Invalid(_))));

        Ok(())
    }

    #[test]
    fn garbage_is_invalid() {
        let result = tokens("a-test-signing-secret").verify("not.a.jwt");

        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn debug_output_hides_keys() {
        let rendered = format!("{:?}", tokens("do-not-print-me"));

        assert!(!rendered.contains("do-not-print-me"));
    }
}
