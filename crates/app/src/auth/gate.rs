//! Authorization gate.
//!
//! Decides who a caller is from the credentials a request carries, in this
//! order: a matching local-admin bypass secret, then a bearer session token.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::auth::{
    errors::GateError,
    records::UserUuid,
    token::{SessionTokens, TokenError},
};

/// Raw credentials lifted off a request.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Value of the local-admin bypass header, if sent.
    pub bypass: Option<String>,

    /// Bearer token, if a well-formed `Bearer` authorization was sent.
    pub bearer: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bypass", &self.bypass.as_ref().map(|_| "[REDACTED]"))
            .field("bearer", &self.bearer.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    LocalAdmin,
    User(UserUuid),
}

/// Authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub subject: Subject,
    pub is_admin: bool,
}

impl Identity {
    pub const LOCAL_ADMIN_ID: &'static str = "local-admin";

    #[must_use]
    pub const fn local_admin() -> Self {
        Self {
            subject: Subject::LocalAdmin,
            is_admin: true,
        }
    }

    #[must_use]
    pub const fn user(user: UserUuid, is_admin: bool) -> Self {
        Self {
            subject: Subject::User(user),
            is_admin,
        }
    }

    /// The backing user record, if any. The local admin has none.
    #[must_use]
    pub const fn user_uuid(&self) -> Option<UserUuid> {
        match self.subject {
            Subject::User(user) => Some(user),
            Subject::LocalAdmin => None,
        }
    }

    #[must_use]
    pub fn id(&self) -> String {
        match self.subject {
            Subject::LocalAdmin => Self::LOCAL_ADMIN_ID.to_string(),
            Subject::User(user) => user.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    tokens: SessionTokens,
    local_admin_secret: Option<SecretString>,
}

impl AuthorizationGate {
    /// The bypass is only honoured when `local_admin_secret` is set.
    #[must_use]
    pub fn new(tokens: SessionTokens, local_admin_secret: Option<SecretString>) -> Self {
        let local_admin_secret =
            local_admin_secret.filter(|secret| !secret.expose_secret().is_empty());

        Self {
            tokens,
            local_admin_secret,
        }
    }

    #[must_use]
    pub fn bypass_enabled(&self) -> bool {
        self.local_admin_secret.is_some()
    }

    /// Identify the caller.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<Identity, GateError> {
        if self.bypass_matches(credentials.bypass.as_deref()) {
            return Ok(Identity::local_admin());
        }

        let bearer = credentials
            .bearer
            .as_deref()
            .ok_or(GateError::MissingCredential)?;

        let claims = self.tokens.verify(bearer).map_err(|error| match error {
            TokenError::Expired => GateError::ExpiredCredential,
            TokenError::Invalid(_) | TokenError::Encode(_) => GateError::InvalidCredential,
        })?;

        Ok(Identity::user(claims.user(), claims.is_admin))
    }

    /// Identify the caller and require admin rights.
    pub fn authorize_admin(&self, credentials: &Credentials) -> Result<Identity, GateError> {
        let identity = self.authenticate(credentials)?;

        if !identity.is_admin {
            return Err(GateError::AdminRequired);
        }

        Ok(identity)
    }

    fn bypass_matches(&self, presented: Option<&str>) -> bool {
        match (&self.local_admin_secret, presented) {
            (Some(secret), Some(presented)) => {
                constant_time_eq(secret.expose_secret().as_bytes(), presented.as_bytes())
            }
            _ => false,
        }
    }
}

/// Compare two byte strings in time independent of where they differ.
///
/// Lengths are not hidden; a length mismatch is simply unequal.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use super::*;

    const SIGNING_SECRET: &str = "gate-test-signing-secret";
    const BYPASS_SECRET: &str = "let-me-in";

    fn gate(bypass: Option<&str>) -> AuthorizationGate {
        AuthorizationGate::new(
            SessionTokens::new(&SecretString::from(SIGNING_SECRET)),
            bypass.map(SecretString::from),
        )
    }

    fn bearer(token: String) -> Credentials {
        Credentials {
            bypass: None,
            bearer: Some(token),
        }
    }

    fn bypass(value: &str) -> Credentials {
        Credentials {
            bypass: Some(value.to_string()),
            bearer: None,
        }
    }

    fn issue(is_admin: bool) -> Result<(UserUuid, String), TokenError> {
        let user = UserUuid::new();
        let token = SessionTokens::new(&SecretString::from(SIGNING_SECRET)).issue(user, is_admin)?;

        Ok((user, token))
    }

    #[test]
    fn no_credentials_is_missing() {
        let result = gate(Some(BYPASS_SECRET)).authorize_admin(&Credentials::default());

        assert_eq!(result, Err(GateError::MissingCredential));
    }

    #[test]
    fn matching_bypass_is_local_admin() {
        let identity = gate(Some(BYPASS_SECRET)).authorize_admin(&bypass(BYPASS_SECRET));

        assert_eq!(identity, Ok(Identity::local_admin()));
        assert_eq!(Identity::local_admin().id(), "local-admin");
    }

    #[test]
    fn bypass_is_ignored_when_not_configured() {
        let result = gate(None).authorize_admin(&bypass(BYPASS_SECRET));

        assert_eq!(result, Err(GateError::MissingCredential));
    }

    #[test]
    fn empty_secret_does_not_enable_bypass() {
        let gate = gate(Some(""));

        assert!(!gate.bypass_enabled());
        assert_eq!(
            gate.authorize_admin(&bypass("")),
            Err(GateError::MissingCredential)
        );
    }

    #[test]
    fn wrong_bypass_falls_through_to_bearer() -> TestResult {
        let (user, token) = issue(true)?;

        let credentials = Credentials {
            bypass: Some("1".to_string()),
            bearer: Some(token),
        };

        let identity = gate(Some(BYPASS_SECRET)).authorize_admin(&credentials)?;

        assert_eq!(identity, Identity::user(user, true));

        Ok(())
    }

    #[test]
    fn admin_token_is_allowed() -> TestResult {
        let (user, token) = issue(true)?;

        let identity = gate(None).authorize_admin(&bearer(token))?;

        assert_eq!(identity.user_uuid(), Some(user));

        Ok(())
    }

    #[test]
    fn non_admin_token_needs_admin() -> TestResult {
        let (_, token) = issue(false)?;

        let gate = gate(None);

        assert!(gate.authenticate(&bearer(token.clone())).is_ok());
        assert_eq!(
            gate.authorize_admin(&bearer(token)),
            Err(GateError::AdminRequired)
        );

        Ok(())
    }

    #[test]
    fn tampered_token_is_invalid() -> TestResult {
        let (_, token) = issue(true)?;

        let result = gate(None).authorize_admin(&bearer(format!("{token}x")));

        assert_eq!(result, Err(GateError::InvalidCredential));

        Ok(())
    }

    #[test]
    fn expired_token_is_denied_even_with_wrong_bypass() -> TestResult {
        let issued_at = Timestamp::now() - SignedDuration::from_hours(3);
        let token = SessionTokens::new(&SecretString::from(SIGNING_SECRET)).issue_at(
            UserUuid::new(),
            true,
            issued_at,
        )?;

        let credentials = Credentials {
            bypass: Some("wrong".to_string()),
            bearer: Some(token),
        };

        let result = gate(Some(BYPASS_SECRET)).authorize_admin(&credentials);

        assert_eq!(result, Err(GateError::ExpiredCredential));

        Ok(())
    }

    #[test]
    fn constant_time_eq_compares_contents_and_length() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(!constant_time_eq(b"", b"a"));
    }
}
