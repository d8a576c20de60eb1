//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tracing::info;

use crate::auth::{
    AuthServiceError, GateError,
    data::{NewUser, PasswordChange},
    gate::{AuthorizationGate, Credentials, Identity},
    password::{hash_password, verify_password},
    records::{Session, UserRecord, UserUuid},
    repository::PgUsersRepository,
    token::SessionTokens,
};

/// Authentication settings shared by the service and the gate.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
    pub local_admin_secret: Option<SecretString>,
    pub allow_admin_signup: bool,
}

/// User administration that needs no session machinery.
#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }

    /// Store a new user without any admin-signup restriction.
    ///
    /// # Errors
    ///
    /// Returns an error when validation, hashing or insertion fails.
    pub async fn create_user(&self, user: NewUser) -> Result<UserRecord, AuthServiceError> {
        user.validate()?;

        let password_hash = hash_password(user.password.expose_secret())?;

        let created = self
            .repository
            .create_user(
                UserUuid::new(),
                user.name.trim(),
                &user.email,
                &password_hash,
                user.is_admin,
            )
            .await?;

        info!(user = %created.uuid, is_admin = created.is_admin, "user created");

        Ok(created)
    }
}

#[derive(Debug, Clone)]
pub struct PgAuthService {
    users: PgUsersService,
    tokens: SessionTokens,
    gate: AuthorizationGate,
    allow_admin_signup: bool,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, settings: &AuthSettings) -> Self {
        let tokens = SessionTokens::new(&settings.jwt_secret);

        Self {
            users: PgUsersService::new(pool),
            gate: AuthorizationGate::new(tokens.clone(), settings.local_admin_secret.clone()),
            tokens,
            allow_admin_signup: settings.allow_admin_signup,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(
        &self,
        user: NewUser,
        registrar: Option<Identity>,
    ) -> Result<UserRecord, AuthServiceError> {
        let registrar_is_admin = registrar.is_some_and(|identity| identity.is_admin);

        if user.is_admin && !self.allow_admin_signup && !registrar_is_admin {
            return Err(AuthServiceError::AdminRequired);
        }

        self.users.create_user(user).await
    }

    async fn login(
        &self,
        email: &str,
        password: SecretString,
    ) -> Result<Session, AuthServiceError> {
        let user = self
            .users
            .repository
            .find_user_by_email(email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(password.expose_secret(), &user.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.uuid, user.is_admin)?;

        Ok(Session {
            token,
            is_admin: user.is_admin,
            name: user.name,
        })
    }

    async fn change_password(
        &self,
        identity: Identity,
        change: PasswordChange,
    ) -> Result<(), AuthServiceError> {
        change.validate()?;

        let uuid = identity.user_uuid().ok_or(AuthServiceError::NotFound)?;

        let user = self
            .users
            .repository
            .find_user_by_uuid(uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if !verify_password(change.current.expose_secret(), &user.password_hash)? {
            return Err(AuthServiceError::Unauthorized);
        }

        let password_hash = hash_password(change.new.expose_secret())?;

        let rows_affected = self
            .users
            .repository
            .update_password_hash(uuid, &password_hash)
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        Ok(())
    }

    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, GateError> {
        self.gate.authenticate(credentials)
    }

    fn authorize_admin(&self, credentials: &Credentials) -> Result<Identity, GateError> {
        self.gate.authorize_admin(credentials)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a user. Admin accounts need an admin `registrar` unless
    /// admin signup is open.
    async fn register(
        &self,
        user: NewUser,
        registrar: Option<Identity>,
    ) -> Result<UserRecord, AuthServiceError>;

    /// Exchange email and password for a session token.
    async fn login(&self, email: &str, password: SecretString)
    -> Result<Session, AuthServiceError>;

    /// Replace the caller's password after verifying the current one.
    async fn change_password(
        &self,
        identity: Identity,
        change: PasswordChange,
    ) -> Result<(), AuthServiceError>;

    /// Identify the caller from request credentials.
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, GateError>;

    /// Identify the caller and require admin rights.
    fn authorize_admin(&self, credentials: &Credentials) -> Result<Identity, GateError>;
}
