//! Auth Config

use clap::{ArgAction, Args};
use secrecy::SecretString;

use stockroom_app::auth::AuthSettings;

/// Session token and admin access settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: SecretString,

    /// Shared secret that enables the `x-local-admin` header
    #[arg(long, env = "LOCAL_ADMIN_SECRET", hide_env_values = true)]
    pub local_admin_secret: Option<SecretString>,

    /// Let anyone register an admin account
    #[arg(
        long,
        env = "ALLOW_ADMIN_SIGNUP",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub allow_admin_signup: bool,
}

impl AuthConfig {
    /// Settings handed to the auth service.
    #[must_use]
    pub fn settings(&self) -> AuthSettings {
        AuthSettings {
            jwt_secret: self.jwt_secret.clone(),
            local_admin_secret: self.local_admin_secret.clone(),
            allow_admin_signup: self.allow_admin_signup,
        }
    }
}
