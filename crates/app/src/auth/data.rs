//! Auth Data

use secrecy::{ExposeSecret, SecretString};

use crate::auth::{errors::AuthServiceError, password::validate_password_strength};

/// New User Data
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub is_admin: bool,
}

impl NewUser {
    pub(crate) fn validate(&self) -> Result<(), AuthServiceError> {
        if self.name.trim().is_empty() {
            return Err(AuthServiceError::InvalidData("name is required".to_string()));
        }

        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(AuthServiceError::InvalidData(
                "a valid email is required".to_string(),
            ));
        }

        validate_password_strength(self.password.expose_secret())
    }
}

/// Password Change Data
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current: SecretString,
    pub new: SecretString,
}

impl PasswordChange {
    pub(crate) fn validate(&self) -> Result<(), AuthServiceError> {
        if self.current.expose_secret().is_empty() || self.new.expose_secret().is_empty() {
            return Err(AuthServiceError::InvalidData(
                "current and new password are required".to_string(),
            ));
        }

        validate_password_strength(self.new.expose_secret())
    }
}
