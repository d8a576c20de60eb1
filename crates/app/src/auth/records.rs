//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Issued login session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub is_admin: bool,
    pub name: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_debug_hides_token() {
        let session = Session {
            token: "eyJhbGciOiJIUzI1NiJ9.secret-claims.signature".to_string(),
            is_admin: true,
            name: "Avery".to_string(),
        };

        let debug = format!("{session:?}");

        assert!(!debug.contains("secret-claims"), "token leaked: {debug}");
        assert!(debug.contains("[REDACTED]"), "got {debug}");
        assert!(debug.contains("Avery"), "got {debug}");
    }

    #[test]
    fn user_record_debug_hides_password_hash() {
        let user = UserRecord {
            uuid: UserUuid::new(),
            name: "Avery".to_string(),
            email: "avery@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret-hash".to_string(),
            is_admin: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        assert!(!format!("{user:?}").contains("secret-hash"), "hash leaked");
    }
}
