//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use stockroom_app::auth::{AuthServiceError, GateError};

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::DuplicateEmail => {
            StatusError::bad_request().brief("Email already registered")
        }
        AuthServiceError::WeakPassword => StatusError::bad_request()
            .brief("Invalid password")
            .detail(AuthServiceError::WeakPassword.to_string()),
        AuthServiceError::InvalidData(details) => StatusError::bad_request()
            .brief("Invalid request")
            .detail(details),
        AuthServiceError::AdminRequired => StatusError::forbidden()
            .brief("Admin access required")
            .detail("only an admin can register another admin"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::Unauthorized => {
            StatusError::unauthorized().brief("Current password is incorrect")
        }
        AuthServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::PasswordHash(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to issue session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn gate_status_error(error: GateError) -> StatusError {
    match error {
        GateError::MissingCredential => StatusError::unauthorized()
            .brief("Authentication required")
            .detail("send a bearer token"),
        GateError::InvalidCredential => StatusError::unauthorized().brief("Invalid token"),
        GateError::ExpiredCredential => StatusError::unauthorized().brief("Token expired"),
        GateError::AdminRequired => StatusError::forbidden().brief("Admin access required"),
    }
}
