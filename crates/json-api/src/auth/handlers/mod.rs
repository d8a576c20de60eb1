//! Auth Handlers

pub(crate) mod change_password;
pub(crate) mod login;
pub(crate) mod register;

use serde::{Deserialize, Serialize};
use salvo::oapi::ToSchema;

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    /// What happened
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
