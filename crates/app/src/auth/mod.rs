//! Authentication

pub mod data;
mod errors;
pub mod gate;
mod password;
pub mod records;
mod repository;
mod service;
pub mod token;

pub use errors::*;
pub use gate::{AuthorizationGate, Credentials, Identity, Subject};
pub use password::MIN_PASSWORD_LENGTH;
pub use service::*;
pub use token::{SessionClaims, SessionTokens, TokenError};
