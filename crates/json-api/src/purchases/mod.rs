//! Purchases

mod errors;
pub(crate) mod handler;
