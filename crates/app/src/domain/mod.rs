//! Stockroom Domain Concerns

pub mod products;
pub mod purchases;
