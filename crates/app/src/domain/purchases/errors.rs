//! Purchase errors.

use std::borrow::Cow;

use sqlx::Error;
use thiserror::Error;

use crate::domain::products::records::ProductUuid;

/// `lock_not_available`, raised when `lock_timeout` expires.
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// `query_canceled`, raised when `statement_timeout` expires.
const QUERY_CANCELED: &str = "57014";

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("No items to purchase")]
    EmptyPurchase,

    #[error("Invalid quantity for product {0}")]
    InvalidQuantity(ProductUuid),

    #[error("Product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("Insufficient stock for {name}")]
    InsufficientStock {
        product: ProductUuid,
        name: String,
        available: u32,
        requested: u32,
    },

    #[error("Purchase timed out")]
    TransactionTimeout,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PurchaseError {
    fn from(error: Error) -> Self {
        let code = error
            .as_database_error()
            .and_then(|e| e.code())
            .map(Cow::into_owned);

        match code.as_deref() {
            Some(LOCK_NOT_AVAILABLE | QUERY_CANCELED) => Self::TransactionTimeout,
            _ => Self::Sql(error),
        }
    }
}
