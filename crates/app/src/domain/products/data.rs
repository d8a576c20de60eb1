//! Products Data

use std::collections::BTreeMap;

use crate::domain::products::{errors::ProductsServiceError, records::Category};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub specs: Option<BTreeMap<String, String>>,
    pub price: u64,
    pub stock: u32,
    pub image: Option<String>,
}

impl NewProduct {
    pub(crate) fn validate(&self) -> Result<(), ProductsServiceError> {
        validate_name(&self.name)?;
        validate_price(self.price)
    }
}

/// Product Update Data
///
/// `None` leaves a field untouched. For the optional text fields
/// (`brand`, `description`, `image`) an empty string clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub specs: Option<BTreeMap<String, String>>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub image: Option<String>,
}

impl ProductUpdate {
    pub(crate) fn validate(&self) -> Result<(), ProductsServiceError> {
        self.name.as_deref().map_or(Ok(()), validate_name)?;
        self.price.map_or(Ok(()), validate_price)
    }
}

/// Stock Adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    /// Replace the stock level.
    Set(u32),

    /// Receive units. Fails when the result would not fit in a `u32`.
    Add(u32),

    /// Write off units, stopping at zero.
    Remove(u32),
}

impl StockAdjustment {
    pub(crate) fn action(self) -> &'static str {
        match self {
            StockAdjustment::Set(_) => "set",
            StockAdjustment::Add(_) => "add",
            StockAdjustment::Remove(_) => "remove",
        }
    }

    pub(crate) fn quantity(self) -> u32 {
        match self {
            StockAdjustment::Set(quantity)
            | StockAdjustment::Add(quantity)
            | StockAdjustment::Remove(quantity) => quantity,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ProductsServiceError> {
    if name.trim().is_empty() {
        return Err(ProductsServiceError::InvalidData(
            "name must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Prices are stored as `BIGINT` minor units.
fn validate_price(price: u64) -> Result<(), ProductsServiceError> {
    i64::try_from(price)?;

    Ok(())
}
