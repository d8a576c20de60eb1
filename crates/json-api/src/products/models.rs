//! Product wire models

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::products::records::{Category, ProductRecord};

use crate::products::errors::invalid_category;

/// Product Response
///
/// The id is exposed as `_id` for the storefront client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// Product UUID
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub name: String,

    /// One of the fixed category names, e.g. `"Engine Parts"`
    pub category: String,

    pub brand: Option<String>,

    pub description: Option<String>,

    /// Free-form technical details, e.g. `{"Material": "Ceramic"}`
    pub specs: Option<BTreeMap<String, String>>,

    /// Price in minor units
    pub price: u64,

    /// Units in stock
    pub stock: u32,

    /// Public path of the product image
    pub image: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into_uuid(),
            name: product.name,
            category: product.category.to_string(),
            brand: product.brand,
            description: product.description,
            specs: product.specs,
            price: product.price,
            stock: product.stock,
            image: product.image,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

pub(crate) fn parse_category(value: &str) -> Result<Category, salvo::prelude::StatusError> {
    value.parse::<Category>().map_err(|error| invalid_category(&error))
}
