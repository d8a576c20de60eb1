//! Product Records

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: Category,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub specs: Option<BTreeMap<String, String>>,
    pub price: u64,
    pub stock: u32,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product category, stored and serialized as its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Engine Parts")]
    EngineParts,
    #[serde(rename = "Body & Frame")]
    BodyAndFrame,
    #[serde(rename = "Electrical & Lighting")]
    ElectricalAndLighting,
    #[serde(rename = "Brakes & Suspension")]
    BrakesAndSuspension,
    #[serde(rename = "Wheels & Tyres")]
    WheelsAndTyres,
    #[serde(rename = "Accessories")]
    Accessories,
    #[serde(rename = "Oils & Lubricants")]
    OilsAndLubricants,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::EngineParts,
        Category::BodyAndFrame,
        Category::ElectricalAndLighting,
        Category::BrakesAndSuspension,
        Category::WheelsAndTyres,
        Category::Accessories,
        Category::OilsAndLubricants,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::EngineParts => "Engine Parts",
            Category::BodyAndFrame => "Body & Frame",
            Category::ElectricalAndLighting => "Electrical & Lighting",
            Category::BrakesAndSuspension => "Brakes & Suspension",
            Category::WheelsAndTyres => "Wheels & Tyres",
            Category::Accessories => "Accessories",
            Category::OilsAndLubricants => "Oils & Lubricants",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Aggregate inventory figures for the stock dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryStats {
    pub count: u64,
    pub total_stock: u64,
    /// Products with some stock left, but fewer than [`LOW_STOCK_THRESHOLD`] units.
    pub low_stock: u64,
    pub out_of_stock: u64,
    pub categories: u64,
}

pub const LOW_STOCK_THRESHOLD: u32 = 30;
