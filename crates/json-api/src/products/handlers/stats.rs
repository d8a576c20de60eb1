//! Inventory Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::products::records::InventoryStats;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Inventory Stats Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InventoryStatsResponse {
    /// Number of products
    pub count: u64,

    /// Units in stock across all products
    pub total_stock: u64,

    /// Products with some stock, but below the low-stock threshold
    pub low_stock: u64,

    /// Products with no stock
    pub out_of_stock: u64,

    /// Distinct categories in use
    pub categories: u64,
}

impl From<InventoryStats> for InventoryStatsResponse {
    fn from(stats: InventoryStats) -> Self {
        InventoryStatsResponse {
            count: stats.count,
            total_stock: stats.total_stock,
            low_stock: stats.low_stock,
            out_of_stock: stats.out_of_stock,
            categories: stats.categories,
        }
    }
}

/// Inventory Stats Handler
#[endpoint(
    tags("products"),
    summary = "Inventory Stats",
    responses(
        (status_code = StatusCode::OK, description = "Inventory figures"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<InventoryStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .products
        .inventory_stats()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}
