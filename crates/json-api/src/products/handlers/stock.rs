//! Adjust Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use stockroom_app::domain::products::data::StockAdjustment;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Stock action
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StockAction {
    /// Replace the stock level
    Set,
    /// Receive units
    Add,
    /// Write off units, stopping at zero
    Remove,
}

/// Adjust Stock Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct AdjustStockRequest {
    pub action: StockAction,
    pub quantity: u32,
}

impl From<AdjustStockRequest> for StockAdjustment {
    fn from(request: AdjustStockRequest) -> Self {
        match request.action {
            StockAction::Set => StockAdjustment::Set(request.quantity),
            StockAction::Add => StockAdjustment::Add(request.quantity),
            StockAction::Remove => StockAdjustment::Remove(request.quantity),
        }
    }
}

/// Adjust Stock Handler
#[endpoint(
    tags("products"),
    summary = "Adjust Stock",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock adjusted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.adjust_stock",
    skip(id, json, depot),
    fields(
        product_uuid = tracing::field::Empty,
        action = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<AdjustStockRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = id.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();
    span.record("product_uuid", tracing::field::display(product));
    span.record("action", tracing::field::debug(request.action));
    span.record("quantity", request.quantity);

    let product = state
        .app
        .products
        .adjust_stock(product.into(), request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
