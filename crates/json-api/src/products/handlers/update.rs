//! Update Product Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use stockroom_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductResponse, parse_category},
    },
    state::State,
};

/// Update Product Request
///
/// Absent fields are left unchanged. An empty `brand`, `description` or
/// `image` clears the stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub specs: Option<BTreeMap<String, String>>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub image: Option<String>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductUpdate {
            category: request
                .category
                .as_deref()
                .map(parse_category)
                .transpose()?,
            name: request.name,
            brand: request.brand,
            description: request.description,
            specs: request.specs,
            price: request.price,
            stock: request.stock,
            image: request.image,
        })
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, json, depot),
    fields(product_uuid = tracing::field::Empty, actor = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;
    let product = id.into_inner();
    let update = ProductUpdate::try_from(json.into_inner())?;

    let span = tracing::Span::current();
    span.record("product_uuid", tracing::field::display(product));
    span.record("actor", tracing::field::display(actor.id()));

    let product = state
        .app
        .products
        .update_product(product.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
