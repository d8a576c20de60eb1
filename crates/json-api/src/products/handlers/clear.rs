//! Clear Products Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Products Cleared Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductsClearedResponse {
    pub success: bool,

    /// Number of products removed
    pub deleted_count: u64,
}

/// Clear Products Handler
///
/// Irreversibly deletes every product.
#[endpoint(
    tags("products"),
    summary = "Delete All Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Inventory cleared"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsClearedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let deleted_count = state
        .app
        .products
        .clear_products()
        .await
        .map_err(into_status_error)?;

    warn!(deleted_count, actor = %actor.id(), "inventory cleared");

    Ok(Json(ProductsClearedResponse {
        success: true,
        deleted_count,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::domain::products::MockProductsService;

    use crate::test_helpers::products_service;

    use super::*;

    #[tokio::test]
    async fn test_clear_reports_deleted_count() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_clear_products()
            .once()
            .return_once(|| Ok(14));

        let mut res = TestClient::delete("http://example.com/products")
            .send(&products_service(
                products,
                Router::with_path("products").delete(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(body, json!({ "success": true, "deletedCount": 14 }));

        Ok(())
    }
}
