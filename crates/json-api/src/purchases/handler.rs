//! Purchase Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::purchases::{
    data::PurchaseLine,
    records::{PurchaseReceipt, PurchasedLine},
};

use crate::{
    extensions::*,
    observability::{PurchaseOutcome, record_purchase},
    purchases::errors::{into_status_error, outcome},
    state::State,
};

/// Purchase Item
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct PurchaseItem {
    /// Product UUID
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Units to buy
    pub quantity: u32,
}

/// Purchase Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct PurchaseRequest {
    pub items: Vec<PurchaseItem>,
}

/// Purchased line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchasedItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    /// Stock left after the purchase
    pub remaining: u32,
}

impl From<PurchasedLine> for PurchasedItem {
    fn from(line: PurchasedLine) -> Self {
        PurchasedItem {
            id: line.product.into_uuid(),
            name: line.name,
            quantity: line.quantity,
            remaining: line.remaining,
        }
    }
}

/// Purchase Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    pub success: bool,
    pub message: String,
    pub items: Vec<PurchasedItem>,
}

impl From<PurchaseReceipt> for PurchaseResponse {
    fn from(receipt: PurchaseReceipt) -> Self {
        PurchaseResponse {
            success: true,
            message: "Purchase successful".to_string(),
            items: receipt.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Purchase Handler
///
/// Decrements stock for every item in one transaction, or for none of them.
#[endpoint(
    tags("products"),
    summary = "Purchase Products",
    responses(
        (status_code = StatusCode::OK, description = "Purchase committed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Purchase failed, nothing changed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Purchase timed out, nothing changed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.purchase",
    skip(json, depot),
    fields(lines = tracing::field::Empty, units = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PurchaseRequest>,
    depot: &mut Depot,
) -> Result<Json<PurchaseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let lines: Vec<PurchaseLine> = json
        .into_inner()
        .items
        .into_iter()
        .map(|item| PurchaseLine {
            product: item.id.into(),
            quantity: item.quantity,
        })
        .collect();

    tracing::Span::current().record("lines", lines.len());

    let receipt = match state.app.purchases.purchase(lines).await {
        Ok(receipt) => receipt,
        Err(error) => {
            record_purchase(outcome(&error), 0);

            return Err(into_status_error(error));
        }
    };

    let units = receipt.units();

    record_purchase(PurchaseOutcome::Completed, units);
    tracing::Span::current().record("units", units);

    Ok(Json(receipt.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::domain::{
        products::records::ProductUuid,
        purchases::{MockPurchasesService, PurchaseError},
    };

    use crate::{errors::ErrorResponse, test_helpers::purchases_service};

    use super::*;

    fn make_service(purchases: MockPurchasesService) -> Service {
        purchases_service(
            purchases,
            Router::with_path("products/purchase").post(handler),
        )
    }

    #[tokio::test]
    async fn test_purchase_forwards_lines_in_order() -> TestResult {
        let brake_pads = ProductUuid::new();
        let spark_plug = ProductUuid::new();

        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_purchase()
            .once()
            .withf(move |lines| {
                *lines
                    == vec![
                        PurchaseLine {
                            product: brake_pads,
                            quantity: 2,
                        },
                        PurchaseLine {
                            product: spark_plug,
                            quantity: 1,
                        },
                    ]
            })
            .return_once(move |_| {
                Ok(PurchaseReceipt {
                    lines: vec![
                        PurchasedLine {
                            product: brake_pads,
                            name: "Brake Pads".to_string(),
                            quantity: 2,
                            remaining: 3,
                        },
                        PurchasedLine {
                            product: spark_plug,
                            name: "Spark Plug".to_string(),
                            quantity: 1,
                            remaining: 0,
                        },
                    ],
                })
            });

        let mut res = TestClient::post("http://example.com/products/purchase")
            .json(&json!({
                "items": [
                    { "_id": brake_pads.into_uuid(), "quantity": 2 },
                    { "_id": spark_plug.into_uuid(), "quantity": 1 }
                ]
            }))
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: PurchaseResponse = res.take_json().await?;

        assert!(body.success, "expected success flag");
        assert_eq!(body.items.len(), 2, "expected both lines");
        assert_eq!(body.items[0].remaining, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_purchase_failed() -> TestResult {
        let product = ProductUuid::new();

        let mut purchases = MockPurchasesService::new();

        purchases.expect_purchase().once().return_once(move |_| {
            Err(PurchaseError::InsufficientStock {
                product,
                name: "Brake Pads".to_string(),
                available: 3,
                requested: 5,
            })
        });

        let mut res = TestClient::post("http://example.com/products/purchase")
            .json(&json!({ "items": [{ "_id": product.into_uuid(), "quantity": 5 }] }))
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "Purchase failed");
        assert_eq!(
            body.details.as_deref(),
            Some("Insufficient stock for Brake Pads")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_items_reach_the_service() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_purchase()
            .once()
            .withf(Vec::is_empty)
            .return_once(|_| Err(PurchaseError::EmptyPurchase));

        let mut res = TestClient::post("http://example.com/products/purchase")
            .json(&json!({ "items": [] }))
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.details.as_deref(), Some("No items to purchase"));

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_quantity_is_rejected_before_the_service() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases.expect_purchase().never();

        let res = TestClient::post("http://example.com/products/purchase")
            .json(&json!({ "items": [{ "_id": Uuid::now_v7(), "quantity": -2 }] }))
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_timeout_returns_503() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_purchase()
            .once()
            .return_once(|_| Err(PurchaseError::TransactionTimeout));

        let res = TestClient::post("http://example.com/products/purchase")
            .json(&json!({ "items": [{ "_id": Uuid::now_v7(), "quantity": 1 }] }))
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
