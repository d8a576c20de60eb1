//! Create Product Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;

use stockroom_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductResponse, parse_category},
    },
    state::State,
};

/// Create Product Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specs: Option<BTreeMap<String, String>>,
    /// Price in minor units
    pub price: u64,
    pub stock: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = StatusError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            category: parse_category(&request.category)?,
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

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty, actor = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;
    let product = NewProduct::try_from(json.into_inner())?;

    let product = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(into_status_error)?;

    let span = tracing::Span::current();
    span.record("product_uuid", tracing::field::display(product.uuid));
    span.record("actor", tracing::field::display(actor.id()));

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::domain::products::{
        MockProductsService, ProductsServiceError,
        records::{Category, ProductRecord, ProductUuid},
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{make_product, products_service},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").post(handler))
    }

    fn stored(new: &NewProduct) -> ProductRecord {
        let mut product = make_product(ProductUuid::new(), new.stock);

        product.name.clone_from(&new.name);
        product.category = new.category;
        product.price = new.price;
        product.specs.clone_from(&new.specs);

        product
    }

    #[tokio::test]
    async fn test_create_product_returns_201() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                *new == NewProduct {
                    name: "Spark Plug".to_string(),
                    category: Category::EngineParts,
                    brand: None,
                    description: None,
                    specs: Some(BTreeMap::from([("gap".to_string(), "0.8mm".to_string())])),
                    price: 899,
                    stock: 40,
                    image: None,
                }
            })
            .return_once(|new| Ok(stored(&new)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Spark Plug",
                "category": "Engine Parts",
                "specs": { "gap": "0.8mm" },
                "price": 899,
                "stock": 40
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ProductResponse = res.take_json().await?;
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok());

        assert_eq!(location, Some(format!("/api/products/{}", body.id).as_str()));
        assert_eq!(body.name, "Spark Plug");
        assert_eq!(body.category, "Engine Parts");
        assert_eq!(body.stock, 40);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unknown_category_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Spark Plug",
                "category": "Snacks",
                "price": 899,
                "stock": 5
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_negative_stock_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Spark Plug",
                "category": "Engine Parts",
                "price": 899,
                "stock": -1
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_blank_name_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| {
                Err(ProductsServiceError::InvalidData(
                    "name must not be empty".to_string(),
                ))
            });

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": " ",
                "category": "Accessories",
                "price": 100,
                "stock": 1
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_without_stock_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Spark Plug", "category": "Engine Parts", "price": 899 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_price_out_of_range_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| new.price == u64::MAX)
            .return_once(|_| {
                Err(ProductsServiceError::from(
                    i64::try_from(u64::MAX).unwrap_err(),
                ))
            });

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Gold Plated Spark Plug",
                "category": "Engine Parts",
                "price": u64::MAX,
                "stock": 1
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "Invalid product");
        assert_eq!(body.details.as_deref(), Some("price is out of range"));

        Ok(())
    }
}
