//! Service banner and API index

use std::collections::BTreeMap;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

const BANNER: &str = "Stockroom - Stock Management API";

/// API index response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApiIndexResponse {
    /// Service name
    pub message: String,

    /// Server version
    pub version: String,

    /// Top-level resource paths by name
    pub endpoints: BTreeMap<String, String>,
}

/// Plain-text service banner
#[handler]
pub(crate) async fn banner(res: &mut Response) {
    res.render(Text::Plain(BANNER));
}

/// API index
#[endpoint(tags("health"), summary = "API index")]
pub(crate) async fn index() -> Json<ApiIndexResponse> {
    let endpoints = [
        ("products", "/api/products"),
        ("auth", "/api/auth"),
        ("uploads", "/api/uploads"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect();

    Json(ApiIndexResponse {
        message: "Stockroom API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}
