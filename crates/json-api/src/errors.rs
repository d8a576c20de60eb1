//! JSON error bodies

use salvo::{http::ResBody, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Stable, human-readable error message
    pub error: String,

    /// Optional explanation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Catcher hoop that renders every error status as an [`ErrorResponse`].
#[handler]
pub(crate) async fn render_json_error(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let (error, details) = match res.take_body() {
        ResBody::Error(error) => (error.brief, error.detail),
        _ => (
            status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            None,
        ),
    };

    res.render(Json(ErrorResponse { error, details }));

    ctrl.skip_rest();
}
