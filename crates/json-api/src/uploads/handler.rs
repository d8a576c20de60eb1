//! Upload Image Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extensions::*, state::State, uploads::filename::stored_file_name};

/// Largest accepted image.
pub(crate) const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Multipart body cap. Leaves room to read an oversized image far enough to
/// report it as too large instead of as missing.
const MAX_UPLOAD_BODY_BYTES: usize = 2 * 5 * 1024 * 1024;

const IMAGE_FIELD: &str = "image";

const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/webp", "image/gif"];

/// Upload Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UploadResponse {
    /// Public path of the stored image
    pub url: String,
}

/// Upload Image Handler
///
/// Accepts a multipart form with one `image` field (png, jpeg, webp or gif,
/// at most 5 MiB).
#[endpoint(
    tags("uploads"),
    summary = "Upload Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Image stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing, oversized or unsupported image"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<UploadResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    req.set_secure_max_size(MAX_UPLOAD_BODY_BYTES);

    let file = req
        .file(IMAGE_FIELD)
        .await
        .ok_or_else(|| StatusError::bad_request().brief("No file uploaded"))?;

    if file.size() > MAX_IMAGE_BYTES {
        return Err(StatusError::bad_request()
            .brief("Image too large")
            .detail("images must be 5 MiB or smaller"));
    }

    let content_type = file
        .content_type()
        .map(|mime| mime.essence_str().to_ascii_lowercase());

    if !content_type
        .as_deref()
        .is_some_and(|content_type| ALLOWED_CONTENT_TYPES.contains(&content_type))
    {
        return Err(StatusError::bad_request()
            .brief("Unsupported image type")
            .detail("Only image files are allowed (png, jpg, jpeg, webp, gif)"));
    }

    let file_name = stored_file_name(
        Timestamp::now().as_millisecond(),
        file.name().unwrap_or_default(),
    );

    tokio::fs::create_dir_all(&state.uploads_dir)
        .await
        .or_500("failed to create uploads directory")?;

    tokio::fs::copy(file.path(), state.uploads_dir.join(&file_name))
        .await
        .or_500("failed to store uploaded image")?;

    info!(file_name = %file_name, bytes = file.size(), "image uploaded");

    Ok(Json(UploadResponse {
        url: format!("/uploads/{file_name}"),
    }))
}
