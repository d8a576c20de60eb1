//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use stockroom_app::domain::products::{ProductsServiceError, records::UnknownCategory};

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Not found"),
        ProductsServiceError::InvalidData(details) => StatusError::bad_request()
            .brief("Invalid product")
            .detail(details),
        ProductsServiceError::InvalidPrice(_) => StatusError::bad_request()
            .brief("Invalid product")
            .detail("price is out of range"),
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn invalid_category(error: &UnknownCategory) -> StatusError {
    StatusError::bad_request()
        .brief("Invalid category")
        .detail(error.to_string())
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn not_found_has_stable_message() {
        let error = into_status_error(ProductsServiceError::NotFound);

        assert_eq!(error.code, StatusCode::NOT_FOUND);
        assert_eq!(error.brief, "Not found");
    }

    #[test]
    fn storage_errors_hide_details() {
        let error = into_status_error(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.detail.is_none(), "no internal detail is exposed");
    }
}
