//! Purchase Errors

use salvo::http::StatusError;
use tracing::error;

use stockroom_app::domain::purchases::PurchaseError;

use crate::observability::PurchaseOutcome;

pub(crate) fn outcome(error: &PurchaseError) -> PurchaseOutcome {
    match error {
        PurchaseError::EmptyPurchase
        | PurchaseError::InvalidQuantity(_)
        | PurchaseError::ProductNotFound(_)
        | PurchaseError::InsufficientStock { .. } => PurchaseOutcome::Rejected,
        PurchaseError::TransactionTimeout => PurchaseOutcome::TimedOut,
        PurchaseError::Sql(_) => PurchaseOutcome::Failed,
    }
}

pub(crate) fn into_status_error(error: PurchaseError) -> StatusError {
    match error {
        PurchaseError::EmptyPurchase
        | PurchaseError::InvalidQuantity(_)
        | PurchaseError::ProductNotFound(_)
        | PurchaseError::InsufficientStock { .. } => StatusError::bad_request()
            .brief("Purchase failed")
            .detail(error.to_string()),
        PurchaseError::TransactionTimeout => StatusError::service_unavailable()
            .brief("Purchase timed out")
            .detail("the inventory is busy, please retry"),
        PurchaseError::Sql(source) => {
            error!("purchase storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use stockroom_app::domain::products::records::ProductUuid;

    use super::*;

    #[test]
    fn insufficient_stock_names_the_product() {
        let error = PurchaseError::InsufficientStock {
            product: ProductUuid::new(),
            name: "Brake Pads".to_string(),
            available: 3,
            requested: 5,
        };

        assert_eq!(outcome(&error), PurchaseOutcome::Rejected);

        let error = into_status_error(error);

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Purchase failed");
        assert_eq!(
            error.detail.as_deref(),
            Some("Insufficient stock for Brake Pads")
        );
    }

    #[test]
    fn timeout_is_service_unavailable() {
        assert_eq!(
            outcome(&PurchaseError::TransactionTimeout),
            PurchaseOutcome::TimedOut
        );
        assert_eq!(
            into_status_error(PurchaseError::TransactionTimeout).code,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
