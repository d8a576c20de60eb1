//! Purchases service.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{debug, warn};

use crate::{
    database::Db,
    domain::{
        products::records::ProductUuid,
        purchases::{
            data::{PurchaseLine, combine_lines},
            errors::PurchaseError,
            records::{LockedProduct, PurchaseReceipt, PurchasedLine},
            repository::PgPurchasesRepository,
        },
    },
};

pub const DEFAULT_PURCHASE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct PgPurchasesService {
    db: Db,
    repository: PgPurchasesRepository,
    timeout: Duration,
}

impl PgPurchasesService {
    #[must_use]
    pub fn new(db: Db, timeout: Duration) -> Self {
        Self {
            db,
            repository: PgPurchasesRepository::new(),
            timeout,
        }
    }

    async fn run(&self, lines: &[PurchaseLine]) -> Result<PurchaseReceipt, PurchaseError> {
        let mut tx = self.db.begin_bounded_transaction(self.timeout).await?;

        match self.apply(&mut tx, lines).await {
            Ok(receipt) => {
                tx.commit().await?;

                Ok(receipt)
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "purchase rollback failed");
                }

                Err(error)
            }
        }
    }

    async fn apply(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[PurchaseLine],
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let uuids: Vec<_> = lines.iter().map(|line| line.product.into_uuid()).collect();

        let mut locked: FxHashMap<ProductUuid, LockedProduct> = self
            .repository
            .lock_products(tx, &uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let mut receipt = PurchaseReceipt::default();

        for line in lines {
            let product = locked
                .remove(&line.product)
                .ok_or(PurchaseError::ProductNotFound(line.product))?;

            if product.stock < line.quantity {
                return Err(PurchaseError::InsufficientStock {
                    product: line.product,
                    name: product.name,
                    available: product.stock,
                    requested: line.quantity,
                });
            }

            let remaining = self
                .repository
                .decrement_stock(tx, line.product, line.quantity)
                .await?;

            receipt.lines.push(PurchasedLine {
                product: line.product,
                name: product.name,
                quantity: line.quantity,
                remaining,
            });
        }

        Ok(receipt)
    }
}

#[async_trait]
impl PurchasesService for PgPurchasesService {
    async fn purchase(&self, lines: Vec<PurchaseLine>) -> Result<PurchaseReceipt, PurchaseError> {
        let lines = combine_lines(&lines)?;

        if let Ok(result) = tokio::time::timeout(self.timeout, self.run(&lines)).await {
            if let Ok(receipt) = &result {
                debug!(lines = receipt.lines.len(), units = receipt.units(), "purchase committed");
            }

            result
        } else {
            warn!(timeout_ms = self.timeout.as_millis(), "purchase timed out");

            Err(PurchaseError::TransactionTimeout)
        }
    }
}

#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// Atomically decrement stock for every line, or for none of them.
    ///
    /// Repeated products are combined before stock is checked.
    async fn purchase(&self, lines: Vec<PurchaseLine>) -> Result<PurchaseReceipt, PurchaseError>;
}
