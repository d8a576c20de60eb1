//! Purchase Records

use crate::domain::products::records::ProductUuid;

/// Product row as seen under the purchase's row lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LockedProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub stock: u32,
}

/// Committed purchase line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchasedLine {
    pub product: ProductUuid,
    pub name: String,
    pub quantity: u32,
    pub remaining: u32,
}

/// Purchase Receipt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub lines: Vec<PurchasedLine>,
}

impl PurchaseReceipt {
    #[must_use]
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
