//! Purchase Data

use rustc_hash::FxHashMap;

use crate::domain::{products::records::ProductUuid, purchases::errors::PurchaseError};

/// Purchase Line Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseLine {
    pub product: ProductUuid,
    pub quantity: u32,
}

/// Validate a purchase and fold repeated products into one line each.
///
/// Lines keep the position of each product's first appearance.
pub(crate) fn combine_lines(lines: &[PurchaseLine]) -> Result<Vec<PurchaseLine>, PurchaseError> {
    if lines.is_empty() {
        return Err(PurchaseError::EmptyPurchase);
    }

    let mut combined: Vec<PurchaseLine> = Vec::with_capacity(lines.len());
    let mut positions: FxHashMap<ProductUuid, usize> = FxHashMap::default();

    for line in lines {
        if line.quantity == 0 {
            return Err(PurchaseError::InvalidQuantity(line.product));
        }

        match positions.get(&line.product).and_then(|&i| combined.get_mut(i)) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or(PurchaseError::InvalidQuantity(line.product))?;
            }
            None => {
                positions.insert(line.product, combined.len());
                combined.push(*line);
            }
        }
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: ProductUuid, quantity: u32) -> PurchaseLine {
        PurchaseLine { product, quantity }
    }

    #[test]
    fn empty_purchase_is_rejected() {
        let result = combine_lines(&[]);

        assert!(matches!(result, Err(PurchaseError::EmptyPurchase)));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let a = ProductUuid::new();

        let result = combine_lines(&[line(ProductUuid::new(), 1), line(a, 0)]);

        assert!(matches!(result, Err(PurchaseError::InvalidQuantity(id)) if id == a));
    }

    #[test]
    fn repeated_products_are_combined_in_first_seen_order() -> Result<(), PurchaseError> {
        let a = ProductUuid::new();
        let b = ProductUuid::new();

        let combined = combine_lines(&[line(b, 1), line(a, 2), line(b, 3)])?;

        assert_eq!(combined, vec![line(b, 4), line(a, 2)]);

        Ok(())
    }

    #[test]
    fn combined_quantity_overflow_is_rejected() {
        let a = ProductUuid::new();

        let result = combine_lines(&[line(a, u32::MAX), line(a, 1)]);

        assert!(matches!(result, Err(PurchaseError::InvalidQuantity(id)) if id == a));
    }
}
