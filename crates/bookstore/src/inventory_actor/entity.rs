//! Entity trait implementation for the InventoryItem domain type.

use super::InventoryError;
use crate::model::{InventoryItem, ItemCreate, ItemId};
use resource_actor::ActorEntity;

impl ActorEntity for InventoryItem {
    type Id = ItemId;
    type Create = ItemCreate;
    type Delta = u32;
    type Error = InventoryError;

    fn from_create_params(id: ItemId, params: ItemCreate) -> Result<Self, Self::Error> {
        if !params.price.is_finite() || params.price < 0.0 {
            return Err(InventoryError::InvalidPrice(params.price));
        }
        Ok(Self::new(id, params.title, params.price, params.quantity))
    }

    fn can_apply(&self, quantity: &u32) -> bool {
        *quantity <= self.quantity
    }

    fn apply(&mut self, quantity: &u32) -> Result<(), Self::Error> {
        self.quantity = self
            .quantity
            .checked_sub(*quantity)
            .ok_or(InventoryError::InsufficientStock {
                requested: *quantity,
                available: self.quantity,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_rules() {
        let mut item = InventoryItem::new(ItemId(2), "Book 2", 50.0, 1);
        assert!(item.can_apply(&1));
        assert!(!item.can_apply(&2));

        item.apply(&1).unwrap();
        assert_eq!(item.quantity, 0);
        assert!(!item.is_available());

        // Out of stock: refuse and stay at zero
        let err = item.apply(&1).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                requested: 1,
                available: 0
            }
        );
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn test_create_rejects_bad_price() {
        let params = ItemCreate {
            title: "Book X".to_string(),
            price: f64::NAN,
            quantity: 1,
        };
        assert!(InventoryItem::from_create_params(ItemId(1), params).is_err());
    }
}
