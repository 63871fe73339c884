use rust_decimal::Decimal;

use super::{ProductAction, ProductActionResult, ProductError};
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price <= Decimal::ZERO {
        return Err(ProductError::ValidationError("price must be positive".to_string()));
    }
    Ok(())
}

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &String { &self.id }

    /// Creates a new, active Product from creation parameters.
    fn from_create(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name is required".to_string()));
        }
        validate_price(params.price)?;
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            description: params.description,
            price: params.price,
            stock: params.stock,
            active: true,
        })
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ProductError::ValidationError("name is required".to_string()));
            }
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Errors
    /// Returns an error if attempting to reserve more stock than available,
    /// reserving from an inactive product, or moving zero units.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::ReserveStock(amount) => {
                if amount == 0 {
                    return Err(ProductError::InvalidQuantity(amount));
                }
                if !self.active {
                    return Err(ProductError::Inactive(self.id.clone()));
                }
                if self.stock < amount {
                    return Err(ProductError::InsufficientStock {
                        requested: amount,
                        available: self.stock,
                    });
                }
                self.stock -= amount;
                Ok(ProductActionResult::Reserved)
            }
            ProductAction::ReleaseStock(amount) => {
                if amount == 0 {
                    return Err(ProductError::InvalidQuantity(amount));
                }
                self.stock = self.stock.saturating_add(amount);
                Ok(ProductActionResult::Released)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hoodie(stock: u32) -> Product {
        Product::from_create(
            "prd_1".into(),
            ProductCreate {
                name: "Hoodie".into(),
                description: String::new(),
                price: Decimal::new(5900, 2),
                stock,
            },
        )
        .unwrap()
    }

    #[test]
    fn reserve_and_release() {
        let mut p = hoodie(3);
        assert_eq!(p.handle_action(ProductAction::ReserveStock(2)), Ok(ProductActionResult::Reserved));
        assert_eq!(
            p.handle_action(ProductAction::ReserveStock(2)),
            Err(ProductError::InsufficientStock { requested: 2, available: 1 })
        );
        p.handle_action(ProductAction::ReleaseStock(2)).unwrap();
        assert_eq!(p.handle_action(ProductAction::CheckStock), Ok(ProductActionResult::StockLevel(3)));
    }

    #[test]
    fn inactive_products_cannot_be_reserved() {
        let mut p = hoodie(3);
        p.on_update(ProductPatch { active: Some(false), ..Default::default() }).unwrap();
        assert_eq!(
            p.handle_action(ProductAction::ReserveStock(1)),
            Err(ProductError::Inactive("prd_1".into()))
        );
    }

    #[test]
    fn non_positive_price_rejected() {
        let mut p = hoodie(1);
        let err = p
            .on_update(ProductPatch { price: Some(Decimal::ZERO), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, ProductError::ValidationError(_)));
    }
}
