use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewProduct, Product};
use crate::domain::ports::ProductRepository;

/// Prices are stored as `NUMERIC(10, 2)`.
const PRICE_SCALE: i64 = 2;
const PRICE_LIMIT: i64 = 100_000_000;

pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_product(
        &self,
        name: String,
        price: BigDecimal,
        quantity: i32,
    ) -> Result<Product, DomainError> {
        if price < BigDecimal::from(0) {
            return Err(DomainError::InvalidInput(format!(
                "price must not be negative, got {}",
                price
            )));
        }
        if price.with_scale(PRICE_SCALE) != price {
            return Err(DomainError::InvalidInput(format!(
                "price must have at most {} decimal places, got {}",
                PRICE_SCALE, price
            )));
        }
        if price >= BigDecimal::from(PRICE_LIMIT) {
            return Err(DomainError::InvalidInput(format!(
                "price must be below {}, got {}",
                PRICE_LIMIT, price
            )));
        }
        if quantity < 0 {
            return Err(DomainError::InvalidInput(format!(
                "quantity must not be negative, got {}",
                quantity
            )));
        }

        let product = self.repo.create(NewProduct {
            name,
            price,
            quantity,
        })?;
        log::info!(
            "product {} added with {} unit(s) at {}",
            product.id,
            product.quantity,
            product.price
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::infrastructure::memory::InMemoryProductRepository;

    fn price(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn creates_product_with_given_stock_and_price() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let product = service
            .create_product("Desk".to_string(), price("120.00"), 3)
            .expect("create failed");

        assert_eq!(product.quantity, 3);
        assert_eq!(product.price, price("120.00"));
    }

    #[test]
    fn negative_quantity_is_invalid() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let err = service
            .create_product("Desk".to_string(), price("1"), -1)
            .expect_err("negative stock should fail");

        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn negative_price_is_invalid() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let err = service
            .create_product("Desk".to_string(), price("-0.01"), 1)
            .expect_err("negative price should fail");

        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn price_with_more_than_two_decimals_is_invalid() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let err = service
            .create_product("Desk".to_string(), price("9.999"), 1)
            .expect_err("sub-cent price should fail");

        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn trailing_zero_decimals_are_accepted() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let product = service
            .create_product("Desk".to_string(), price("9.9900"), 1)
            .expect("create failed");

        assert_eq!(product.price, price("9.99"));
    }

    #[test]
    fn price_at_storage_limit_is_invalid() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let err = service
            .create_product("Desk".to_string(), price("100000000"), 1)
            .expect_err("oversized price should fail");
        assert!(matches!(err, DomainError::InvalidInput(_)));

        service
            .create_product("Lamp".to_string(), price("99999999.99"), 1)
            .expect("largest storable price should be accepted");
    }
}
