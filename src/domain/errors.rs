use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Customer not found")]
    CustomerNotFound,
    #[error("Products not found")]
    ProductsNotFound,
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),
    #[error(
        "Insufficient quantity for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientQuantity {
        product_id: Uuid,
        requested: i32,
        available: i32,
    },
    #[error("Order not found")]
    OrderNotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
