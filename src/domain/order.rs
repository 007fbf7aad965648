use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    /// Units currently in stock. Never negative once persisted.
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
}

/// One `(product, quantity)` pair of an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedProduct {
    pub id: Uuid,
    pub quantity: i32,
}

/// Absolute stock level to write back for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockUpdate {
    pub id: Uuid,
    pub quantity: i32,
}

/// A priced line ready to be persisted. `price` is copied from the catalog at
/// order time and is never re-read from the product afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer: Customer,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}
