use std::sync::Arc;

use uuid::Uuid;

use super::errors::DomainError;
use super::order::{
    Customer, NewCustomer, NewProduct, Order, OrderLineInput, Product, StockUpdate,
};

pub trait CustomerRepository: Send + Sync + 'static {
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError>;
    /// Returns only the products that exist; unknown ids are silently skipped.
    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError>;
    /// Sets each listed product's stock to the given absolute quantity.
    fn update_quantity(&self, updates: &[StockUpdate]) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, customer: &Customer, lines: Vec<OrderLineInput>)
        -> Result<Order, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
}

// Shared handles delegate, so services can be built over `Arc<dyn ...>`.

impl<T: CustomerRepository + ?Sized> CustomerRepository for Arc<T> {
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        (**self).create(customer)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        (**self).find_by_id(id)
    }
}

impl<T: ProductRepository + ?Sized> ProductRepository for Arc<T> {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        (**self).create(product)
    }

    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        (**self).find_all_by_id(ids)
    }

    fn update_quantity(&self, updates: &[StockUpdate]) -> Result<(), DomainError> {
        (**self).update_quantity(updates)
    }
}

impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    fn create(
        &self,
        customer: &Customer,
        lines: Vec<OrderLineInput>,
    ) -> Result<Order, DomainError> {
        (**self).create(customer, lines)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }
}
