//! In-process repositories backed by `Mutex`-guarded collections.
//!
//! Used by the test suites and for running the HTTP layer without Postgres.
//! Each repository is internally consistent per call, like the Diesel
//! adapters, but nothing spans calls.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    Customer, NewCustomer, NewProduct, Order, OrderLine, OrderLineInput, Product, StockUpdate,
};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::Internal("in-memory store lock poisoned".to_string()))
}

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: Mutex<HashMap<Uuid, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        let mut customers = lock(&self.customers)?;
        if customers.values().any(|c| c.email == customer.email) {
            return Err(DomainError::Conflict(format!(
                "e-mail '{}' is already in use",
                customer.email
            )));
        }

        let created = Customer {
            id: Uuid::new_v4(),
            name: customer.name,
            email: customer.email,
            created_at: Utc::now(),
        };
        customers.insert(created.id, created.clone());
        Ok(created)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(lock(&self.customers)?.get(&id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Mutex<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut products = lock(&self.products)?;
        if products.values().any(|p| p.name == product.name) {
            return Err(DomainError::Conflict(format!(
                "product '{}' already exists",
                product.name
            )));
        }

        let created = Product {
            id: Uuid::new_v4(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: Utc::now(),
        };
        products.insert(created.id, created.clone());
        Ok(created)
    }

    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        let products = lock(&self.products)?;
        let mut found: Vec<Product> = products
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        found.sort_by_key(|p| p.created_at);
        Ok(found)
    }

    fn update_quantity(&self, updates: &[StockUpdate]) -> Result<(), DomainError> {
        let mut products = lock(&self.products)?;

        // Validate the whole batch before touching anything so a bad entry
        // leaves every product as it was.
        for update in updates {
            if update.quantity < 0 {
                return Err(DomainError::Internal(format!(
                    "stock for product {} would become negative",
                    update.id
                )));
            }
            if !products.contains_key(&update.id) {
                return Err(DomainError::Internal(format!(
                    "product {} vanished before stock update",
                    update.id
                )));
            }
        }

        for update in updates {
            if let Some(product) = products.get_mut(&update.id) {
                product.quantity = update.quantity;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> Result<usize, DomainError> {
        Ok(lock(&self.orders)?.len())
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn create(
        &self,
        customer: &Customer,
        lines: Vec<OrderLineInput>,
    ) -> Result<Order, DomainError> {
        let order = Order {
            id: Uuid::new_v4(),
            customer: customer.clone(),
            created_at: Utc::now(),
            lines: lines
                .into_iter()
                .map(|l| OrderLine {
                    id: Uuid::new_v4(),
                    product_id: l.product_id,
                    quantity: l.quantity,
                    price: l.price,
                })
                .collect(),
        };
        lock(&self.orders)?.insert(order.id, order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(lock(&self.orders)?.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;

    fn new_product(name: &str, quantity: i32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: BigDecimal::from_str("1.50").expect("valid decimal"),
            quantity,
        }
    }

    #[test]
    fn find_all_by_id_skips_unknown_ids() {
        let repo = InMemoryProductRepository::new();
        let kept = repo.create(new_product("kept", 1)).expect("create failed");
        repo.create(new_product("other", 1)).expect("create failed");

        let found = repo
            .find_all_by_id(&[kept.id, Uuid::new_v4()])
            .expect("lookup failed");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, kept.id);
    }

    #[test]
    fn update_quantity_rejects_negative_stock_without_partial_writes() {
        let repo = InMemoryProductRepository::new();
        let a = repo.create(new_product("a", 4)).expect("create failed");
        let b = repo.create(new_product("b", 4)).expect("create failed");

        let result = repo.update_quantity(&[
            StockUpdate { id: a.id, quantity: 1 },
            StockUpdate { id: b.id, quantity: -1 },
        ]);

        assert!(matches!(result, Err(DomainError::Internal(_))));
        let stock: Vec<i32> = repo
            .find_all_by_id(&[a.id, b.id])
            .expect("lookup failed")
            .iter()
            .map(|p| p.quantity)
            .collect();
        assert_eq!(stock, vec![4, 4]);
    }

    #[test]
    fn duplicate_product_name_is_a_conflict() {
        let repo = InMemoryProductRepository::new();
        repo.create(new_product("lamp", 1)).expect("create failed");

        let result = repo.create(new_product("lamp", 2));

        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[test]
    fn duplicate_customer_email_is_a_conflict() {
        let repo = InMemoryCustomerRepository::new();
        let customer = NewCustomer {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        repo.create(customer.clone()).expect("create failed");

        let result = repo.create(customer);

        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }
}
