use std::sync::Arc;

use crate::application::customer_service::CustomerService;
use crate::application::order_service::OrderService;
use crate::application::product_service::ProductService;
use crate::db::DbPool;
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::infrastructure::customer_repo::DieselCustomerRepository;
use crate::infrastructure::memory::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
};
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::product_repo::DieselProductRepository;

pub type SharedOrderService = OrderService<
    Arc<dyn OrderRepository>,
    Arc<dyn ProductRepository>,
    Arc<dyn CustomerRepository>,
>;

/// Repositories shared by every worker of the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl AppState {
    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            customers: Arc::new(DieselCustomerRepository::new(pool.clone())),
            products: Arc::new(DieselProductRepository::new(pool.clone())),
            orders: Arc::new(DieselOrderRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            customers: Arc::new(InMemoryCustomerRepository::new()),
            products: Arc::new(InMemoryProductRepository::new()),
            orders: Arc::new(InMemoryOrderRepository::new()),
        }
    }

    pub fn order_service(&self) -> SharedOrderService {
        OrderService::new(
            self.orders.clone(),
            self.products.clone(),
            self.customers.clone(),
        )
    }

    pub fn customer_service(&self) -> CustomerService<Arc<dyn CustomerRepository>> {
        CustomerService::new(self.customers.clone())
    }

    pub fn product_service(&self) -> ProductService<Arc<dyn ProductRepository>> {
        ProductService::new(self.products.clone())
    }
}
