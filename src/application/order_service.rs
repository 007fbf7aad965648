use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLineInput, Product, RequestedProduct, StockUpdate};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};

pub struct OrderService<O, P, C> {
    orders: O,
    products: P,
    customers: C,
}

impl<O, P, C> OrderService<O, P, C>
where
    O: OrderRepository,
    P: ProductRepository,
    C: CustomerRepository,
{
    pub fn new(orders: O, products: P, customers: C) -> Self {
        Self {
            orders,
            products,
            customers,
        }
    }

    /// Places an order for `customer_id` and decrements stock for every
    /// requested product.
    ///
    /// Validation stops at the first failure, in this order: unknown customer,
    /// no product matched at all, some product missing, a quantity that is not
    /// positive, stock too low. Nothing is written until all checks pass.
    ///
    /// The stock check and the stock update are separate repository calls with
    /// no lock between them, so two concurrent orders for the same product can
    /// both pass validation and oversell. If the stock update fails after the
    /// order has been stored, the order stays and stock is left untouched; the
    /// error is logged and returned.
    pub fn create_order(
        &self,
        customer_id: Uuid,
        requested: &[RequestedProduct],
    ) -> Result<Order, DomainError> {
        let customer = self.customers.find_by_id(customer_id)?.ok_or_else(|| {
            log::warn!("order rejected: customer {} not found", customer_id);
            DomainError::CustomerNotFound
        })?;

        let ids: Vec<Uuid> = requested.iter().map(|p| p.id).collect();
        let found = self.products.find_all_by_id(&ids)?;
        if found.is_empty() {
            log::warn!("order rejected: none of {} products exist", ids.len());
            return Err(DomainError::ProductsNotFound);
        }

        let catalog: HashMap<Uuid, &Product> = found.iter().map(|p| (p.id, p)).collect();

        if let Some(missing) = requested.iter().find(|p| !catalog.contains_key(&p.id)) {
            log::warn!("order rejected: product {} not found", missing.id);
            return Err(DomainError::ProductNotFound(missing.id));
        }

        // Every requested id is in `catalog` past this point.
        let priced: Vec<(&RequestedProduct, &Product)> = requested
            .iter()
            .filter_map(|r| catalog.get(&r.id).map(|p| (r, *p)))
            .collect();

        if let Some((r, _)) = priced.iter().find(|(r, _)| r.quantity <= 0) {
            log::warn!(
                "order rejected: non-positive quantity {} for product {}",
                r.quantity,
                r.id
            );
            return Err(DomainError::InvalidInput(format!(
                "quantity for product {} must be positive, got {}",
                r.id, r.quantity
            )));
        }

        if let Some((r, p)) = priced.iter().find(|(r, p)| r.quantity > p.quantity) {
            log::warn!(
                "order rejected: product {} has {} in stock, {} requested",
                p.id,
                p.quantity,
                r.quantity
            );
            return Err(DomainError::InsufficientQuantity {
                product_id: p.id,
                requested: r.quantity,
                available: p.quantity,
            });
        }

        let lines: Vec<OrderLineInput> = priced
            .iter()
            .map(|(r, p)| OrderLineInput {
                product_id: r.id,
                quantity: r.quantity,
                price: p.price.clone(),
            })
            .collect();

        let order = self.orders.create(&customer, lines)?;

        let stock: Vec<StockUpdate> = priced
            .iter()
            .map(|(r, p)| StockUpdate {
                id: r.id,
                quantity: p.quantity - r.quantity,
            })
            .collect();

        if let Err(e) = self.products.update_quantity(&stock) {
            log::error!(
                "order {} stored but stock update failed, stock not decremented: {}",
                order.id,
                e
            );
            return Err(e);
        }

        log::info!(
            "order {} created for customer {} with {} line(s)",
            order.id,
            customer.id,
            order.lines.len()
        );
        Ok(order)
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.orders.find_by_id(id)
    }
}
