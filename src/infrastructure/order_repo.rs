use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, Order, OrderLine, OrderLineInput};
use crate::domain::ports::OrderRepository;
use crate::schema::{customers, order_lines, orders};

use super::models::{CustomerRow, NewOrderLineRow, NewOrderRow, OrderLineRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(
        &self,
        customer: &Customer,
        lines: Vec<OrderLineInput>,
    ) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        // The order and its lines land together or not at all.
        conn.transaction::<_, DomainError, _>(|conn| {
            let order = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: Uuid::new_v4(),
                    customer_id: customer.id,
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            let new_lines = lines
                .into_iter()
                .enumerate()
                .map(|(position, l)| {
                    let position = i32::try_from(position).map_err(|_| {
                        DomainError::InvalidInput("too many lines in one order".to_string())
                    })?;
                    Ok(NewOrderLineRow {
                        id: Uuid::new_v4(),
                        order_id: order.id,
                        product_id: l.product_id,
                        position,
                        quantity: l.quantity,
                        price: l.price,
                    })
                })
                .collect::<Result<Vec<_>, DomainError>>()?;
            let mut rows = diesel::insert_into(order_lines::table)
                .values(&new_lines)
                .returning(OrderLineRow::as_returning())
                .get_results(conn)?;

            // RETURNING gives no ordering guarantee for multi-row inserts.
            rows.sort_by_key(|r| r.position);

            Ok(Order {
                id: order.id,
                customer: customer.clone(),
                created_at: order.created_at,
                lines: rows.into_iter().map(OrderLine::from).collect(),
            })
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let found = orders::table
            .inner_join(customers::table)
            .filter(orders::id.eq(id))
            .select((OrderRow::as_select(), CustomerRow::as_select()))
            .first::<(OrderRow, CustomerRow)>(&mut conn)
            .optional()?;

        let Some((order, customer)) = found else {
            return Ok(None);
        };

        let lines = OrderLineRow::belonging_to(&order)
            .select(OrderLineRow::as_select())
            .order(order_lines::position.asc())
            .load(&mut conn)?;

        Ok(Some(Order {
            id: order.id,
            customer: customer.into(),
            created_at: order.created_at,
            lines: lines.into_iter().map(OrderLine::from).collect(),
        }))
    }
}
