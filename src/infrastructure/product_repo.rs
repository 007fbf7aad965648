use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewProduct, Product, StockUpdate};
use crate::domain::ports::ProductRepository;
use crate::schema::products;

use super::models::{NewProductRow, ProductRow};

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: &product.name,
                price: &product.price,
                quantity: product.quantity,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_all_by_id(&self, ids: &[Uuid]) -> Result<Vec<Product>, DomainError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::id.eq_any(ids.to_vec()))
            .select(ProductRow::as_select())
            .order(products::created_at.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn update_quantity(&self, updates: &[StockUpdate]) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            for update in updates {
                let affected = diesel::update(products::table.find(update.id))
                    .set((
                        products::quantity.eq(update.quantity),
                        products::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)?;
                if affected == 0 {
                    return Err(DomainError::Internal(format!(
                        "product {} vanished before stock update",
                        update.id
                    )));
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::DieselProductRepository;
    use crate::domain::errors::DomainError;
    use crate::domain::order::{NewProduct, StockUpdate};
    use crate::domain::ports::ProductRepository;
    use crate::infrastructure::test_db::setup_db;

    fn new_product(name: &str, quantity: i32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: BigDecimal::from_str("10.00").expect("valid decimal"),
            quantity,
        }
    }

    #[tokio::test]
    async fn find_all_by_id_returns_only_matches() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        let chair = repo.create(new_product("chair", 5)).expect("create failed");
        repo.create(new_product("table", 2)).expect("create failed");

        let found = repo
            .find_all_by_id(&[chair.id, Uuid::new_v4()])
            .expect("lookup failed");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, chair.id);
        assert_eq!(found[0].price, BigDecimal::from(10));
    }

    #[tokio::test]
    async fn update_quantity_sets_absolute_stock() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        let chair = repo.create(new_product("chair", 5)).expect("create failed");

        repo.update_quantity(&[StockUpdate {
            id: chair.id,
            quantity: 3,
        }])
        .expect("update failed");

        let found = repo.find_all_by_id(&[chair.id]).expect("lookup failed");
        assert_eq!(found[0].quantity, 3);
    }

    #[tokio::test]
    async fn negative_stock_is_rejected_and_batch_rolled_back() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        let chair = repo.create(new_product("chair", 5)).expect("create failed");
        let table = repo.create(new_product("table", 5)).expect("create failed");

        let result = repo.update_quantity(&[
            StockUpdate {
                id: chair.id,
                quantity: 1,
            },
            StockUpdate {
                id: table.id,
                quantity: -1,
            },
        ]);

        assert!(matches!(result, Err(DomainError::Internal(_))));
        let stock: Vec<i32> = repo
            .find_all_by_id(&[chair.id, table.id])
            .expect("lookup failed")
            .iter()
            .map(|p| p.quantity)
            .collect();
        assert_eq!(stock, vec![5, 5]);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        repo.create(new_product("chair", 5)).expect("create failed");

        let result = repo.create(new_product("chair", 1));

        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }
}
