use std::collections::HashSet;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, RequestedProduct};
use crate::errors::AppError;
use crate::state::AppState;

use super::customers::CustomerResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderProductRequest {
    pub id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub products: Vec<OrderProductRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price captured when the order was placed, e.g. "9.99"
    pub price: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer: CustomerResponse,
    pub created_at: String,
    pub products: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer: order.customer.into(),
            created_at: order.created_at.to_rfc3339(),
            products: order
                .lines
                .into_iter()
                .map(|l| OrderLineResponse {
                    id: l.id,
                    product_id: l.product_id,
                    quantity: l.quantity,
                    price: l.price.to_string(),
                })
                .collect(),
        }
    }
}

impl CreateOrderRequest {
    /// Rejects request shapes the order operation does not define: empty or
    /// negative quantities and the same product listed twice.
    fn requested_products(&self) -> Result<Vec<RequestedProduct>, DomainError> {
        let mut seen = HashSet::with_capacity(self.products.len());
        self.products
            .iter()
            .map(|p| {
                if p.quantity <= 0 {
                    return Err(DomainError::InvalidInput(format!(
                        "quantity for product {} must be positive, got {}",
                        p.id, p.quantity
                    )));
                }
                if !seen.insert(p.id) {
                    return Err(DomainError::InvalidInput(format!(
                        "product {} is listed more than once",
                        p.id
                    )));
                }
                Ok(RequestedProduct {
                    id: p.id,
                    quantity: p.quantity,
                })
            })
            .collect()
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Places an order for an existing customer. Line prices are taken from the
/// catalog at the time of the call and the stock of every ordered product is
/// decremented.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Unknown customer or product, or insufficient stock"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let requested = body.requested_products()?;

    let order = web::block(move || {
        state
            .order_service()
            .create_order(body.customer_id, &requested)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
///
/// Returns the order together with its customer and line items.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || state.order_service().get_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??
        .ok_or(DomainError::OrderNotFound)?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
