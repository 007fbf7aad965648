use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::OrderNotFound => AppError::NotFound,
            DomainError::Conflict(_) => AppError::Conflict(e.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
            DomainError::CustomerNotFound
            | DomainError::ProductsNotFound
            | DomainError::ProductNotFound(_)
            | DomainError::InsufficientQuantity { .. }
            | DomainError::InvalidInput(_) => AppError::BadRequest(e.to_string()),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Conflict(_) => HttpResponse::Conflict().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Internal(msg) => {
                log::error!("request failed: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;
    use uuid::Uuid;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound.error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_returns_400() {
        let err = AppError::BadRequest("Customer not found".to_string());
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_returns_409() {
        let err = AppError::Conflict("taken".to_string());
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_failures_map_to_bad_request_with_message() {
        let product_id = Uuid::new_v4();
        let cases = vec![
            DomainError::CustomerNotFound,
            DomainError::ProductsNotFound,
            DomainError::ProductNotFound(product_id),
            DomainError::InsufficientQuantity {
                product_id,
                requested: 6,
                available: 5,
            },
            DomainError::InvalidInput("quantity must be positive".to_string()),
        ];

        for domain in cases {
            let message = domain.to_string();
            let app_err: AppError = domain.into();
            assert!(matches!(&app_err, AppError::BadRequest(m) if *m == message));
        }
    }

    #[test]
    fn domain_order_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::OrderNotFound.into();
        assert!(matches!(app_err, AppError::NotFound));
    }

    #[test]
    fn domain_conflict_maps_to_app_conflict() {
        let app_err: AppError = DomainError::Conflict("dup".to_string()).into();
        assert!(matches!(app_err, AppError::Conflict(_)));
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
