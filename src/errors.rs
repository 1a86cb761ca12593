use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::external::quote_provider::QuoteProviderError;
use crate::models::SellRejection;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Db(sqlx::Error),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("no open position to sell")]
    NoPosition,
    #[error("requested quantity {requested} exceeds available position {available}")]
    InsufficientPosition {
        requested: BigDecimal,
        available: BigDecimal,
    },
    #[error("rate limited by quote provider")]
    RateLimited,
    #[error("quote provider error: {0}")]
    External(String),
    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::NoPosition | AppError::InsufficientPosition { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response()
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            AppError::RateLimited => {
                let mut headers = HeaderMap::new();
                headers.insert("Retry-After", HeaderValue::from_static("60"));
                (StatusCode::TOO_MANY_REQUESTS, headers, "Rate limited").into_response()
            }
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            AppError::Db(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        AppError::Db(value)
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}

impl From<SellRejection> for AppError {
    fn from(value: SellRejection) -> Self {
        match value {
            SellRejection::NoPosition => AppError::NoPosition,
            SellRejection::Insufficient {
                requested,
                available,
            } => AppError::InsufficientPosition {
                requested,
                available,
            },
        }
    }
}

impl From<QuoteProviderError> for AppError {
    fn from(value: QuoteProviderError) -> Self {
        match value {
            QuoteProviderError::RateLimited => AppError::RateLimited,
            other => AppError::External(other.to_string()),
        }
    }
}
