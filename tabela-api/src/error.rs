use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tabela_core::PricingError;

/// Errors are returned as plain-text bodies.
#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    Pricing(PricingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Pricing(err) if err.is_client_error() => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Pricing(err) => {
                tracing::error!("Error calculating alpha: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, message).into_response()
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        AppError::Pricing(err)
    }
}
