use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tabela_core::CalculationResult;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CalcAlphaParams {
    pub sku: Option<String>,
    #[serde(rename = "userPrice")]
    pub user_price: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalcAlphaResponse {
    pub sku: String,
    pub valor_final: f64,
    pub detalhes: CalculationResult,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/calcAlpha", get(calculate_alpha))
}

/// An absent or empty price means "no candidate price" and simulates at 0.
pub fn parse_user_price(raw: Option<&str>) -> Result<f64, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or_else(|| AppError::ValidationError("invalid userPrice value".to_string())),
    }
}

/// GET /calcAlpha?sku=1234&userPrice=100.50
pub async fn calculate_alpha(
    State(state): State<AppState>,
    Query(params): Query<CalcAlphaParams>,
) -> Result<Json<CalcAlphaResponse>, AppError> {
    let sku = params
        .sku
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::ValidationError("sku is required".to_string()))?;
    let user_price = parse_user_price(params.user_price.as_deref())?;

    let details = state.pricing.calculate(&sku, user_price).await?;

    Ok(Json(CalcAlphaResponse {
        sku,
        valor_final: details.final_price,
        detalhes: details,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_price() {
        assert_eq!(parse_user_price(None).unwrap(), 0.0);
        assert_eq!(parse_user_price(Some("")).unwrap(), 0.0);
        assert_eq!(parse_user_price(Some("100.50")).unwrap(), 100.5);
        assert_eq!(parse_user_price(Some("-3")).unwrap(), -3.0);
        assert!(parse_user_price(Some("12,50")).is_err());
        assert!(parse_user_price(Some("abc")).is_err());
        assert!(parse_user_price(Some("NaN")).is_err());
    }
}
