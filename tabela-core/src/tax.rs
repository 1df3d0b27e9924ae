//! ICMS/Difal classification from a product's fiscal profile and origin.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::TaxClassification;
use crate::repository::FiscalProfileRepository;
use crate::{PricingError, PricingResult};

/// ICMS rate when the tax profile carries a reduction
pub const REDUCED_ICMS: f64 = 0.088;
/// ICMS rate without reduction
pub const FULL_ICMS: f64 = 0.18;
/// Interstate rate for domestic goods
pub const DOMESTIC_INTERSTATE_RATE: f64 = 0.12;
/// Interstate rate for imported goods
pub const FOREIGN_INTERSTATE_RATE: f64 = 0.04;

const FOREIGN_ORIGIN_CODES: [&str; 4] = ["1", "2", "3", "8"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductOrigin {
    Domestic,
    Foreign,
}

impl ProductOrigin {
    pub fn from_code(code: &str) -> Self {
        if FOREIGN_ORIGIN_CODES.contains(&code) {
            ProductOrigin::Foreign
        } else {
            ProductOrigin::Domestic
        }
    }
}

/// Effective ICMS and Difal for a reduction sum and origin.
///
/// Only a sum strictly greater than zero counts as a reduction; absent,
/// zero and negative sums all fall back to the full rate.
pub fn classify(reduction_sum: Option<f64>, origin: ProductOrigin) -> TaxClassification {
    let reduced = matches!(reduction_sum, Some(sum) if sum > 0.0);
    let effective_icms = if reduced { REDUCED_ICMS } else { FULL_ICMS };

    let difal = match origin {
        ProductOrigin::Domestic if reduced => 0.0,
        ProductOrigin::Domestic => effective_icms - DOMESTIC_INTERSTATE_RATE,
        ProductOrigin::Foreign => effective_icms - FOREIGN_INTERSTATE_RATE,
    };

    TaxClassification { effective_icms, difal }
}

/// Repository-backed classifier used by the pricing service
#[derive(Clone)]
pub struct TaxClassifier {
    repo: Arc<dyn FiscalProfileRepository>,
}

impl TaxClassifier {
    pub fn new(repo: Arc<dyn FiscalProfileRepository>) -> Self {
        Self { repo }
    }

    pub async fn classify_product(&self, product_id: i64) -> PricingResult<TaxClassification> {
        let reduction_sum = self
            .repo
            .fetch_reduction_sum(product_id)
            .await
            .map_err(|e| PricingError::lookup("reduction sum lookup", e))?;
        debug!(product_id, ?reduction_sum, "ICMS reduction sum fetched");

        let code = self
            .repo
            .fetch_origin_code(product_id)
            .await
            .map_err(|e| PricingError::lookup("origin code lookup", e))?
            .ok_or_else(|| {
                PricingError::missing("origin code lookup", format!("product {}", product_id))
            })?;
        let origin = ProductOrigin::from_code(&code);

        let classification = classify(reduction_sum, origin);
        debug!(
            product_id,
            origin_code = %code,
            ?origin,
            effective_icms = classification.effective_icms,
            difal = classification.difal,
            "Tax classification resolved"
        );

        Ok(classification)
    }
}
