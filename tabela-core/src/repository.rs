use async_trait::async_trait;
use crate::entities::{CommissionCost, CostProfile, TunableParameters};

/// Repository trait for the commercial cost snapshot
#[async_trait]
pub trait CostProfileRepository: Send + Sync {
    async fn fetch_cost_profile(
        &self,
        sku: &str,
    ) -> Result<Option<CostProfile>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for the global tuning row
#[async_trait]
pub trait ParameterRepository: Send + Sync {
    async fn fetch_tunable_parameters(
        &self,
    ) -> Result<Option<TunableParameters>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for commission and freight data
#[async_trait]
pub trait CommissionRepository: Send + Sync {
    async fn fetch_commission_cost(
        &self,
        sku: &str,
    ) -> Result<Option<CommissionCost>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for the fiscal data behind tax classification
#[async_trait]
pub trait FiscalProfileRepository: Send + Sync {
    /// Sum of the ICMS reduction over the product's tax profile rows.
    /// `None` when the sum is NULL (no matching rows).
    async fn fetch_reduction_sum(
        &self,
        product_id: i64,
    ) -> Result<Option<f64>, Box<dyn std::error::Error + Send + Sync>>;

    /// Origin code of the product, `None` when the product is unknown or has no origin.
    async fn fetch_origin_code(
        &self,
        product_id: i64,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;
}
