//! Gathers the pricing inputs for a SKU and runs the formula over them.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::formula::compute_price;
use crate::report::CalculationResult;
use crate::repository::{CommissionRepository, CostProfileRepository, FiscalProfileRepository, ParameterRepository};
use crate::tax::TaxClassifier;
use crate::{PricingError, PricingResult};

#[derive(Clone)]
pub struct PricingService {
    cost_repo: Arc<dyn CostProfileRepository>,
    parameter_repo: Arc<dyn ParameterRepository>,
    commission_repo: Arc<dyn CommissionRepository>,
    classifier: TaxClassifier,
}

impl PricingService {
    pub fn new(
        cost_repo: Arc<dyn CostProfileRepository>,
        parameter_repo: Arc<dyn ParameterRepository>,
        commission_repo: Arc<dyn CommissionRepository>,
        fiscal_repo: Arc<dyn FiscalProfileRepository>,
    ) -> Self {
        Self {
            cost_repo,
            parameter_repo,
            commission_repo,
            classifier: TaxClassifier::new(fiscal_repo),
        }
    }

    /// Price a SKU without a candidate price (the profit is simulated at 0).
    pub async fn calculate_default(&self, sku: &str) -> PricingResult<CalculationResult> {
        self.calculate(sku, 0.0).await
    }

    /// Fetch every input for `sku`, price it and simulate the profit at `user_price`.
    ///
    /// Lookups run one after another and the first failure aborts the calculation.
    #[instrument(skip(self))]
    pub async fn calculate(&self, sku: &str, user_price: f64) -> PricingResult<CalculationResult> {
        // Every source receives `sku` unmodified; padded SKUs fail to parse here
        let product_id: i64 = sku
            .parse()
            .map_err(|_| PricingError::InvalidInput(format!("sku '{}' is not a product number", sku)))?;

        let cost = self
            .cost_repo
            .fetch_cost_profile(sku)
            .await
            .map_err(|e| PricingError::lookup("cost profile lookup", e))?
            .ok_or_else(|| PricingError::missing("cost profile lookup", format!("sku {}", sku)))?;

        let params = self
            .parameter_repo
            .fetch_tunable_parameters()
            .await
            .map_err(|e| PricingError::lookup("parameters lookup", e))?
            .ok_or_else(|| PricingError::missing("parameters lookup", "config_params id 1".to_string()))?;

        let commission = self
            .commission_repo
            .fetch_commission_cost(sku)
            .await
            .map_err(|e| PricingError::lookup("commission lookup", e))?
            .ok_or_else(|| PricingError::missing("commission lookup", format!("sku {}", sku)))?;

        let tax = self.classifier.classify_product(product_id).await?;
        info!(effective_icms = tax.effective_icms, difal = tax.difal, "ICMS and Difal resolved");

        let quote = compute_price(&cost, &params, &commission, &tax, user_price)?;
        let result = CalculationResult::assemble(sku, &cost, &params, &commission, &tax, &quote);

        info!(
            final_price = result.final_price,
            simulated_profit = result.simulated_profit,
            report = ?result,
            "Price calculated"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CommissionCost, CostProfile, TunableParameters};
    use crate::formula::tests::{sample_commission, sample_cost, sample_params};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type BoxError = Box<dyn std::error::Error + Send + Sync>;

    #[derive(Default)]
    struct FakeStore {
        cost: Option<CostProfile>,
        params: Option<TunableParameters>,
        commission: Option<CommissionCost>,
        reduction: Option<f64>,
        origin: Option<String>,
        fail_params: bool,
        calls: AtomicUsize,
    }

    impl FakeStore {
        fn complete() -> Self {
            Self {
                cost: Some(sample_cost()),
                params: Some(sample_params()),
                commission: Some(sample_commission()),
                reduction: None,
                origin: Some("0".to_string()),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl CostProfileRepository for FakeStore {
        async fn fetch_cost_profile(&self, _sku: &str) -> Result<Option<CostProfile>, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.cost)
        }
    }

    #[async_trait]
    impl ParameterRepository for FakeStore {
        async fn fetch_tunable_parameters(&self) -> Result<Option<TunableParameters>, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_params {
                return Err("connection reset".into());
            }
            Ok(self.params)
        }
    }

    #[async_trait]
    impl CommissionRepository for FakeStore {
        async fn fetch_commission_cost(&self, _sku: &str) -> Result<Option<CommissionCost>, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.commission.clone())
        }
    }

    #[async_trait]
    impl FiscalProfileRepository for FakeStore {
        async fn fetch_reduction_sum(&self, _product_id: i64) -> Result<Option<f64>, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reduction)
        }

        async fn fetch_origin_code(&self, _product_id: i64) -> Result<Option<String>, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.origin.clone())
        }
    }

    fn service(store: Arc<FakeStore>) -> PricingService {
        PricingService::new(store.clone(), store.clone(), store.clone(), store)
    }

    #[tokio::test]
    async fn test_calculate_end_to_end() {
        let store = Arc::new(FakeStore::complete());
        let result = service(store.clone()).calculate("1234", 100.0).await.unwrap();

        // Domestic without reduction: 0.18 ICMS, 0.06 Difal
        assert_eq!(result.effective_icms, 0.18);
        assert!((result.difal - 0.06).abs() < 1e-12);
        assert!((result.final_price - 90.36513910985215).abs() < 1e-9);
        assert_eq!(result.sku, "1234");
        assert_eq!(store.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_calculate_default_uses_zero_price() {
        let store = Arc::new(FakeStore::complete());
        let result = service(store).calculate_default("1234").await.unwrap();
        assert_eq!(result.simulated_profit, 0.0);
    }

    #[tokio::test]
    async fn test_non_numeric_sku_is_rejected_before_lookups() {
        let store = Arc::new(FakeStore::complete());
        let err = service(store.clone()).calculate("ABC-1", 10.0).await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_padded_sku_is_rejected_before_lookups() {
        let store = Arc::new(FakeStore::complete());
        for sku in [" 1234", "1234 ", "\t1234"] {
            let err = service(store.clone()).calculate(sku, 100.0).await.unwrap_err();
            assert!(err.is_client_error(), "sku {:?}", sku);
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_product_number_beyond_i32() {
        let store = Arc::new(FakeStore::complete());
        let result = service(store.clone()).calculate("3000000000", 100.0).await.unwrap();
        assert_eq!(result.sku, "3000000000");
        assert_eq!(store.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_missing_cost_profile_aborts() {
        let store = Arc::new(FakeStore { cost: None, ..FakeStore::complete() });
        let err = service(store.clone()).calculate("1234", 10.0).await.unwrap_err();
        assert!(matches!(err, PricingError::Lookup { stage: "cost profile lookup", .. }));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_names_stage() {
        let store = Arc::new(FakeStore { fail_params: true, ..FakeStore::complete() });
        let err = service(store.clone()).calculate("1234", 10.0).await.unwrap_err();
        assert_eq!(err.to_string(), "parameters lookup failed: connection reset");
        assert!(!err.is_client_error());
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_commission_aborts() {
        let store = Arc::new(FakeStore { commission: None, ..FakeStore::complete() });
        let err = service(store).calculate("1234", 10.0).await.unwrap_err();
        assert!(matches!(err, PricingError::Lookup { stage: "commission lookup", .. }));
    }
}
