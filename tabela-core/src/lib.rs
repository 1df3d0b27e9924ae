pub mod entities;
pub mod repository;
pub mod tax;
pub mod formula;
pub mod report;
pub mod service;

pub use entities::{CommissionCost, CostProfile, TaxClassification, TunableParameters};
pub use formula::{PriceQuote, ProfitSimulation};
pub use report::CalculationResult;
pub use service::PricingService;
pub use tax::{ProductOrigin, TaxClassifier};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{stage} failed: {source}")]
    Lookup {
        stage: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("zero tax burden")]
    ZeroTaxBurden,
    #[error("zero denominator in profit simulation")]
    ZeroProfitDenominator,
}

impl PricingError {
    pub(crate) fn lookup(stage: &'static str, source: impl Into<BoxError>) -> Self {
        PricingError::Lookup { stage, source: source.into() }
    }

    pub(crate) fn missing(stage: &'static str, what: String) -> Self {
        Self::lookup(stage, format!("no row for {}", what))
    }

    /// True for failures caused by the caller's input rather than the data sources.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PricingError::InvalidInput(_))
    }
}

pub type PricingResult<T> = Result<T, PricingError>;
