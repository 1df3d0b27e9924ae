use std::sync::Arc;
use tabela_core::PricingService;

#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<PricingService>,
}
