pub mod app_config;
pub mod database;
pub mod pricing_repo;
pub mod firebird;
pub mod firebird_repo;

pub use database::DbClient;
pub use firebird::FirebirdClient;
pub use pricing_repo::PostgresPricingRepository;
pub use firebird_repo::{FirebirdCommissionRepository, FirebirdFiscalRepository};
