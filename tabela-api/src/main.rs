use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tabela_api::{app, AppState};
use tabela_core::PricingService;
use tabela_store::{
    DbClient, FirebirdClient, FirebirdCommissionRepository, FirebirdFiscalRepository,
    PostgresPricingRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tabela_api=debug,tabela_core=debug,tabela_store=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = tabela_store::app_config::Config::load().context("failed to load config")?;
    tracing::info!("Starting Tabela API on port {}", config.server.port);

    // Postgres: cost snapshots and tuning parameters
    let db = DbClient::new(&config.database)
        .await
        .context("failed to connect to Postgres")?;
    let pricing_repo = Arc::new(PostgresPricingRepository::new(db.pool.clone()));

    // Firebird: commissions and fiscal profiles
    let firebird_config = config.firebird.clone();
    let firebird = tokio::task::spawn_blocking(move || FirebirdClient::connect(&firebird_config))
        .await?
        .context("failed to connect to Firebird")?;

    let pricing = PricingService::new(
        pricing_repo.clone(),
        pricing_repo,
        Arc::new(FirebirdCommissionRepository::new(firebird.clone())),
        Arc::new(FirebirdFiscalRepository::new(firebird)),
    );

    let app_state = AppState {
        pricing: Arc::new(pricing),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
