use std::sync::{Arc, Mutex};
use rsfbclient::{FbError, SimpleConnection};
use tracing::info;

use crate::app_config::FirebirdConfig;

/// Shared handle to the ERP Firebird database.
///
/// The driver is synchronous, so every query runs on the blocking pool while
/// holding the connection lock.
#[derive(Clone)]
pub struct FirebirdClient {
    conn: Arc<Mutex<SimpleConnection>>,
}

impl FirebirdClient {
    pub fn connect(config: &FirebirdConfig) -> Result<Self, FbError> {
        let conn = rsfbclient::builder_pure_rust()
            .host(config.host.as_str())
            .port(config.port)
            .db_name(config.db_name.as_str())
            .user(config.user.as_str())
            .pass(config.password.as_str())
            .connect()?;

        info!("Connected to Firebird at {}:{}", config.host, config.port);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn.into())),
        })
    }

    pub async fn run<T, F>(&self, query: F) -> Result<T, Box<dyn std::error::Error + Send + Sync>>
    where
        T: Send + 'static,
        F: FnOnce(&mut SimpleConnection) -> Result<T, FbError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
            let mut guard = conn.lock().map_err(|_| "firebird connection lock poisoned")?;
            Ok(query(&mut *guard)?)
        })
        .await?
    }
}
