use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub firebird: FirebirdConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Postgres holding `productscmp` and `config_params`
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

/// Firebird ERP database holding products, tax profiles and channel commissions
#[derive(Debug, Deserialize, Clone)]
pub struct FirebirdConfig {
    pub host: String,
    #[serde(default = "default_firebird_port")]
    pub port: u16,
    pub db_name: String,
    pub user: String,
    pub password: String,
}

fn default_firebird_port() -> u16 { 3050 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `TABELA_DATABASE__URL=postgres://...` sets `database.url`
            .add_source(config::Environment::with_prefix("TABELA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_TOML: &str = include_str!("../../config/default.toml");

    #[test]
    fn test_default_file_deserializes() {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_TOML, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.firebird.port, 3050);
        assert!(cfg.database.max_connections > 0);
    }

    #[test]
    fn test_optional_fields_default() {
        let toml = r#"
            [server]
            port = 9000

            [database]
            url = "postgres://localhost/tabela"

            [firebird]
            host = "erp"
            db_name = "/data/erp.fdb"
            user = "SYSDBA"
            password = "masterkey"
        "#;
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.firebird.port, 3050);
        assert_eq!(cfg.firebird.host, "erp");
    }
}
