//! Server configuration module

use clap::Parser;

use tantika_app::context::AppSettings;

use crate::config::{
    db::DatabaseConfig,
    marketplace::MarketplaceConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod marketplace;
pub(crate) mod observability;
pub(crate) mod server;

/// Tantika JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "tantika-json", about = "Tantika JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Marketplace rules and session settings.
    #[command(flatten)]
    pub marketplace: MarketplaceConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings handed to the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.database_max_connections,
            run_migrations: self.database.run_migrations,
            session_ttl_hours: self.marketplace.session_ttl_hours,
            min_payout: self.marketplace.min_payout_paise,
        }
    }
}
