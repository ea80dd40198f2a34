//! Marketplace Config

use clap::Args;

/// Deployment environment, controls how much error detail reaches clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

/// Marketplace rules and session settings.
#[derive(Debug, Args)]
pub struct MarketplaceConfig {
    /// Smallest payout an artisan may request, in paise
    #[arg(long, env = "MIN_PAYOUT_PAISE", default_value_t = 50_000)]
    pub min_payout_paise: u64,

    /// Session lifetime in hours
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 24 * 7)]
    pub session_ttl_hours: i32,

    /// Mark the session cookie `Secure`
    #[arg(long, env = "SECURE_COOKIES", default_value_t = false)]
    pub secure_cookies: bool,

    /// Deployment environment (development, production)
    #[arg(long, env = "APP_ENVIRONMENT", value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,

    /// Seconds between expired notification purges
    #[arg(long, env = "NOTIFICATION_PURGE_INTERVAL_SECS", default_value_t = 3_600)]
    pub notification_purge_interval_secs: u64,
}
