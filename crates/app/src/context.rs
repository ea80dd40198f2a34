//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        artisans::{ArtisansService, PgArtisansService},
        notifications::{NotificationsService, PgNotificationsService},
        orders::{OrdersService, PgOrdersService},
        payouts::{PayoutsService, PgPayoutsService},
        products::{PgProductsService, ProductsService},
        reports::{PgReportsService, ReportsService},
        users::{PgUsersService, UsersService},
        wishlists::{PgWishlistsService, WishlistsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrations(#[source] MigrateError),
}

/// Settings that shape service behaviour.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub session_ttl_hours: i32,

    /// Smallest payout an artisan may request, in paise.
    pub min_payout: u64,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub artisans: Arc<dyn ArtisansService>,
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payouts: Arc<dyn PayoutsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub reports: Arc<dyn ReportsService>,
}

impl AppContext {
    /// Build application context from connection and service settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or
    /// applying migrations fails.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_db(
            &Db::new(pool),
            settings.session_ttl_hours,
            settings.min_payout,
        ))
    }

    #[must_use]
    pub fn from_db(db: &Db, session_ttl_hours: i32, min_payout: u64) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), session_ttl_hours)),
            users: Arc::new(PgUsersService::new(db.clone())),
            artisans: Arc::new(PgArtisansService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            payouts: Arc::new(PgPayoutsService::new(db.clone(), min_payout)),
            notifications: Arc::new(PgNotificationsService::new(db.clone())),
            wishlists: Arc::new(PgWishlistsService::new(db.clone())),
            reports: Arc::new(PgReportsService::new(db.clone())),
        }
    }
}
