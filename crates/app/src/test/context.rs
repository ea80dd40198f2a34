//! Test context for service-level integration tests.

use crate::{
    auth::{DEFAULT_SESSION_TTL_HOURS, PgAuthService},
    database::Db,
    domain::{
        artisans::PgArtisansService, notifications::PgNotificationsService,
        orders::PgOrdersService, payouts::PgPayoutsService, products::PgProductsService,
        reports::PgReportsService, users::PgUsersService, wishlists::PgWishlistsService,
    },
};

use super::db::TestDb;

/// Every service wired to one fresh database.
pub(crate) struct TestContext {
    pub db: TestDb,
    pub auth: PgAuthService,
    pub users: PgUsersService,
    pub artisans: PgArtisansService,
    pub products: PgProductsService,
    pub orders: PgOrdersService,
    pub payouts: PgPayoutsService,
    pub notifications: PgNotificationsService,
    pub wishlists: PgWishlistsService,
    pub reports: PgReportsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            auth: PgAuthService::new(db.clone(), DEFAULT_SESSION_TTL_HOURS),
            users: PgUsersService::new(db.clone()),
            artisans: PgArtisansService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            payouts: PgPayoutsService::with_default_minimum(db.clone()),
            notifications: PgNotificationsService::new(db.clone()),
            wishlists: PgWishlistsService::new(db.clone()),
            reports: PgReportsService::new(db),
            db: test_db,
        }
    }
}
