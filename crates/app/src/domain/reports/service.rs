//! Reports service.
//!
//! Every figure is aggregated fresh from orders, products and payouts.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Actor,
    database::Db,
    domain::{
        artisans::records::ArtisanUuid,
        orders::{
            data::OrderFilter,
            repository::{OrderScope, PgOrdersRepository},
        },
        payouts::repository::PgPayoutsRepository,
        reports::{
            errors::ReportsServiceError,
            records::{ArtisanDashboard, ArtisanEarnings, CustomerDashboard},
            repository::PgReportsRepository,
        },
    },
    pagination::Page,
};

const TOP_PRODUCTS: u64 = 5;
const RECENT_ORDERS: u32 = 5;

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
    orders: PgOrdersRepository,
    payouts: PgPayoutsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
            orders: PgOrdersRepository::new(),
            payouts: PgPayoutsRepository::new(),
        }
    }
}

fn acting_artisan(actor: Actor) -> Result<ArtisanUuid, ReportsServiceError> {
    actor.acting_artisan().ok_or(ReportsServiceError::Forbidden)
}

#[async_trait]
impl ReportsService for PgReportsService {
    async fn artisan_dashboard(
        &self,
        actor: Actor,
    ) -> Result<ArtisanDashboard, ReportsServiceError> {
        let artisan = acting_artisan(actor)?;

        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .artisan_product_counts(&mut tx, artisan)
            .await?;
        let (orders, _) = self
            .repository
            .order_counts(&mut tx, None, Some(artisan))
            .await?;
        let revenue = self.repository.artisan_revenue(&mut tx, artisan).await?;
        let available_balance = self.payouts.available_balance(&mut tx, artisan).await?;
        let monthly_revenue = self.repository.monthly_revenue(&mut tx, artisan).await?;
        let top_products = self
            .repository
            .top_products(&mut tx, artisan, TOP_PRODUCTS)
            .await?;

        tx.commit().await?;

        Ok(ArtisanDashboard {
            products,
            orders,
            revenue,
            available_balance,
            monthly_revenue,
            top_products,
        })
    }

    async fn artisan_earnings(&self, actor: Actor) -> Result<ArtisanEarnings, ReportsServiceError> {
        let artisan = acting_artisan(actor)?;

        let mut tx = self.db.begin().await?;

        let total_earned = self.repository.artisan_revenue(&mut tx, artisan).await?;
        let available_balance = self.payouts.available_balance(&mut tx, artisan).await?;
        let payouts = self.repository.payout_totals(&mut tx, artisan).await?;

        tx.commit().await?;

        Ok(ArtisanEarnings {
            total_earned,
            available_balance,
            pending_payouts: payouts.pending,
            paid_out: payouts.paid_out,
        })
    }

    async fn customer_dashboard(
        &self,
        actor: Actor,
    ) -> Result<CustomerDashboard, ReportsServiceError> {
        let scope = OrderScope {
            customer: Some(actor.user),
            ..OrderScope::default()
        };

        let mut tx = self.db.begin().await?;

        let (orders, total_spent) = self
            .repository
            .order_counts(&mut tx, Some(actor.user), None)
            .await?;
        let wishlist_items = self.repository.wishlist_size(&mut tx, actor.user).await?;
        let (recent_orders, _) = self
            .orders
            .list_orders(
                &mut tx,
                scope,
                &OrderFilter::default(),
                Page::new(Some(1), Some(RECENT_ORDERS)),
            )
            .await?;

        tx.commit().await?;

        Ok(CustomerDashboard {
            orders,
            total_spent,
            wishlist_items,
            recent_orders,
        })
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Products, orders, revenue and balance for the acting artisan.
    async fn artisan_dashboard(
        &self,
        actor: Actor,
    ) -> Result<ArtisanDashboard, ReportsServiceError>;

    async fn artisan_earnings(&self, actor: Actor) -> Result<ArtisanEarnings, ReportsServiceError>;

    /// Order history summary and wishlist size for any signed-in user.
    async fn customer_dashboard(
        &self,
        actor: Actor,
    ) -> Result<CustomerDashboard, ReportsServiceError>;
}
