//! Reports Repository

use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query, query_scalar};

use crate::{
    database::{to_i64, try_get_u64},
    domain::{
        artisans::records::ArtisanUuid,
        products::records::ProductUuid,
        reports::records::{MonthlyRevenue, OrderCounts, ProductCounts, TopProduct},
        users::records::UserUuid,
    },
    pagination::count_to_total,
};

const ARTISAN_PRODUCT_COUNTS_SQL: &str = include_str!("sql/artisan_product_counts.sql");
const ORDER_COUNTS_SQL: &str = include_str!("sql/order_counts.sql");
const ARTISAN_REVENUE_SQL: &str = include_str!("sql/artisan_revenue.sql");
const MONTHLY_REVENUE_SQL: &str = include_str!("sql/monthly_revenue.sql");
const TOP_PRODUCTS_SQL: &str = include_str!("sql/top_products.sql");
const PAYOUT_TOTALS_SQL: &str = include_str!("sql/payout_totals.sql");
const WISHLIST_SIZE_SQL: &str = include_str!("sql/wishlist_size.sql");

/// Payout amounts still in flight and already paid, in paise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PayoutTotals {
    pub pending: u64,
    pub paid_out: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn artisan_product_counts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
    ) -> Result<ProductCounts, sqlx::Error> {
        let row = query(ARTISAN_PRODUCT_COUNTS_SQL)
            .bind(artisan.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(ProductCounts {
            total: try_get_u64(&row, "total")?,
            approved: try_get_u64(&row, "approved")?,
            pending: try_get_u64(&row, "pending")?,
            out_of_stock: try_get_u64(&row, "out_of_stock")?,
            low_stock: try_get_u64(&row, "low_stock")?,
        })
    }

    /// Order counts for a customer or an artisan, plus what the orders were worth.
    pub(crate) async fn order_counts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: Option<UserUuid>,
        artisan: Option<ArtisanUuid>,
    ) -> Result<(OrderCounts, u64), sqlx::Error> {
        let row = query(ORDER_COUNTS_SQL)
            .bind(customer.map(UserUuid::into_uuid))
            .bind(artisan.map(ArtisanUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await?;

        let counts = OrderCounts {
            total: try_get_u64(&row, "total")?,
            pending: try_get_u64(&row, "pending")?,
            in_progress: try_get_u64(&row, "in_progress")?,
            delivered: try_get_u64(&row, "delivered")?,
            cancelled: try_get_u64(&row, "cancelled")?,
        };

        Ok((counts, try_get_u64(&row, "total_spent")?))
    }

    pub(crate) async fn artisan_revenue(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
    ) -> Result<u64, sqlx::Error> {
        let revenue: i64 = query_scalar(ARTISAN_REVENUE_SQL)
            .bind(artisan.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count_to_total(revenue))
    }

    pub(crate) async fn monthly_revenue(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
    ) -> Result<Vec<MonthlyRevenue>, sqlx::Error> {
        let rows = query(MONTHLY_REVENUE_SQL)
            .bind(artisan.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(MonthlyRevenue {
                    month: row.try_get("month")?,
                    revenue: try_get_u64(row, "revenue")?,
                })
            })
            .collect()
    }

    pub(crate) async fn top_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        limit: u64,
    ) -> Result<Vec<TopProduct>, sqlx::Error> {
        let rows = query(TOP_PRODUCTS_SQL)
            .bind(artisan.into_uuid())
            .bind(to_i64(limit, "limit")?)
            .fetch_all(&mut **tx)
            .await?;

        rows.iter().map(top_product_from_row).collect()
    }

    pub(crate) async fn payout_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
    ) -> Result<PayoutTotals, sqlx::Error> {
        let row = query(PAYOUT_TOTALS_SQL)
            .bind(artisan.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(PayoutTotals {
            pending: try_get_u64(&row, "pending")?,
            paid_out: try_get_u64(&row, "paid_out")?,
        })
    }

    pub(crate) async fn wishlist_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let size: i64 = query_scalar(WISHLIST_SIZE_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count_to_total(size))
    }
}

fn top_product_from_row(row: &PgRow) -> sqlx::Result<TopProduct> {
    Ok(TopProduct {
        product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
        product_name: row.try_get("product_name")?,
        units: try_get_u64(row, "units")?,
        revenue: try_get_u64(row, "revenue")?,
    })
}
