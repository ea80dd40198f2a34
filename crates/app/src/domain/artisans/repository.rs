//! Artisans Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{to_i64, try_get_parsed, try_get_u64},
    domain::{
        artisans::{
            data::{ArtisanFilter, ArtisanProfileUpdate, BankDetailsUpdate, NewArtisanProfile},
            lifecycle::ArtisanAction,
            records::{
                ArtisanContact, ArtisanRecord, ArtisanStats, ArtisanStatus, ArtisanUuid,
                BankDetails, IdentityProof,
            },
        },
        users::records::UserUuid,
    },
    pagination::{Page, count_to_total},
};

const GET_ARTISAN_SQL: &str = include_str!("sql/get_artisan.sql");
const LOCK_ARTISAN_SQL: &str = include_str!("sql/lock_artisan.sql");
const FIND_ARTISAN_BY_USER_SQL: &str = include_str!("sql/find_artisan_by_user.sql");
const LIST_ARTISANS_SQL: &str = include_str!("sql/list_artisans.sql");
const COUNT_ARTISANS_SQL: &str = include_str!("sql/count_artisans.sql");
const CREATE_ARTISAN_SQL: &str = include_str!("sql/create_artisan.sql");
const APPROVE_ARTISAN_SQL: &str = include_str!("sql/approve_artisan.sql");
const REJECT_ARTISAN_SQL: &str = include_str!("sql/reject_artisan.sql");
const SUSPEND_ARTISAN_SQL: &str = include_str!("sql/suspend_artisan.sql");
const REACTIVATE_ARTISAN_SQL: &str = include_str!("sql/reactivate_artisan.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const UPDATE_BANK_DETAILS_SQL: &str = include_str!("sql/update_bank_details.sql");
const VERIFY_BANK_DETAILS_SQL: &str = include_str!("sql/verify_bank_details.sql");
const ADJUST_PRODUCT_COUNT_SQL: &str = include_str!("sql/adjust_product_count.sql");
const RECORD_SALE_SQL: &str = include_str!("sql/record_sale.sql");
const REVERSE_SALE_SQL: &str = include_str!("sql/reverse_sale.sql");
const ARTISAN_STATS_SQL: &str = include_str!("sql/artisan_stats.sql");

/// A review decision as written to storage.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decision<'a> {
    pub action: ArtisanAction,
    pub admin: UserUuid,
    pub reason: Option<&'a str>,
    pub admin_notes: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgArtisansRepository;

impl PgArtisansRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_artisan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        user: UserUuid,
        profile: &NewArtisanProfile,
    ) -> Result<ArtisanRecord, sqlx::Error> {
        query(CREATE_ARTISAN_SQL)
            .bind(artisan.into_uuid())
            .bind(user.into_uuid())
            .bind(&profile.business_name)
            .bind(profile.description.as_deref())
            .bind(&profile.specialties)
            .bind(profile.city.as_deref())
            .bind(profile.state.as_deref())
            .bind(&profile.identity_proof_kind)
            .bind(&profile.identity_proof_number)
            .execute(&mut **tx)
            .await?;

        self.get_artisan(tx, artisan).await
    }

    pub(crate) async fn get_artisan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
    ) -> Result<ArtisanRecord, sqlx::Error> {
        query_as::<Postgres, ArtisanRecord>(GET_ARTISAN_SQL)
            .bind(artisan.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Row-lock the artisan for the rest of the transaction.
    pub(crate) async fn lock_artisan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
    ) -> Result<ArtisanRecord, sqlx::Error> {
        query_as::<Postgres, ArtisanRecord>(LOCK_ARTISAN_SQL)
            .bind(artisan.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_artisan_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<ArtisanRecord>, sqlx::Error> {
        query_as::<Postgres, ArtisanRecord>(FIND_ARTISAN_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_artisans(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ArtisanFilter,
        page: Page,
    ) -> Result<(Vec<ArtisanRecord>, u64), sqlx::Error> {
        let status = filter.status.map(ArtisanStatus::as_str);
        let search = filter.search.as_deref();

        let artisans = query_as::<Postgres, ArtisanRecord>(LIST_ARTISANS_SQL)
            .bind(status)
            .bind(search)
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_ARTISANS_SQL)
            .bind(status)
            .bind(search)
            .fetch_one(&mut **tx)
            .await?;

        Ok((artisans, count_to_total(total)))
    }

    /// Write a decision; returns the number of rows that were in the expected source status.
    pub(crate) async fn apply_decision(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        decision: Decision<'_>,
    ) -> Result<u64, sqlx::Error> {
        let statement = match decision.action {
            ArtisanAction::Approve => query(APPROVE_ARTISAN_SQL)
                .bind(artisan.into_uuid())
                .bind(decision.admin.into_uuid())
                .bind(decision.admin_notes),
            ArtisanAction::Reject => query(REJECT_ARTISAN_SQL)
                .bind(artisan.into_uuid())
                .bind(decision.reason)
                .bind(decision.admin_notes),
            ArtisanAction::Suspend => query(SUSPEND_ARTISAN_SQL)
                .bind(artisan.into_uuid())
                .bind(decision.reason)
                .bind(decision.admin_notes),
            ArtisanAction::Reactivate => query(REACTIVATE_ARTISAN_SQL)
                .bind(artisan.into_uuid())
                .bind(decision.admin_notes),
        };

        let rows_affected = statement.execute(&mut **tx).await?.rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        update: &ArtisanProfileUpdate,
        admin_notes: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PROFILE_SQL)
            .bind(artisan.into_uuid())
            .bind(update.business_name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.specialties.as_deref())
            .bind(update.city.as_deref())
            .bind(update.state.as_deref())
            .bind(admin_notes)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Replace bank details; any previous verification is cleared.
    pub(crate) async fn update_bank_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        details: &BankDetailsUpdate,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_BANK_DETAILS_SQL)
            .bind(artisan.into_uuid())
            .bind(&details.account_holder)
            .bind(&details.account_number)
            .bind(&details.ifsc)
            .bind(&details.bank_name)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn verify_bank_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        admin: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(VERIFY_BANK_DETAILS_SQL)
            .bind(artisan.into_uuid())
            .bind(admin.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn adjust_product_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        delta: i64,
    ) -> Result<(), sqlx::Error> {
        query(ADJUST_PRODUCT_COUNT_SQL)
            .bind(artisan.into_uuid())
            .bind(delta)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Add delivered units and revenue to the cached counters.
    pub(crate) async fn record_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        quantity: u64,
        revenue: u64,
    ) -> Result<(), sqlx::Error> {
        query(RECORD_SALE_SQL)
            .bind(artisan.into_uuid())
            .bind(to_i64(quantity, "total_sales")?)
            .bind(to_i64(revenue, "total_revenue")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Take a cancelled delivery back out of the cached counters.
    pub(crate) async fn reverse_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        quantity: u64,
        revenue: u64,
    ) -> Result<(), sqlx::Error> {
        query(REVERSE_SALE_SQL)
            .bind(artisan.into_uuid())
            .bind(to_i64(quantity, "total_sales")?)
            .bind(to_i64(revenue, "total_revenue")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn artisan_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<ArtisanStats, sqlx::Error> {
        let row = query(ARTISAN_STATS_SQL).fetch_one(&mut **tx).await?;

        let count = |column: &str| row.try_get::<i64, _>(column).map(count_to_total);

        Ok(ArtisanStats {
            total: count("total")?,
            pending: count("pending")?,
            approved: count("approved")?,
            rejected: count("rejected")?,
            suspended: count("suspended")?,
        })
    }
}

fn try_get_timestamp(row: &PgRow, column: &str) -> sqlx::Result<Option<jiff::Timestamp>> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(SqlxTimestamp::to_jiff))
}

fn try_get_user(row: &PgRow, column: &str) -> sqlx::Result<Option<UserUuid>> {
    Ok(row
        .try_get::<Option<Uuid>, _>(column)?
        .map(UserUuid::from_uuid))
}

impl<'r> FromRow<'r, PgRow> for ArtisanRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ArtisanUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            contact: ArtisanContact {
                name: row.try_get("contact_name")?,
                email: row.try_get("contact_email")?,
                phone: row.try_get("contact_phone")?,
            },
            business_name: row.try_get("business_name")?,
            description: row.try_get("description")?,
            specialties: row.try_get("specialties")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            identity_proof: IdentityProof {
                kind: row.try_get("identity_proof_kind")?,
                number: row.try_get("identity_proof_number")?,
                verified: row.try_get("identity_verified")?,
                verified_by: try_get_user(row, "identity_verified_by")?,
                verified_at: try_get_timestamp(row, "identity_verified_at")?,
            },
            bank_details: BankDetails {
                account_holder: row.try_get("bank_account_holder")?,
                account_number: row.try_get("bank_account_number")?,
                ifsc: row.try_get("bank_ifsc")?,
                bank_name: row.try_get("bank_name")?,
                verified: row.try_get("bank_verified")?,
                verified_by: try_get_user(row, "bank_verified_by")?,
                verified_at: try_get_timestamp(row, "bank_verified_at")?,
            },
            status: try_get_parsed(row, "status")?,
            admin_notes: row.try_get("admin_notes")?,
            rejection_reason: row.try_get("rejection_reason")?,
            suspension_reason: row.try_get("suspension_reason")?,
            approved_at: try_get_timestamp(row, "approved_at")?,
            approved_by: try_get_user(row, "approved_by")?,
            rejected_at: try_get_timestamp(row, "rejected_at")?,
            suspended_at: try_get_timestamp(row, "suspended_at")?,
            total_products: try_get_u64(row, "total_products")?,
            total_sales: try_get_u64(row, "total_sales")?,
            total_revenue: try_get_u64(row, "total_revenue")?,
            rating: row.try_get("rating")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
