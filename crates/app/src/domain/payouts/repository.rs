//! Payouts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{to_i64, try_get_parsed, try_get_u64},
    domain::{
        artisans::records::ArtisanUuid,
        payouts::{
            data::PayoutStatusUpdate,
            fees::PayoutFees,
            records::{PayoutRecord, PayoutStatus, PayoutUuid},
        },
        users::records::UserUuid,
    },
    pagination::{Page, count_to_total},
};

const GET_PAYOUT_SQL: &str = include_str!("sql/get_payout.sql");
const LOCK_PAYOUT_SQL: &str = include_str!("sql/lock_payout.sql");
const LIST_PAYOUTS_SQL: &str = include_str!("sql/list_payouts.sql");
const COUNT_PAYOUTS_SQL: &str = include_str!("sql/count_payouts.sql");
const AVAILABLE_BALANCE_SQL: &str = include_str!("sql/available_balance.sql");
const LIST_CLAIMABLE_LINES_SQL: &str = include_str!("sql/list_claimable_lines.sql");
const CLAIM_LINE_SQL: &str = include_str!("sql/claim_line.sql");
const CREATE_PAYOUT_SQL: &str = include_str!("sql/create_payout.sql");
const UPDATE_PAYOUT_STATUS_SQL: &str = include_str!("sql/update_payout_status.sql");
const RELEASE_LINES_SQL: &str = include_str!("sql/release_lines.sql");

/// Bank account a payout is sent to, captured at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BankSnapshot {
    pub account_last4: String,
    pub ifsc: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPayoutsRepository;

impl PgPayoutsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_payout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payout: PayoutUuid,
    ) -> Result<PayoutRecord, sqlx::Error> {
        query_as::<Postgres, PayoutRecord>(GET_PAYOUT_SQL)
            .bind(payout.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_payout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payout: PayoutUuid,
    ) -> Result<PayoutRecord, sqlx::Error> {
        query_as::<Postgres, PayoutRecord>(LOCK_PAYOUT_SQL)
            .bind(payout.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_payouts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: Option<ArtisanUuid>,
        status: Option<PayoutStatus>,
        page: Page,
    ) -> Result<(Vec<PayoutRecord>, u64), sqlx::Error> {
        let artisan = artisan.map(ArtisanUuid::into_uuid);
        let status = status.map(PayoutStatus::as_str);

        let payouts = query_as::<Postgres, PayoutRecord>(LIST_PAYOUTS_SQL)
            .bind(artisan)
            .bind(status)
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_PAYOUTS_SQL)
            .bind(artisan)
            .bind(status)
            .fetch_one(&mut **tx)
            .await?;

        Ok((payouts, count_to_total(total)))
    }

    /// Sum of the artisan's delivered, paid and unclaimed order lines.
    pub(crate) async fn available_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
    ) -> Result<u64, sqlx::Error> {
        let balance: i64 = query_scalar(AVAILABLE_BALANCE_SQL)
            .bind(artisan.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count_to_total(balance))
    }

    pub(crate) async fn create_payout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payout: PayoutUuid,
        artisan: ArtisanUuid,
        requested_amount: u64,
        fees: PayoutFees,
        bank: &BankSnapshot,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_PAYOUT_SQL)
            .bind(payout.into_uuid())
            .bind(artisan.into_uuid())
            .bind(to_i64(requested_amount, "requested_amount")?)
            .bind(to_i64(fees.processing_fee, "processing_fee")?)
            .bind(to_i64(fees.gst, "gst")?)
            .bind(to_i64(fees.net_amount, "net_amount")?)
            .bind(&bank.account_last4)
            .bind(&bank.ifsc)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Claim eligible lines oldest-first, skipping any line that would take
    /// the total past `amount`.
    ///
    /// Each claim is conditional on the line still being unclaimed, so the
    /// returned total only counts lines this payout actually took. It never
    /// exceeds `amount`.
    pub(crate) async fn claim_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        artisan: ArtisanUuid,
        payout: PayoutUuid,
        amount: u64,
    ) -> Result<u64, sqlx::Error> {
        let candidates: Vec<(Uuid, i64)> = query_as(LIST_CLAIMABLE_LINES_SQL)
            .bind(artisan.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let mut claimed: u64 = 0;

        for (line, subtotal) in candidates {
            if claimed >= amount {
                break;
            }

            let subtotal = count_to_total(subtotal);

            if claimed.saturating_add(subtotal) > amount {
                continue;
            }

            let taken: Option<i64> = query_scalar(CLAIM_LINE_SQL)
                .bind(line)
                .bind(payout.into_uuid())
                .fetch_optional(&mut **tx)
                .await?;

            if let Some(taken) = taken {
                claimed = claimed.saturating_add(count_to_total(taken));
            }
        }

        Ok(claimed)
    }

    /// Move a payout on from `from`. Zero rows means it changed underneath us.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payout: PayoutUuid,
        from: PayoutStatus,
        update: &PayoutStatusUpdate,
        processed_by: Option<UserUuid>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PAYOUT_STATUS_SQL)
            .bind(payout.into_uuid())
            .bind(from.as_str())
            .bind(update.status.as_str())
            .bind(update.transaction_reference.as_deref())
            .bind(update.failure_reason.as_deref())
            .bind(processed_by.map(UserUuid::into_uuid))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn release_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payout: PayoutUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RELEASE_LINES_SQL)
            .bind(payout.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PayoutRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PayoutUuid::from_uuid(row.try_get("uuid")?),
            artisan_uuid: ArtisanUuid::from_uuid(row.try_get("artisan_uuid")?),
            artisan_name: row.try_get("artisan_name")?,
            requested_amount: try_get_u64(row, "requested_amount")?,
            amount: try_get_u64(row, "amount")?,
            fees: PayoutFees {
                processing_fee: try_get_u64(row, "processing_fee")?,
                gst: try_get_u64(row, "gst")?,
                net_amount: try_get_u64(row, "net_amount")?,
            },
            bank_account_last4: row.try_get("bank_account_last4")?,
            bank_ifsc: row.try_get("bank_ifsc")?,
            status: try_get_parsed(row, "status")?,
            transaction_reference: row.try_get("transaction_reference")?,
            failure_reason: row.try_get("failure_reason")?,
            processed_by: row
                .try_get::<Option<Uuid>, _>("processed_by")?
                .map(UserUuid::from_uuid),
            processed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("processed_at")?
                .map(SqlxTimestamp::to_jiff),
            order_lines: try_get_u64(row, "order_lines")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
