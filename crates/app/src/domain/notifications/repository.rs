//! Notifications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::try_get_parsed,
    domain::notifications::{
        data::NewNotification,
        records::{
            Audience, NOTIFICATION_TTL_DAYS, NotificationRecord, NotificationUuid, Recipient,
        },
    },
    pagination::{Page, count_to_total},
};

const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const LIST_NOTIFICATIONS_SQL: &str = include_str!("sql/list_notifications.sql");
const COUNT_NOTIFICATIONS_SQL: &str = include_str!("sql/count_notifications.sql");
const MARK_READ_SQL: &str = include_str!("sql/mark_read.sql");
const MARK_ALL_READ_SQL: &str = include_str!("sql/mark_all_read.sql");
const PURGE_EXPIRED_SQL: &str = include_str!("sql/purge_expired.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a notification as part of the caller's transaction.
    pub(crate) async fn create_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: &NewNotification,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(CREATE_NOTIFICATION_SQL)
            .bind(NotificationUuid::new().into_uuid())
            .bind(notification.recipient.type_as_str())
            .bind(notification.recipient.uuid())
            .bind(notification.kind.as_str())
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(notification.link.as_deref())
            .bind(NOTIFICATION_TTL_DAYS)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notifications: &[NewNotification],
    ) -> Result<(), sqlx::Error> {
        for notification in notifications {
            self.create_notification(tx, notification).await?;
        }

        Ok(())
    }

    pub(crate) async fn list_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        audience: Audience,
        unread_only: bool,
        page: Page,
    ) -> Result<(Vec<NotificationRecord>, u64), sqlx::Error> {
        let notifications = query_as::<Postgres, NotificationRecord>(LIST_NOTIFICATIONS_SQL)
            .bind(audience.user.into_uuid())
            .bind(audience.artisan.map(|artisan| artisan.into_uuid()))
            .bind(audience.admin)
            .bind(unread_only)
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total = self
            .count_notifications(tx, audience, unread_only)
            .await?;

        Ok((notifications, total))
    }

    pub(crate) async fn count_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        audience: Audience,
        unread_only: bool,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_NOTIFICATIONS_SQL)
            .bind(audience.user.into_uuid())
            .bind(audience.artisan.map(|artisan| artisan.into_uuid()))
            .bind(audience.admin)
            .bind(unread_only)
            .fetch_one(&mut **tx)
            .await?;

        Ok(count_to_total(count))
    }

    pub(crate) async fn mark_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        audience: Audience,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(MARK_READ_SQL)
            .bind(audience.user.into_uuid())
            .bind(audience.artisan.map(|artisan| artisan.into_uuid()))
            .bind(audience.admin)
            .bind(notification.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_all_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        audience: Audience,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_ALL_READ_SQL)
            .bind(audience.user.into_uuid())
            .bind(audience.artisan.map(|artisan| artisan.into_uuid()))
            .bind(audience.admin)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn purge_expired(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(PURGE_EXPIRED_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let recipient_type: String = row.try_get("recipient_type")?;
        let recipient_uuid: Option<Uuid> = row.try_get("recipient_uuid")?;

        let recipient = Recipient::from_parts(&recipient_type, recipient_uuid).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "recipient_type".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            recipient,
            kind: try_get_parsed(row, "kind")?,
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            link: row.try_get("link")?,
            read_at: row
                .try_get::<Option<SqlxTimestamp>, _>("read_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
        })
    }
}
