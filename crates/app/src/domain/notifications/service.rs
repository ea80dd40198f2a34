//! Notifications service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::Actor,
    database::Db,
    domain::notifications::{
        errors::NotificationsServiceError,
        records::{Audience, NotificationRecord, NotificationUuid},
        repository::PgNotificationsRepository,
    },
    pagination::{Page, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn list_notifications(
        &self,
        actor: Actor,
        unread_only: bool,
        page: Page,
    ) -> Result<Paginated<NotificationRecord>, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let (notifications, total) = self
            .repository
            .list_notifications(&mut tx, Audience::from(actor), unread_only, page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(notifications, total, page))
    }

    async fn unread_count(&self, actor: Actor) -> Result<u64, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self
            .repository
            .count_notifications(&mut tx, Audience::from(actor), true)
            .await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn mark_read(
        &self,
        actor: Actor,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let notification = self
            .repository
            .mark_read(&mut tx, Audience::from(actor), notification)
            .await?;

        tx.commit().await?;

        Ok(notification)
    }

    async fn mark_all_read(&self, actor: Actor) -> Result<u64, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let marked = self
            .repository
            .mark_all_read(&mut tx, Audience::from(actor))
            .await?;

        tx.commit().await?;

        Ok(marked)
    }

    async fn purge_expired(&self) -> Result<u64, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let purged = self.repository.purge_expired(&mut tx).await?;

        tx.commit().await?;

        if purged > 0 {
            info!(purged, "purged expired notifications");
        }

        Ok(purged)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Notifications visible to the caller, newest first.
    async fn list_notifications(
        &self,
        actor: Actor,
        unread_only: bool,
        page: Page,
    ) -> Result<Paginated<NotificationRecord>, NotificationsServiceError>;

    async fn unread_count(&self, actor: Actor) -> Result<u64, NotificationsServiceError>;

    /// Marks one visible notification as read. Invisible or expired ones are not found.
    async fn mark_read(
        &self,
        actor: Actor,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError>;

    /// Returns the number of notifications that changed.
    async fn mark_all_read(&self, actor: Actor) -> Result<u64, NotificationsServiceError>;

    /// Deletes notifications past their expiry.
    async fn purge_expired(&self) -> Result<u64, NotificationsServiceError>;
}
