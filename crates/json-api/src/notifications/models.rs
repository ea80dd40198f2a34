//! Notification Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::notifications::records::NotificationRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    pub uuid: Uuid,

    /// `user`, `artisan` or `admin`
    pub recipient_type: String,

    /// Absent for notifications addressed to every admin
    pub recipient_uuid: Option<Uuid>,

    pub kind: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub read_at: Option<String>,
    pub created_at: String,
    pub expires_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(notification: NotificationRecord) -> Self {
        Self {
            uuid: notification.uuid.into_uuid(),
            recipient_type: notification.recipient.type_as_str().to_string(),
            recipient_uuid: notification.recipient.uuid(),
            kind: notification.kind.to_string(),
            title: notification.title,
            message: notification.message,
            link: notification.link,
            is_read: notification.read_at.is_some(),
            read_at: notification.read_at.map(|at| at.to_string()),
            created_at: notification.created_at.to_string(),
            expires_at: notification.expires_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UnreadCountResponse {
    pub unread: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MarkedReadResponse {
    /// Notifications that were unread before the call
    pub updated: u64,
}
