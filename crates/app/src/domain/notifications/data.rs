//! Notifications Data

use crate::domain::notifications::records::{NotificationKind, Recipient};

/// New Notification Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient: Recipient,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

impl NewNotification {
    pub(crate) fn new(
        recipient: Recipient,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            kind,
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    #[must_use]
    pub(crate) fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}
