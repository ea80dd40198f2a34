//! Background purge of expired notifications.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use tantika_app::domain::notifications::NotificationsService;

/// Purge expired notifications every `every`, starting immediately.
pub(crate) fn spawn(
    notifications: Arc<dyn NotificationsService>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);

        loop {
            interval.tick().await;

            purge_once(notifications.as_ref()).await;
        }
    })
}

/// Run one purge, returning how many notifications were removed.
pub(crate) async fn purge_once(notifications: &dyn NotificationsService) -> u64 {
    match notifications.purge_expired().await {
        Ok(0) => {
            debug!("no expired notifications to purge");
            0
        }
        Ok(removed) => {
            info!(removed, "purged expired notifications");
            removed
        }
        Err(source) => {
            error!("failed to purge expired notifications: {source}");
            0
        }
    }
}
