//! Read Notification Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    notifications::models::NotificationResponse,
    state::State,
};

/// Read Notification Handler
#[endpoint(
    tags("notifications"),
    summary = "Mark Notification Read",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Notification marked read"),
        (status_code = StatusCode::NOT_FOUND, description = "Notification not found"),
    ),
)]
pub(crate) async fn handler(
    notification: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<NotificationResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let notification = state
        .app
        .notifications
        .mark_read(actor, notification.into_inner().into())
        .await?;

    Ok(ok(notification.into()))
}
