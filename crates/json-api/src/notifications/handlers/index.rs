//! Notification Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    notifications::models::NotificationResponse,
    state::State,
};

/// Notification Index Handler
///
/// The caller's own notifications, plus those addressed to their artisan
/// account or to all admins when that applies.
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of notifications"),
    ),
)]
pub(crate) async fn handler(
    unread_only: QueryParam<bool, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<NotificationResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let notifications = state
        .app
        .notifications
        .list_notifications(
            actor,
            unread_only.into_inner().unwrap_or(false),
            into_page(page, limit),
        )
        .await?;

    Ok(ok(PageResponse::from_paginated(notifications)))
}
