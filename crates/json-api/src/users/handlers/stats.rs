//! User Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
    users::models::UserStatsResponse,
};

/// User Stats Handler
#[endpoint(
    tags("users"),
    summary = "User Stats",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Counts by role and activation"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<UserStatsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state.app.users.user_stats().await?;

    Ok(ok(stats.into()))
}
