//! Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::UserResponse,
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
};

/// Profile Handler
#[endpoint(
    tags("account"),
    summary = "My Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let user = state.app.users.get_user(actor.user).await?;

    Ok(ok(user.into()))
}
