//! Get User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    auth::UserResponse,
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
};

/// Get User Handler
#[endpoint(
    tags("users"),
    summary = "Get User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User found"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state.app.users.get_user(user.into_inner().into()).await?;

    Ok(ok(user.into()))
}
