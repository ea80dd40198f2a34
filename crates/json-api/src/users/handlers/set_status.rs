//! Set User Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    auth::UserResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
    users::models::SetStatusRequest,
};

/// Set User Status Handler
///
/// Deactivating a user signs them out everywhere.
#[endpoint(
    tags("users"),
    summary = "Activate or Deactivate User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Own account or last admin"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "users.set_status",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<SetStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let user = user.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let user = state
        .app
        .users
        .set_user_active(admin, user.into(), json.into_inner().is_active)
        .await?;

    let message = if user.is_active {
        "User activated"
    } else {
        "User deactivated"
    };

    Ok(Json(ApiResponse::new(UserResponse::from(user)).message(message)))
}
