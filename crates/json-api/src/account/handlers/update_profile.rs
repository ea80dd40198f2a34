//! Update Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    account::models::ProfileUpdateRequest,
    auth::UserResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Update Profile Handler
///
/// Name and phone only. Email and role cannot be changed here.
#[endpoint(
    tags("account"),
    summary = "Update My Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty name"),
    ),
)]
#[tracing::instrument(name = "account.update_profile", skip(json, depot), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<ProfileUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let user = state
        .app
        .users
        .update_profile(actor, json.into_inner().into())
        .await?;

    Ok(Json(
        ApiResponse::new(UserResponse::from(user)).message("Profile updated"),
    ))
}
