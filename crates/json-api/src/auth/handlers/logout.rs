//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::cookie,
    envelope::{ApiError, ApiMessage},
    extensions::*,
    state::State,
};

/// Logout Handler
///
/// Revokes the current session and clears the session cookie.
#[endpoint(
    tags("auth"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Signed out"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiMessage>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    state.app.auth.logout(actor.session).await?;

    cookie::clear_session(res, state.http);

    Ok(ApiMessage::new("Logged out"))
}
