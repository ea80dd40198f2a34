//! Delete Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiError, ApiMessage},
    extensions::*,
    state::State,
};

/// Delete Address Handler
///
/// Deleting the default promotes the oldest remaining address.
#[endpoint(
    tags("account"),
    summary = "Delete Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Address deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
    ),
)]
pub(crate) async fn handler(
    address: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiMessage>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    state
        .app
        .users
        .delete_address(actor, address.into_inner().into())
        .await?;

    Ok(ApiMessage::new("Address deleted"))
}
