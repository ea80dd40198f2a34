//! Update Address Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    account::models::{AddressResponse, AddressUpdateRequest},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Update Address Handler
///
/// Making an address the default clears the flag on the others.
#[endpoint(
    tags("account"),
    summary = "Update Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Address updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
    ),
)]
pub(crate) async fn handler(
    address: PathParam<Uuid>,
    json: JsonBody<AddressUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<AddressResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let address = state
        .app
        .users
        .update_address(actor, address.into_inner().into(), json.into_inner().into())
        .await?;

    Ok(Json(
        ApiResponse::new(AddressResponse::from(address)).message("Address updated"),
    ))
}
