//! Add Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    account::models::{AddressResponse, NewAddressRequest},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Add Address Handler
///
/// The first saved address becomes the default.
#[endpoint(
    tags("account"),
    summary = "Add Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Address saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<NewAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<AddressResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let address = state
        .app
        .users
        .add_address(actor, json.into_inner().into())
        .await?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(
        ApiResponse::new(AddressResponse::from(address)).message("Address added"),
    ))
}
