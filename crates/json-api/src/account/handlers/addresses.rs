//! Address Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    account::models::AddressResponse,
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
};

/// Address Index Handler
///
/// Default address first.
#[endpoint(
    tags("account"),
    summary = "My Addresses",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Saved addresses"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<AddressResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let addresses = state.app.users.list_addresses(actor).await?;

    Ok(ok(addresses.into_iter().map(Into::into).collect()))
}
