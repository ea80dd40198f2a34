//! Show Bank Details Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    artisans::models::BankDetailsResponse,
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
};

/// Show Bank Details Handler
///
/// The account number is masked to its last four digits.
#[endpoint(
    tags("artisan"),
    summary = "Own Bank Details",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BankDetailsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let details = state.app.artisans.get_bank_details(actor).await?;

    Ok(ok(details.into()))
}
