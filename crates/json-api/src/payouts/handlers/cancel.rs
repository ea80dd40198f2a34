//! Cancel Payout Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    payouts::models::PayoutResponse,
    state::State,
};

/// Cancel Payout Handler
///
/// Only pending payouts can be withdrawn; their lines return to the balance.
#[endpoint(
    tags("artisan"),
    summary = "Cancel Payout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payout cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Payout is no longer pending"),
        (status_code = StatusCode::NOT_FOUND, description = "Payout not found"),
    ),
)]
#[tracing::instrument(
    name = "payouts.cancel",
    skip(payout, depot),
    fields(payout_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    payout: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PayoutResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let payout = payout.into_inner();

    tracing::Span::current().record("payout_uuid", tracing::field::display(payout));

    let payout = state.app.payouts.cancel_payout(actor, payout.into()).await?;

    Ok(Json(
        ApiResponse::new(PayoutResponse::from(payout)).message("Payout cancelled"),
    ))
}
