//! Request Payout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    observability::record_payout_requested,
    payouts::models::PayoutResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RequestPayoutRequest {
    /// Paise
    pub amount: u64,
}

/// Request Payout Handler
///
/// Claims delivered and paid order lines, oldest first, until they cover the
/// amount. Bank details must be verified.
#[endpoint(
    tags("artisan"),
    summary = "Request Payout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Payout requested"),
        (status_code = StatusCode::BAD_REQUEST, description = "Below minimum, over balance or bank unverified"),
    ),
)]
#[tracing::instrument(name = "payouts.request", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<RequestPayoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<PayoutResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let payout = state
        .app
        .payouts
        .request_payout(actor, json.into_inner().amount)
        .await?;

    record_payout_requested();

    res.status_code(StatusCode::CREATED);

    Ok(Json(
        ApiResponse::new(PayoutResponse::from(payout)).message("Payout requested"),
    ))
}
