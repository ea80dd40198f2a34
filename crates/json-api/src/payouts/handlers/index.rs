//! Artisan Payout Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    payouts::models::PayoutResponse,
    state::State,
};

/// Artisan Payout Index Handler
///
/// The signed-in artisan's payouts, newest first.
#[endpoint(
    tags("artisan"),
    summary = "My Payouts",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of payouts"),
        (status_code = StatusCode::FORBIDDEN, description = "Artisan access required"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<PayoutResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let payouts = state
        .app
        .payouts
        .list_payouts(actor, into_page(page, limit))
        .await?;

    Ok(ok(PageResponse::from_paginated(payouts)))
}
