//! Customer Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    orders::OrderResponse,
    state::State,
};

/// Customer Order Index Handler
///
/// Orders the caller placed, whatever their role.
#[endpoint(
    tags("account"),
    summary = "My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of orders"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<OrderResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let orders = state
        .app
        .orders
        .list_customer_orders(actor, into_page(page, limit))
        .await?;

    Ok(ok(PageResponse::from_paginated(orders)))
}
