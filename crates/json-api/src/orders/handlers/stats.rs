//! Order Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    orders::models::OrderStatsResponse,
    state::State,
};

/// Order Stats Handler
///
/// Counts by status, paid revenue and today's orders.
#[endpoint(
    tags("admin"),
    summary = "Order Stats",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order statistics"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderStatsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state.app.orders.order_stats().await?;

    Ok(ok(stats.into()))
}
