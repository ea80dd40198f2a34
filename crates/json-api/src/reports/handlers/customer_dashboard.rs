//! Customer Dashboard Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    reports::models::CustomerDashboardResponse,
    state::State,
};

/// Customer Dashboard Handler
///
/// Order counts, total spend, wishlist size and the five latest orders.
#[endpoint(
    tags("account"),
    summary = "My Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Dashboard figures"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CustomerDashboardResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let dashboard = state.app.reports.customer_dashboard(actor).await?;

    Ok(ok(dashboard.into()))
}
