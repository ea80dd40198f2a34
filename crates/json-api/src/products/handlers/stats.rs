//! Product Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    products::models::ProductStatsResponse,
    state::State,
};

/// Product Stats Handler
#[endpoint(
    tags("products"),
    summary = "Product Stats",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Catalogue counts by review and stock state"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins only"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ProductStatsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state.app.products.product_stats().await?;

    Ok(ok(stats.into()))
}
