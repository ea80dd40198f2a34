//! Artisan Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    products::ProductResponse,
    state::State,
};

/// Artisan Product Index Handler
///
/// Every live product of the signed-in artisan, whatever its review state.
#[endpoint(
    tags("artisan"),
    summary = "List Own Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of the artisan's products"),
        (status_code = StatusCode::FORBIDDEN, description = "Artisans only"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<ProductResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let artisan = depot
        .actor_or_401()?
        .acting_artisan()
        .ok_or_else(|| ApiError::forbidden("Artisan access required"))?;

    let products = state
        .app
        .products
        .list_artisan_products(artisan, into_page(page, limit))
        .await?;

    Ok(ok(PageResponse::from_paginated(products)))
}
