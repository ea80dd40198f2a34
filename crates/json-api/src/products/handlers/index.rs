//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use tantika_app::domain::{artisans::records::ArtisanUuid, products::data::ProductFilter};

use crate::{
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    products::ProductResponse,
    state::State,
};

/// Product Index Handler
///
/// The public catalogue: approved, published products only.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "One page of the catalogue"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid filter"),
    ),
)]
#[expect(clippy::too_many_arguments, reason = "one extractor per query parameter")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    artisan: QueryParam<Uuid, false>,
    search: QueryParam<String, false>,
    min_price: QueryParam<u64, false>,
    max_price: QueryParam<u64, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<ProductResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: category.into_inner(),
        artisan: artisan.into_inner().map(ArtisanUuid::from_uuid),
        search: search.into_inner(),
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
    };

    let products = state
        .app
        .products
        .list_products(filter, into_page(page, limit))
        .await?;

    Ok(ok(PageResponse::from_paginated(products)))
}
