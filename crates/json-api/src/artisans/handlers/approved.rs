//! Approved Artisans Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use tantika_app::domain::artisans::records::ArtisanStatus;

use crate::{
    artisans::{handlers::index::list, models::ArtisanResponse},
    envelope::{ApiError, ApiResponse, PageResponse},
};

/// Approved Artisans Handler
#[endpoint(
    tags("admin"),
    summary = "List Approved Artisans",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<ArtisanResponse>>>, ApiError> {
    list(depot, Some(ArtisanStatus::Approved), search, page, limit).await
}
