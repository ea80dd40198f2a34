//! Get Artisan Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    artisans::models::ArtisanResponse,
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
};

/// Get Artisan Handler
#[endpoint(
    tags("admin"),
    summary = "Get Artisan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The artisan"),
        (status_code = StatusCode::NOT_FOUND, description = "Artisan not found"),
    ),
)]
pub(crate) async fn handler(
    artisan: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let artisan = state
        .app
        .artisans
        .get_artisan(artisan.into_inner().into())
        .await?;

    Ok(ok(artisan.into()))
}
