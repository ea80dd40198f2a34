//! Artisan Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    artisans::models::ArtisanStatsResponse,
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
};

/// Artisan Stats Handler
#[endpoint(tags("admin"), summary = "Artisan Stats", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanStatsResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state.app.artisans.artisan_stats().await?;

    Ok(ok(stats.into()))
}
