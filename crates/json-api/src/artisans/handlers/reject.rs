//! Reject Artisan Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    artisans::models::ArtisanResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    observability::{ArtisanDecision, record_artisan_decision},
    state::State,
};

/// Decision Reason Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ReasonRequest {
    pub reason: Option<String>,
}

/// Reject Artisan Handler
#[endpoint(
    tags("admin"),
    summary = "Reject Artisan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Artisan rejected"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing reason or not pending"),
        (status_code = StatusCode::NOT_FOUND, description = "Artisan not found"),
    ),
)]
#[tracing::instrument(
    name = "artisans.reject",
    skip(artisan, json, depot),
    fields(artisan_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    artisan: PathParam<Uuid>,
    json: JsonBody<ReasonRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let artisan = artisan.into_inner();

    tracing::Span::current().record("artisan_uuid", tracing::field::display(artisan));

    let artisan = state
        .app
        .artisans
        .reject(
            admin,
            artisan.into(),
            json.into_inner().reason.unwrap_or_default(),
        )
        .await?;

    record_artisan_decision(ArtisanDecision::Rejected, 1);

    Ok(Json(
        ApiResponse::new(ArtisanResponse::from(artisan)).message("Artisan rejected"),
    ))
}
