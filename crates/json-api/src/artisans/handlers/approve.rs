//! Approve Artisan Handler

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

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ApproveRequest {
    pub admin_notes: Option<String>,
}

/// Approve Artisan Handler
///
/// Approves a pending application and promotes its owner to the artisan role.
#[endpoint(
    tags("admin"),
    summary = "Approve Artisan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Artisan approved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Already approved or not pending"),
        (status_code = StatusCode::NOT_FOUND, description = "Artisan not found"),
    ),
)]
#[tracing::instrument(
    name = "artisans.approve",
    skip(artisan, json, depot),
    fields(artisan_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    artisan: PathParam<Uuid>,
    json: JsonBody<ApproveRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let artisan = artisan.into_inner();

    tracing::Span::current().record("artisan_uuid", tracing::field::display(artisan));

    let artisan = state
        .app
        .artisans
        .approve(admin, artisan.into(), json.into_inner().admin_notes)
        .await?;

    record_artisan_decision(ArtisanDecision::Approved, 1);

    Ok(Json(
        ApiResponse::new(ArtisanResponse::from(artisan)).message("Artisan approved"),
    ))
}
