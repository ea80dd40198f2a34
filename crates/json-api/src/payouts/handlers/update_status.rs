//! Update Payout Status Handler

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

use tantika_app::domain::payouts::data::PayoutStatusUpdate;

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    payouts::models::PayoutResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayoutStatusRequest {
    /// `processing`, `processed`, `failed` or `cancelled`
    pub status: String,

    /// Bank reference; required for `processed`
    #[serde(default)]
    pub transaction_reference: Option<String>,

    /// Required for `failed`
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl TryFrom<PayoutStatusRequest> for PayoutStatusUpdate {
    type Error = ApiError;

    fn try_from(request: PayoutStatusRequest) -> Result<Self, Self::Error> {
        Ok(PayoutStatusUpdate {
            status: request.status.trim().parse()?,
            transaction_reference: request.transaction_reference,
            failure_reason: request.failure_reason,
        })
    }
}

/// Update Payout Status Handler
#[endpoint(
    tags("admin"),
    summary = "Update Payout Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payout updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid transition or missing reference"),
        (status_code = StatusCode::NOT_FOUND, description = "Payout not found"),
    ),
)]
#[tracing::instrument(
    name = "payouts.update_status",
    skip(payout, json, depot),
    fields(payout_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    payout: PathParam<Uuid>,
    json: JsonBody<PayoutStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PayoutResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let payout = payout.into_inner();

    tracing::Span::current().record("payout_uuid", tracing::field::display(payout));

    let update = PayoutStatusUpdate::try_from(json.into_inner())?;

    let payout = state
        .app
        .payouts
        .update_payout_status(admin, payout.into(), update)
        .await?;

    let message = format!("Payout {}", payout.status);

    Ok(Json(ApiResponse::new(PayoutResponse::from(payout)).message(message)))
}
