//! Bulk Reject Artisans Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use tantika_app::domain::artisans::records::ArtisanUuid;

use crate::{
    artisans::models::{BulkDecisionRequest, BulkRejectResponse},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    observability::{ArtisanDecision, record_artisan_decision},
    state::State,
};

/// Bulk Reject Artisans Handler
///
/// One reason applies to every artisan in the request.
#[endpoint(
    tags("admin"),
    summary = "Bulk Reject Artisans",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Per-artisan outcome"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing reason"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BulkDecisionRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BulkRejectResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let request = json.into_inner();
    let artisans: Vec<ArtisanUuid> = request.artisans.into_iter().map(Into::into).collect();

    let outcome = state
        .app
        .artisans
        .bulk_reject(admin, artisans, request.reason.unwrap_or_default())
        .await?;

    record_artisan_decision(ArtisanDecision::Rejected, outcome.applied.len() as u64);

    let message = format!("{} artisans rejected", outcome.applied.len());

    Ok(Json(
        ApiResponse::new(BulkRejectResponse::from(outcome)).message(message),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::artisans::{
        ArtisansServiceError, data::BulkDecisionOutcome, lifecycle::ArtisanAction,
    };

    use crate::test_helpers::{MockApp, admin};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/artisans/bulk-reject").post(handler)
    }

    #[tokio::test]
    async fn test_rejects_with_one_reason() -> TestResult {
        let uuid = ArtisanUuid::new();
        let mut app = MockApp::new();

        app.artisans
            .expect_bulk_reject()
            .once()
            .withf(move |_, artisans, reason| *artisans == vec![uuid] && reason == "Duplicate")
            .return_once(move |_, _, _| {
                Ok(BulkDecisionOutcome {
                    applied: vec![uuid],
                    ..BulkDecisionOutcome::default()
                })
            });

        let body: ApiResponse<BulkRejectResponse> =
            TestClient::post("http://example.com/admin/artisans/bulk-reject")
                .json(&json!({ "artisans": [uuid.into_uuid()], "reason": "Duplicate" }))
                .send(&app.service(Some(admin()), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.rejected, vec![uuid.into_uuid()]);
        assert!(body.data.already_rejected.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_reason_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.artisans
            .expect_bulk_reject()
            .once()
            .return_once(|_, _, _| {
                Err(ArtisansServiceError::ReasonRequired(ArtisanAction::Reject))
            });

        let res = TestClient::post("http://example.com/admin/artisans/bulk-reject")
            .json(&json!({ "artisans": [uuid::Uuid::now_v7()] }))
            .send(&app.service(Some(admin()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
