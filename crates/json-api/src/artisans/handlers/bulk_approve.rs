//! Bulk Approve Artisans Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use tantika_app::domain::artisans::records::ArtisanUuid;

use crate::{
    artisans::models::{BulkApproveResponse, BulkDecisionRequest},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    observability::{ArtisanDecision, record_artisan_decision},
    state::State,
};

/// Bulk Approve Artisans Handler
///
/// Each artisan is decided on its own; one failure does not undo the rest.
#[endpoint(
    tags("admin"),
    summary = "Bulk Approve Artisans",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Per-artisan outcome"),
        (status_code = StatusCode::BAD_REQUEST, description = "No artisans given"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BulkDecisionRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BulkApproveResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let artisans: Vec<ArtisanUuid> = json
        .into_inner()
        .artisans
        .into_iter()
        .map(Into::into)
        .collect();

    let outcome = state.app.artisans.bulk_approve(admin, artisans).await?;

    record_artisan_decision(ArtisanDecision::Approved, outcome.applied.len() as u64);

    let message = format!("{} artisans approved", outcome.applied.len());

    Ok(Json(
        ApiResponse::new(BulkApproveResponse::from(outcome)).message(message),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::{BulkFailure, artisans::data::BulkDecisionOutcome};

    use crate::test_helpers::{MockApp, admin};

    use super::*;

    #[tokio::test]
    async fn test_reports_each_outcome() -> TestResult {
        let approved = ArtisanUuid::new();
        let unchanged = ArtisanUuid::new();
        let missing = ArtisanUuid::new();

        let mut app = MockApp::new();

        app.artisans
            .expect_bulk_approve()
            .once()
            .withf(move |_, artisans| *artisans == vec![approved, unchanged, missing])
            .return_once(move |_, _| {
                Ok(BulkDecisionOutcome {
                    applied: vec![approved],
                    unchanged: vec![unchanged],
                    failed: vec![BulkFailure {
                        uuid: missing,
                        reason: "artisan not found".to_string(),
                    }],
                })
            });

        let body: ApiResponse<BulkApproveResponse> =
            TestClient::post("http://example.com/admin/artisans/bulk-approve")
                .json(&json!({
                    "artisans": [approved.into_uuid(), unchanged.into_uuid(), missing.into_uuid()],
                }))
                .send(&app.service(
                    Some(admin()),
                    Router::with_path("admin/artisans/bulk-approve").post(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.message.as_deref(), Some("1 artisans approved"));
        assert_eq!(body.data.approved, vec![approved.into_uuid()]);
        assert_eq!(body.data.already_approved, vec![unchanged.into_uuid()]);
        assert_eq!(body.data.failed.len(), 1);
        assert_eq!(body.data.failed[0].uuid, missing.into_uuid());
        assert_eq!(body.data.failed[0].reason, "artisan not found");

        Ok(())
    }
}
