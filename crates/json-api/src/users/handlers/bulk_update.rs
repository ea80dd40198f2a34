//! Bulk Update Users Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use tantika_app::domain::users::data::BulkUserUpdate;

use crate::{
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
    users::models::{BulkUpdateRequest, BulkUpdateResponse},
};

/// Bulk Update Users Handler
///
/// Each user is updated on its own; failures are reported per user.
#[endpoint(
    tags("users"),
    summary = "Bulk Update Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Per-user outcome"),
        (status_code = StatusCode::BAD_REQUEST, description = "Nothing to change or unknown role"),
    ),
)]
#[tracing::instrument(name = "users.bulk_update", skip(json, depot), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<BulkUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BulkUpdateResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;

    let bulk = BulkUserUpdate::try_from(json.into_inner())?;

    let outcome = state.app.users.bulk_update(admin, bulk).await?;
    let message = format!("{} users updated", outcome.updated.len());

    Ok(Json(
        ApiResponse::new(BulkUpdateResponse::from(outcome)).message(message),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::{
        BulkFailure,
        users::{data::BulkUserUpdateOutcome, records::UserUuid},
    };

    use crate::test_helpers::{MockApp, admin};

    use super::*;

    #[tokio::test]
    async fn test_reports_updated_and_failed_users() -> TestResult {
        let reviewer = admin();
        let updated = UserUuid::new();
        let missing = UserUuid::new();
        let mut app = MockApp::new();

        app.users
            .expect_bulk_update()
            .once()
            .withf(move |_, bulk| {
                bulk.users == vec![updated, missing]
                    && bulk.is_active == Some(false)
                    && bulk.role.is_none()
            })
            .return_once(move |_, _| {
                Ok(BulkUserUpdateOutcome {
                    updated: vec![updated],
                    failed: vec![BulkFailure {
                        uuid: missing,
                        reason: "user not found".to_string(),
                    }],
                })
            });

        let body: ApiResponse<BulkUpdateResponse> =
            TestClient::post("http://example.com/users/bulk-update")
                .json(&json!({
                    "users": [updated.into_uuid(), missing.into_uuid()],
                    "is_active": false,
                }))
                .send(&app.service(
                    Some(reviewer),
                    Router::with_path("users/bulk-update").post(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.updated, vec![updated.into_uuid()]);
        assert_eq!(body.data.failed[0].uuid, missing.into_uuid());
        assert_eq!(body.message.as_deref(), Some("1 users updated"));

        Ok(())
    }
}
