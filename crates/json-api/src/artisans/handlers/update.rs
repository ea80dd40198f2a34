//! Update Artisan Handler

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

use tantika_app::domain::artisans::{
    data::{ArtisanProfileUpdate, ArtisanUpdate},
    records::ArtisanStatus,
};

use crate::{
    artisans::models::ArtisanResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Update Artisan Request; absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateArtisanRequest {
    pub business_name: Option<String>,
    pub description: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub admin_notes: Option<String>,

    /// Move the artisan through the review lifecycle
    pub status: Option<String>,

    /// Required when `status` rejects or suspends
    pub reason: Option<String>,
}

impl TryFrom<UpdateArtisanRequest> for ArtisanUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateArtisanRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<ArtisanStatus>)
            .transpose()?;

        Ok(ArtisanUpdate {
            profile: ArtisanProfileUpdate {
                business_name: request.business_name,
                description: request.description,
                specialties: request.specialties,
                city: request.city,
                state: request.state,
            },
            admin_notes: request.admin_notes,
            status,
            reason: request.reason,
        })
    }
}

/// Update Artisan Handler
///
/// Profile edits plus an optional status change, which follows the same
/// rules as the dedicated approve, reject, suspend and reactivate actions.
#[endpoint(
    tags("admin"),
    summary = "Update Artisan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Artisan updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid field or status change"),
        (status_code = StatusCode::NOT_FOUND, description = "Artisan not found"),
    ),
)]
pub(crate) async fn handler(
    artisan: PathParam<Uuid>,
    json: JsonBody<UpdateArtisanRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let update = ArtisanUpdate::try_from(json.into_inner())?;

    let artisan = state
        .app
        .artisans
        .update_artisan(admin, artisan.into_inner().into(), update)
        .await?;

    Ok(Json(
        ApiResponse::new(ArtisanResponse::from(artisan)).message("Artisan updated"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::artisans::{ArtisansServiceError, records::ArtisanUuid};

    use crate::{
        artisans::handlers::tests::artisan_with,
        test_helpers::{MockApp, admin},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/artisans/{artisan}").put(handler)
    }

    #[tokio::test]
    async fn test_status_change_is_parsed() -> TestResult {
        let uuid = ArtisanUuid::new();
        let mut app = MockApp::new();

        app.artisans
            .expect_update_artisan()
            .once()
            .withf(move |_, artisan, update| {
                *artisan == uuid
                    && update.status == Some(ArtisanStatus::Suspended)
                    && update.reason.as_deref() == Some("Fraud report")
                    && update.profile.city.as_deref() == Some("Hyderabad")
            })
            .return_once(move |_, _, _| Ok(artisan_with(uuid, ArtisanStatus::Suspended)));

        let body: ApiResponse<ArtisanResponse> =
            TestClient::put(format!("http://example.com/admin/artisans/{uuid}"))
                .json(&json!({
                    "city": "Hyderabad",
                    "status": "suspended",
                    "reason": "Fraud report",
                }))
                .send(&app.service(Some(admin()), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.status, "suspended");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.artisans.expect_update_artisan().never();

        let res = TestClient::put(format!("http://example.com/admin/artisans/{}", Uuid::now_v7()))
            .json(&json!({ "status": "archived" }))
            .send(&app.service(Some(admin()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_back_to_pending_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.artisans
            .expect_update_artisan()
            .once()
            .return_once(|_, _, _| Err(ArtisansServiceError::BackToPending));

        let res = TestClient::put(format!("http://example.com/admin/artisans/{}", Uuid::now_v7()))
            .json(&json!({ "status": "pending" }))
            .send(&app.service(Some(admin()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
