//! Update Artisan Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    artisans::models::{ArtisanResponse, ProfileUpdateRequest},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Update Artisan Profile Handler
#[endpoint(
    tags("artisan"),
    summary = "Update Own Artisan Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid field"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ProfileUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let artisan = state
        .app
        .artisans
        .update_profile(actor, json.into_inner().into())
        .await?;

    Ok(Json(
        ApiResponse::new(ArtisanResponse::from(artisan)).message("Profile updated"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::artisans::{
        ArtisansServiceError,
        records::{ArtisanStatus, ArtisanUuid},
    };

    use crate::{
        artisans::handlers::tests::artisan_with,
        envelope::ErrorBody,
        test_helpers::{MockApp, artisan},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("artisan/profile").put(handler)
    }

    #[tokio::test]
    async fn test_update_profile_success() -> TestResult {
        let mut app = MockApp::new();

        app.artisans
            .expect_update_profile()
            .once()
            .withf(|_, update| {
                update.specialties == Some(vec!["ikat".to_string(), "kalamkari".to_string()])
                    && update.business_name.is_none()
            })
            .return_once(|_, update| {
                let mut artisan = artisan_with(ArtisanUuid::new(), ArtisanStatus::Approved);
                artisan.specialties = update.specialties.unwrap_or_default();
                Ok(artisan)
            });

        let body: ApiResponse<ArtisanResponse> =
            TestClient::put("http://example.com/artisan/profile")
                .json(&json!({ "specialties": ["ikat", "kalamkari"] }))
                .send(&app.service(Some(artisan()), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.specialties, ["ikat", "kalamkari"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_business_name_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.artisans
            .expect_update_profile()
            .once()
            .return_once(|_, _| {
                Err(ArtisansServiceError::InvalidInput("business name is required"))
            });

        let mut res = TestClient::put("http://example.com/artisan/profile")
            .json(&json!({ "business_name": " " }))
            .send(&app.service(Some(artisan()), route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Business name is required");

        Ok(())
    }
}
