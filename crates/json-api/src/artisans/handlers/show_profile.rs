//! Show Artisan Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    artisans::models::ArtisanResponse,
    envelope::{ApiError, ApiResponse, ok},
    extensions::*,
    state::State,
};

/// Show Artisan Profile Handler
#[endpoint(
    tags("artisan"),
    summary = "Own Artisan Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The signed-in artisan's profile"),
        (status_code = StatusCode::FORBIDDEN, description = "Artisans only"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let artisan = state.app.artisans.get_profile(actor).await?;

    Ok(ok(artisan.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::artisans::records::ArtisanStatus;

    use crate::{
        artisans::handlers::tests::artisan_with,
        test_helpers::{MockApp, pending_artisan},
    };

    use super::*;

    #[tokio::test]
    async fn test_pending_applicants_see_their_profile() -> TestResult {
        let applicant = pending_artisan();
        let mut app = MockApp::new();

        app.artisans
            .expect_get_profile()
            .once()
            .withf(move |actor| *actor == applicant)
            .return_once(move |actor| {
                Ok(artisan_with(
                    actor.artisan.unwrap_or_default(),
                    ArtisanStatus::Pending,
                ))
            });

        let body: ApiResponse<ArtisanResponse> =
            TestClient::get("http://example.com/artisan/profile")
                .send(&app.service(
                    Some(applicant),
                    Router::with_path("artisan/profile").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.status, "pending");
        assert_eq!(Some(body.data.uuid), applicant.artisan.map(|a| a.into_uuid()));

        Ok(())
    }
}
