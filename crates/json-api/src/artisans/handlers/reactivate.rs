//! Reactivate Artisan Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    artisans::models::ArtisanResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    observability::{ArtisanDecision, record_artisan_decision},
    state::State,
};

/// Reactivate Artisan Handler
#[endpoint(
    tags("admin"),
    summary = "Reactivate Artisan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Artisan reactivated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Artisan is not suspended"),
        (status_code = StatusCode::NOT_FOUND, description = "Artisan not found"),
    ),
)]
#[tracing::instrument(
    name = "artisans.reactivate",
    skip(artisan, depot),
    fields(artisan_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    artisan: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let artisan = artisan.into_inner();

    tracing::Span::current().record("artisan_uuid", tracing::field::display(artisan));

    let artisan = state
        .app
        .artisans
        .reactivate(admin, artisan.into())
        .await?;

    record_artisan_decision(ArtisanDecision::Reactivated, 1);

    Ok(Json(
        ApiResponse::new(ArtisanResponse::from(artisan)).message("Artisan reactivated"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::artisans::records::{ArtisanStatus, ArtisanUuid};

    use crate::{
        artisans::handlers::tests::artisan_with,
        test_helpers::{MockApp, admin},
    };

    use super::*;

    #[tokio::test]
    async fn test_reactivate_success() -> TestResult {
        let uuid = ArtisanUuid::new();
        let mut app = MockApp::new();

        app.artisans
            .expect_reactivate()
            .once()
            .withf(move |_, artisan| *artisan == uuid)
            .return_once(move |_, _| Ok(artisan_with(uuid, ArtisanStatus::Approved)));

        let body: ApiResponse<ArtisanResponse> =
            TestClient::put(format!("http://example.com/admin/artisans/{uuid}/reactivate"))
                .send(&app.service(
                    Some(admin()),
                    Router::with_path("admin/artisans/{artisan}/reactivate").put(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.status, "approved");

        Ok(())
    }
}
