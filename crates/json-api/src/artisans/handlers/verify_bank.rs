//! Verify Bank Details Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    artisans::models::ArtisanResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Verify Bank Details Handler
///
/// Marks an artisan's bank details as checked so payouts can be requested.
#[endpoint(
    tags("admin"),
    summary = "Verify Artisan Bank Details",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Bank details verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bank details are incomplete"),
        (status_code = StatusCode::NOT_FOUND, description = "Artisan not found"),
    ),
)]
pub(crate) async fn handler(
    artisan: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ArtisanResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;

    let artisan = state
        .app
        .artisans
        .verify_bank_details(admin, artisan.into_inner().into())
        .await?;

    Ok(Json(
        ApiResponse::new(ArtisanResponse::from(artisan)).message("Bank details verified"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::artisans::{
        ArtisansServiceError,
        records::{ArtisanStatus, ArtisanUuid},
    };

    use crate::{
        artisans::handlers::tests::artisan_with,
        envelope::ErrorBody,
        test_helpers::{MockApp, admin},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/artisans/{artisan}/verify-bank").put(handler)
    }

    #[tokio::test]
    async fn test_verify_bank_success() -> TestResult {
        let uuid = ArtisanUuid::new();
        let mut app = MockApp::new();

        app.artisans
            .expect_verify_bank_details()
            .once()
            .return_once(move |_, _| {
                let mut artisan = artisan_with(uuid, ArtisanStatus::Approved);
                artisan.bank_details.verified = true;
                Ok(artisan)
            });

        let body: ApiResponse<ArtisanResponse> = TestClient::put(format!(
            "http://example.com/admin/artisans/{uuid}/verify-bank"
        ))
        .send(&app.service(Some(admin()), route()))
        .await
        .take_json()
        .await?;

        assert!(body.data.bank_details.verified);

        Ok(())
    }

    #[tokio::test]
    async fn test_incomplete_details_return_400() -> TestResult {
        let mut app = MockApp::new();

        app.artisans
            .expect_verify_bank_details()
            .once()
            .return_once(|_, _| Err(ArtisansServiceError::BankDetailsIncomplete));

        let mut res = TestClient::put(format!(
            "http://example.com/admin/artisans/{}/verify-bank",
            Uuid::now_v7()
        ))
        .send(&app.service(Some(admin()), route()))
        .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Bank details are incomplete");

        Ok(())
    }
}
