//! Pending Artisans Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use tantika_app::domain::artisans::records::ArtisanStatus;

use crate::{
    artisans::{handlers::index::list, models::ArtisanResponse},
    envelope::{ApiError, ApiResponse, PageResponse},
};

/// Pending Artisans Handler
#[endpoint(
    tags("admin"),
    summary = "List Pending Artisans",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<ArtisanResponse>>>, ApiError> {
    list(depot, Some(ArtisanStatus::Pending), search, page, limit).await
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::{domain::artisans::records::ArtisanUuid, pagination::Paginated};

    use crate::{
        artisans::handlers::tests::artisan_with,
        test_helpers::{MockApp, admin},
    };

    use super::*;

    #[tokio::test]
    async fn test_lists_only_pending_applications() -> TestResult {
        let mut app = MockApp::new();

        app.artisans
            .expect_list_artisans()
            .once()
            .withf(|filter, page| {
                filter.status == Some(ArtisanStatus::Pending) && page.page() == 1
            })
            .return_once(|_, page| {
                let artisan = artisan_with(ArtisanUuid::new(), ArtisanStatus::Pending);
                Ok(Paginated::new(vec![artisan], 1, page))
            });

        let body: ApiResponse<PageResponse<ArtisanResponse>> =
            TestClient::get("http://example.com/admin/artisans/pending")
                .send(&app.service(
                    Some(admin()),
                    Router::with_path("admin/artisans/pending").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.items[0].status, "pending");

        Ok(())
    }
}
