//! Clear Wishlist Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    account::models::ClearedResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Clear Wishlist Handler
#[endpoint(
    tags("account"),
    summary = "Clear Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wishlist cleared"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ClearedResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let removed = state.app.wishlists.clear(actor).await?;

    Ok(Json(
        ApiResponse::new(ClearedResponse { removed }).message("Wishlist cleared"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockApp, customer};

    use super::*;

    #[tokio::test]
    async fn test_reports_how_many_were_removed() -> TestResult {
        let mut app = MockApp::new();

        app.wishlists.expect_clear().once().return_once(|_| Ok(2));

        let body: ApiResponse<ClearedResponse> =
            TestClient::delete("http://example.com/usernorms/wishlist")
                .send(&app.service(
                    Some(customer()),
                    Router::with_path("usernorms/wishlist").delete(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.removed, 2);

        Ok(())
    }
}
