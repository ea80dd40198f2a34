//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{ApiError, ApiMessage},
    extensions::*,
    state::State,
};

/// Delete User Handler
///
/// Users with orders or an artisan profile are deactivated instead.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "User cannot be deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "users.delete",
    skip(user, depot),
    fields(user_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiMessage>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let user = user.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    state.app.users.delete_user(admin, user.into()).await?;

    Ok(ApiMessage::new("User deleted"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tantika_app::domain::users::{UsersServiceError, records::UserUuid};

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, admin},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("users/{user}").delete(handler)
    }

    #[tokio::test]
    async fn test_deletes_the_user() -> TestResult {
        let uuid = UserUuid::new();
        let mut app = MockApp::new();

        app.users
            .expect_delete_user()
            .once()
            .withf(move |_, user| *user == uuid)
            .return_once(|_, _| Ok(()));

        let body: ApiMessage = TestClient::delete(format!("http://example.com/users/{uuid}"))
            .send(&app.service(Some(admin()), route()))
            .await
            .take_json()
            .await?;

        assert_eq!(body.message, "User deleted");

        Ok(())
    }

    #[tokio::test]
    async fn test_user_with_orders_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.users
            .expect_delete_user()
            .once()
            .return_once(|_, _| Err(UsersServiceError::HasOrders));

        let mut res = TestClient::delete(format!("http://example.com/users/{}", Uuid::now_v7()))
            .send(&app.service(Some(admin()), route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "User has orders and cannot be deleted");

        Ok(())
    }
}
