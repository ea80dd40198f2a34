//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use tantika_app::domain::users::data::UserUpdate;

use crate::{
    auth::UserResponse,
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
    users::models::UpdateUserRequest,
};

/// Update User Handler
///
/// Artisan roles are managed through artisan review and cannot be set here.
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Reserved role or last admin"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin roles need a super admin"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "users.update",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.actor_or_401()?;
    let user = user.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let update = UserUpdate::try_from(json.into_inner())?;

    let user = state.app.users.update_user(admin, user.into(), update).await?;

    Ok(Json(
        ApiResponse::new(UserResponse::from(user)).message("User updated"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tantika_app::domain::users::{
        UsersServiceError,
        records::{UserRole, UserUuid},
    };

    use crate::{
        envelope::ErrorBody,
        test_helpers::{MockApp, admin, make_user, super_admin},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("users/{user}").put(handler)
    }

    #[tokio::test]
    async fn test_super_admin_grants_admin() -> TestResult {
        let owner = super_admin();
        let uuid = UserUuid::new();
        let mut app = MockApp::new();

        app.users
            .expect_update_user()
            .once()
            .withf(move |actor, user, update| {
                *actor == owner
                    && *user == uuid
                    && update.role == Some(UserRole::Admin)
                    && update.name.is_none()
            })
            .return_once(move |_, _, _| Ok(make_user(uuid, UserRole::Admin)));

        let body: ApiResponse<UserResponse> =
            TestClient::put(format!("http://example.com/users/{uuid}"))
                .json(&json!({ "role": "admin" }))
                .send(&app.service(Some(owner), route()))
                .await
                .take_json()
                .await?;

        assert_eq!(body.data.role, "admin");

        Ok(())
    }

    #[tokio::test]
    async fn test_artisan_role_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.users
            .expect_update_user()
            .once()
            .return_once(|_, _, _| Err(UsersServiceError::ReservedRole));

        let mut res = TestClient::put(format!("http://example.com/users/{}", Uuid::now_v7()))
            .json(&json!({ "role": "artisan" }))
            .send(&app.service(Some(admin()), route()))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Artisan roles are managed through artisan review");

        Ok(())
    }
}
