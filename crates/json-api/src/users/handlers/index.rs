//! User Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use tantika_app::domain::users::{data::UserFilter, records::UserRole};

use crate::{
    auth::UserResponse,
    envelope::{ApiError, ApiResponse, PageResponse, ok},
    extensions::*,
    state::State,
};

/// User Index Handler
///
/// Search matches name, email and phone.
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of users"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role"),
    ),
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    role: QueryParam<String, false>,
    active: QueryParam<bool, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = UserFilter {
        search: search.into_inner(),
        role: parse_optional::<UserRole>(role)?,
        is_active: active.into_inner(),
    };

    let users = state
        .app
        .users
        .search_users(filter, into_page(page, limit))
        .await?;

    Ok(ok(PageResponse::from_paginated(users)))
}
