//! Register Customer Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tantika_app::auth::NewAccount;

use crate::{
    auth::{SessionResponse, cookie},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Register Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl From<RegisterRequest> for NewAccount {
    fn from(request: RegisterRequest) -> Self {
        NewAccount {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password: request.password,
        }
    }
}

/// Register Customer Handler
///
/// Creates a customer account and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Register Customer",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid input or email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.register", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .register_customer(json.into_inner().into())
        .await?;

    tracing::info!(user_uuid = %issued.user.uuid, "customer registered");

    cookie::set_session(res, &issued.token, state.http);
    res.status_code(StatusCode::CREATED);

    Ok(Json(
        ApiResponse::new(SessionResponse::from(issued)).message("Registration successful"),
    ))
}
