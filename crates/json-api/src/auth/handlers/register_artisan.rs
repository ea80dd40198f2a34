//! Register Artisan Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use tantika_app::{
    auth::{ArtisanApplication, NewAccount},
    domain::artisans::data::NewArtisanProfile,
};

use crate::{
    auth::{SessionResponse, cookie},
    envelope::{ApiError, ApiResponse},
    extensions::*,
    state::State,
};

/// Artisan Application Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterArtisanRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub business_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    /// e.g. `aadhaar`, `pan`
    pub identity_proof_kind: String,
    pub identity_proof_number: String,
}

impl fmt::Debug for RegisterArtisanRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterArtisanRequest")
            .field("email", &self.email)
            .field("business_name", &self.business_name)
            .field("password", &"**redacted**")
            .finish_non_exhaustive()
    }
}

impl From<RegisterArtisanRequest> for ArtisanApplication {
    fn from(request: RegisterArtisanRequest) -> Self {
        ArtisanApplication {
            account: NewAccount {
                name: request.name,
                email: request.email,
                phone: request.phone,
                password: request.password,
            },
            profile: NewArtisanProfile {
                business_name: request.business_name,
                description: request.description,
                specialties: request.specialties,
                city: request.city,
                state: request.state,
                identity_proof_kind: request.identity_proof_kind,
                identity_proof_number: request.identity_proof_number,
            },
        }
    }
}

/// Register Artisan Handler
///
/// Creates an account with a pending artisan profile. Admins are notified
/// and the applicant can sign in while the application is reviewed.
#[endpoint(
    tags("auth"),
    summary = "Apply as Artisan",
    responses(
        (status_code = StatusCode::CREATED, description = "Application submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid input or email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.register_artisan", skip(json, depot, res), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<RegisterArtisanRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .register_artisan(json.into_inner().into())
        .await?;

    tracing::info!(
        user_uuid = %issued.user.uuid,
        artisan_uuid = ?issued.user.artisan_uuid,
        "artisan application submitted"
    );

    cookie::set_session(res, &issued.token, state.http);
    res.status_code(StatusCode::CREATED);

    Ok(Json(
        ApiResponse::new(SessionResponse::from(issued))
            .message("Application submitted. You will be notified once it is reviewed."),
    ))
}
