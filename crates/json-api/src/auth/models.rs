//! Account responses shared by auth, account and user management.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::{auth::IssuedSession, domain::users::records::UserRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,

    /// `user`, `admin`, `super_admin`, `artisan` or `pending_artisan`
    pub role: String,

    pub is_active: bool,
    pub artisan_uuid: Option<Uuid>,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role.to_string(),
            is_active: user.is_active,
            artisan_uuid: user.artisan_uuid.map(|artisan| artisan.into_uuid()),
            last_login_at: user.last_login_at.map(|at| at.to_string()),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// A signed-in session. The token is also set as an http-only cookie.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

impl From<IssuedSession> for SessionResponse {
    fn from(issued: IssuedSession) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.session.expires_at.to_string(),
            user: issued.user.into(),
        }
    }
}
