//! User Administration Requests and Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::users::{
    data::{BulkUserUpdate, BulkUserUpdateOutcome, UserUpdate},
    records::{UserRole, UserStats, UserUuid},
};

use crate::envelope::{ApiError, BulkFailureResponse};

fn parse_role(role: Option<String>) -> Result<Option<UserRole>, ApiError> {
    Ok(role.as_deref().map(str::trim).map(str::parse).transpose()?)
}

/// Update User Request; absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,

    /// `user`, `admin` or `super_admin`
    pub role: Option<String>,

    pub is_active: Option<bool>,
}

impl TryFrom<UpdateUserRequest> for UserUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(UserUpdate {
            name: request.name,
            phone: request.phone,
            role: parse_role(request.role)?,
            is_active: request.is_active,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkUpdateRequest {
    pub users: Vec<Uuid>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<BulkUpdateRequest> for BulkUserUpdate {
    type Error = ApiError;

    fn try_from(request: BulkUpdateRequest) -> Result<Self, Self::Error> {
        Ok(BulkUserUpdate {
            users: request.users.into_iter().map(UserUuid::from_uuid).collect(),
            role: parse_role(request.role)?,
            is_active: request.is_active,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkUpdateResponse {
    pub updated: Vec<Uuid>,
    pub failed: Vec<BulkFailureResponse>,
}

impl From<BulkUserUpdateOutcome> for BulkUpdateResponse {
    fn from(outcome: BulkUserUpdateOutcome) -> Self {
        Self {
            updated: outcome.updated.into_iter().map(Into::into).collect(),
            failed: outcome.failed.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserStatsResponse {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub customers: u64,
    pub artisans: u64,
    pub pending_artisans: u64,
    pub admins: u64,
}

impl From<UserStats> for UserStatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            inactive: stats.inactive,
            customers: stats.customers,
            artisans: stats.artisans,
            pending_artisans: stats.pending_artisans,
            admins: stats.admins,
        }
    }
}
