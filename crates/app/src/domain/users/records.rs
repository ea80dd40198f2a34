//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{UnknownVariant, artisans::records::ArtisanUuid},
    uuids::TypedUuid,
};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Address UUID
pub type AddressUuid = TypedUuid<AddressRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    User,
    Admin,
    SuperAdmin,
    Artisan,
    PendingArtisan,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
            Self::Artisan => "artisan",
            Self::PendingArtisan => "pending_artisan",
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Roles owned by the artisan lifecycle rather than user management.
    #[must_use]
    pub const fn is_artisan_role(self) -> bool {
        matches!(self, Self::Artisan | Self::PendingArtisan)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            "artisan" => Ok(Self::Artisan),
            "pending_artisan" => Ok(Self::PendingArtisan),
            other => Err(UnknownVariant::new("role", other)),
        }
    }
}

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub artisan_uuid: Option<ArtisanUuid>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stored credentials, only read during login and password changes.
#[derive(Clone)]
pub(crate) struct UserCredentials {
    pub uuid: UserUuid,
    pub password_hash: String,
    pub is_active: bool,
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("uuid", &self.uuid)
            .field("password_hash", &"**redacted**")
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Address Record
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub uuid: AddressUuid,
    pub user_uuid: UserUuid,
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Account counts for the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub customers: u64,
    pub artisans: u64,
    pub pending_artisans: u64,
    pub admins: u64,
    pub joined_last_30_days: u64,
}
