//! Auth data models.

use std::fmt;

use jiff::Timestamp;

use crate::{
    auth::SessionTokenVersion,
    domain::{
        artisans::{data::NewArtisanProfile, records::ArtisanUuid},
        users::records::{UserRecord, UserRole, UserUuid},
    },
    uuids::TypedUuid,
};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionRecord>;

/// Session metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,

    pub role: UserRole,
    pub is_active: bool,
    pub artisan_uuid: Option<ArtisanUuid>,
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user: UserUuid,
    pub role: UserRole,
    pub artisan: Option<ArtisanUuid>,
    pub session: SessionUuid,
}

impl Actor {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    #[must_use]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self.role, UserRole::SuperAdmin)
    }

    /// The artisan profile the caller acts for, if their role carries one.
    #[must_use]
    pub fn acting_artisan(&self) -> Option<ArtisanUuid> {
        self.artisan.filter(|_| self.role.is_artisan_role())
    }
}

/// Session issuance result with the one-time raw token.
#[derive(Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: SessionRecord,
    pub user: UserRecord,
}

impl fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedSession")
            .field("token", &"**redacted**")
            .field("session", &self.session)
            .field("user", &self.user)
            .finish()
    }
}

/// Account fields shared by every registration path.
#[derive(Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"**redacted**")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ArtisanApplication {
    pub account: NewAccount,
    pub profile: NewArtisanProfile,
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}
