//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    auth::{
        Actor, ArtisanApplication, AuthServiceError, Credentials, IssuedSession, NewAccount,
        SessionTokenVersion, SessionUuid, format_session_token, generate_session_secret,
        hash_password, parse_session_token,
        repository::{NewSession, PgAuthRepository},
        session_verifier, verify_password,
    },
    database::Db,
    domain::{
        artisans::{records::ArtisanUuid, repository::PgArtisansRepository},
        notifications::{
            data::NewNotification,
            records::{NotificationKind, Recipient},
            repository::PgNotificationsRepository,
        },
        users::{
            data::{NewUser, normalize_email, normalize_name, normalize_phone},
            records::{UserRecord, UserRole, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL_HOURS: i32 = 24 * 7;

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    users: PgUsersRepository,
    artisans: PgArtisansRepository,
    notifications: PgNotificationsRepository,
    session_ttl_hours: i32,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, session_ttl_hours: i32) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            users: PgUsersRepository::new(),
            artisans: PgArtisansRepository::new(),
            notifications: PgNotificationsRepository::new(),
            session_ttl_hours,
        }
    }

    /// Mint a session for `user` inside the caller's transaction.
    async fn issue_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserRecord,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();

        let token = format_session_token(session_uuid.into_uuid(), version, &secret);
        let token_hash = session_verifier(&session_uuid.into_uuid(), version, &secret);

        let session = self
            .repository
            .create_session(
                tx,
                &NewSession {
                    uuid: session_uuid,
                    user_uuid: user.uuid,
                    version,
                    token_hash,
                    ttl_hours: self.session_ttl_hours,
                },
            )
            .await?;

        Ok(IssuedSession {
            token,
            session,
            user,
        })
    }

    async fn touch_session(&self, session: SessionUuid) -> Result<(), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        self.repository.touch_session(&mut tx, session).await?;

        tx.commit().await
    }
}

/// Normalise account fields and hash the password.
fn new_user(account: NewAccount, role: UserRole) -> Result<NewUser, AuthServiceError> {
    Ok(NewUser {
        uuid: UserUuid::new(),
        name: normalize_name(&account.name)?,
        email: normalize_email(&account.email)?,
        phone: normalize_phone(account.phone.as_deref())?,
        password_hash: hash_password(&account.password)?,
        role,
    })
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register_customer(
        &self,
        account: NewAccount,
    ) -> Result<IssuedSession, AuthServiceError> {
        let user = new_user(account, UserRole::User)?;

        let mut tx = self.db.begin().await?;

        let user = self.users.create_user(&mut tx, &user).await?;
        let issued = self.issue_session(&mut tx, user).await?;

        tx.commit().await?;

        info!(user = %issued.user.uuid, "customer registered");

        Ok(issued)
    }

    async fn register_artisan(
        &self,
        application: ArtisanApplication,
    ) -> Result<IssuedSession, AuthServiceError> {
        let user = new_user(application.account, UserRole::PendingArtisan)?;
        let profile = application.profile.validated()?;

        let mut tx = self.db.begin().await?;

        let user = self.users.create_user(&mut tx, &user).await?;

        let artisan = self
            .artisans
            .create_artisan(&mut tx, ArtisanUuid::new(), user.uuid, &profile)
            .await?;

        let user = self
            .users
            .set_lifecycle_state(
                &mut tx,
                user.uuid,
                UserRole::PendingArtisan,
                true,
                Some(artisan.uuid),
            )
            .await?;

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification::new(
                    Recipient::Admins,
                    NotificationKind::ArtisanApplication,
                    "New artisan application",
                    format!(
                        "{} ({}) applied to sell on Tantika.",
                        artisan.business_name, user.email
                    ),
                )
                .with_link(format!("/admin/artisans/{}", artisan.uuid)),
            )
            .await?;

        let issued = self.issue_session(&mut tx, user).await?;

        tx.commit().await?;

        info!(user = %issued.user.uuid, artisan = %artisan.uuid, "artisan application received");

        Ok(issued)
    }

    async fn create_admin(
        &self,
        account: NewAccount,
        super_admin: bool,
    ) -> Result<UserRecord, AuthServiceError> {
        let role = if super_admin {
            UserRole::SuperAdmin
        } else {
            UserRole::Admin
        };
        let user = new_user(account, role)?;

        let mut tx = self.db.begin().await?;

        let user = self.users.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        info!(user = %user.uuid, role = %user.role, "admin account created");

        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let email = normalize_email(&credentials.email)
            .map_err(|_| AuthServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let stored = self
            .users
            .find_credentials_by_email(&mut tx, &email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &stored.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !stored.is_active {
            return Err(AuthServiceError::Inactive);
        }

        self.users.touch_last_login(&mut tx, stored.uuid).await?;

        let user = self.users.get_user(&mut tx, stored.uuid).await?;
        let issued = self.issue_session(&mut tx, user).await?;

        tx.commit().await?;

        info!(user = %issued.user.uuid, session = %issued.session.uuid, "user logged in");

        Ok(issued)
    }

    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.repository.revoke_session(&mut tx, session).await?;

        tx.commit().await?;

        info!(%session, revoked = revoked > 0, "session closed");

        Ok(())
    }

    async fn authenticate(&self, token: &str) -> Result<Actor, AuthServiceError> {
        let parsed = parse_session_token(token)?;
        let session = SessionUuid::from_uuid(parsed.session_uuid);

        let mut tx = self.db.begin().await?;

        let active = self
            .repository
            .find_active_session(&mut tx, session, parsed.version)
            .await?
            .ok_or(AuthServiceError::Unauthenticated)?;

        tx.commit().await?;

        let verifier = session_verifier(&parsed.session_uuid, parsed.version, &parsed.secret);

        if active.version != parsed.version || verifier != active.token_hash {
            return Err(AuthServiceError::Unauthenticated);
        }

        if !active.is_active {
            return Err(AuthServiceError::Unauthenticated);
        }

        // Best-effort metadata update; authentication does not depend on it.
        if let Err(error) = self.touch_session(session).await {
            warn!(%session, error = %error, "failed to record session use");
        }

        Ok(Actor {
            user: active.user_uuid,
            role: active.role,
            artisan: active.artisan_uuid,
            session,
        })
    }

    async fn me(&self, actor: Actor) -> Result<UserRecord, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.users.get_user(&mut tx, actor.user).await?;

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a customer account and sign it in.
    async fn register_customer(&self, account: NewAccount)
    -> Result<IssuedSession, AuthServiceError>;

    /// Create an account with a pending artisan profile and sign it in.
    async fn register_artisan(
        &self,
        application: ArtisanApplication,
    ) -> Result<IssuedSession, AuthServiceError>;

    /// Create an admin account without a session. Used for bootstrapping.
    async fn create_admin(
        &self,
        account: NewAccount,
        super_admin: bool,
    ) -> Result<UserRecord, AuthServiceError>;

    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError>;

    /// Resolve a session token into the calling actor.
    async fn authenticate(&self, token: &str) -> Result<Actor, AuthServiceError>;

    async fn me(&self, actor: Actor) -> Result<UserRecord, AuthServiceError>;
}
