//! Users service.

use std::collections::HashSet;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    auth::{Actor, PgAuthRepository, hash_password, verify_password},
    database::Db,
    domain::{
        BulkFailure,
        users::{
            data::{
                AddressUpdate, BulkUserUpdate, BulkUserUpdateOutcome, NewAddress, PasswordChange,
                ProfileUpdate, UserFilter, UserUpdate, normalize_name, normalize_phone,
            },
            errors::UsersServiceError,
            records::{AddressRecord, AddressUuid, UserRecord, UserRole, UserStats, UserUuid},
            repository::PgUsersRepository,
        },
    },
    pagination::{Page, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    sessions: PgAuthRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            sessions: PgAuthRepository::new(),
        }
    }

    /// Apply an admin edit to one user inside the caller's transaction.
    async fn apply_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        admin: Actor,
        user: UserUuid,
        update: &UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let target = self.repository.lock_user(tx, user).await?;

        check_admin_change(admin, &target, update.role)?;
        check_activation_change(&target, update.is_active)?;

        if removes_active_admin(&target, update.role, update.is_active) {
            let admins = self.repository.lock_active_admins(tx).await?;

            if admins.iter().all(|admin| *admin == target.uuid) {
                return Err(UsersServiceError::LastAdmin);
            }
        }

        let updated = self.repository.update_user(tx, user, update).await?;

        if target.is_active && !updated.is_active {
            let revoked = self.sessions.revoke_user_sessions(tx, user, None).await?;

            info!(%user, revoked, "revoked sessions of deactivated user");
        }

        Ok(updated)
    }

    async fn update_once(
        &self,
        admin: Actor,
        user: UserUuid,
        update: &UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.apply_update(&mut tx, admin, user, update).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

/// Reject role edits an admin is not allowed to make on `target`.
fn check_admin_change(
    admin: Actor,
    target: &UserRecord,
    role: Option<UserRole>,
) -> Result<(), UsersServiceError> {
    if target.uuid == admin.user {
        return Err(UsersServiceError::SelfModification);
    }

    let Some(role) = role.filter(|role| *role != target.role) else {
        return Ok(());
    };

    if role.is_artisan_role() || target.role.is_artisan_role() {
        return Err(UsersServiceError::ReservedRole);
    }

    if (role.is_admin() || target.role.is_admin()) && !admin.is_super_admin() {
        return Err(UsersServiceError::RequiresSuperAdmin);
    }

    Ok(())
}

/// Artisan owners follow their artisan's status, so their activation is not
/// edited directly.
fn check_activation_change(
    target: &UserRecord,
    is_active: Option<bool>,
) -> Result<(), UsersServiceError> {
    match is_active {
        Some(is_active) if is_active != target.is_active && target.role.is_artisan_role() => {
            Err(UsersServiceError::ArtisanActivation)
        }
        _ => Ok(()),
    }
}

/// Whether the edit takes an active admin out of the admin pool.
fn removes_active_admin(target: &UserRecord, role: Option<UserRole>, is_active: Option<bool>) -> bool {
    target.role.is_admin()
        && target.is_active
        && (role.is_some_and(|role| !role.is_admin()) || is_active == Some(false))
}

fn validated_update(update: UserUpdate) -> Result<UserUpdate, UsersServiceError> {
    Ok(UserUpdate {
        name: update.name.as_deref().map(normalize_name).transpose()?,
        phone: normalize_phone(update.phone.as_deref())?,
        role: update.role,
        is_active: update.is_active,
    })
}

fn address_not_found(error: sqlx::Error) -> UsersServiceError {
    match error {
        sqlx::Error::RowNotFound => UsersServiceError::AddressNotFound,
        error => error.into(),
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn search_users(
        &self,
        filter: UserFilter,
        page: Page,
    ) -> Result<Paginated<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let (users, total) = self.repository.search_users(&mut tx, &filter, page).await?;

        tx.commit().await?;

        Ok(Paginated::new(users, total, page))
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_user(
        &self,
        admin: Actor,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = validated_update(update)?;
        let updated = self.update_once(admin, user, &update).await?;

        info!(%user, admin = %admin.user, role = %updated.role, is_active = updated.is_active, "user updated");

        Ok(updated)
    }

    async fn set_user_active(
        &self,
        admin: Actor,
        user: UserUuid,
        is_active: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = UserUpdate {
            is_active: Some(is_active),
            ..UserUpdate::default()
        };

        let updated = self.update_once(admin, user, &update).await?;

        info!(%user, admin = %admin.user, is_active, "user activation changed");

        Ok(updated)
    }

    async fn delete_user(&self, admin: Actor, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let target = self.repository.lock_user(&mut tx, user).await?;

        if target.uuid == admin.user {
            return Err(UsersServiceError::SelfModification);
        }

        if target.role.is_admin() && !admin.is_super_admin() {
            return Err(UsersServiceError::RequiresSuperAdmin);
        }

        if removes_active_admin(&target, None, Some(false)) {
            let admins = self.repository.lock_active_admins(&mut tx).await?;

            if admins.iter().all(|admin| *admin == target.uuid) {
                return Err(UsersServiceError::LastAdmin);
            }
        }

        if self.repository.count_orders(&mut tx, user).await? > 0 {
            return Err(UsersServiceError::HasOrders);
        }

        if target.artisan_uuid.is_some() {
            return Err(UsersServiceError::HasArtisanProfile);
        }

        if self.repository.delete_user(&mut tx, user).await? == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%user, admin = %admin.user, "user deleted");

        Ok(())
    }

    async fn bulk_update(
        &self,
        admin: Actor,
        bulk: BulkUserUpdate,
    ) -> Result<BulkUserUpdateOutcome, UsersServiceError> {
        if bulk.role.is_none() && bulk.is_active.is_none() {
            return Err(UsersServiceError::InvalidInput(
                "a role or active flag is required",
            ));
        }

        let update = UserUpdate {
            role: bulk.role,
            is_active: bulk.is_active,
            ..UserUpdate::default()
        };

        let mut outcome = BulkUserUpdateOutcome::default();
        let mut seen = HashSet::with_capacity(bulk.users.len());

        for user in bulk.users {
            if !seen.insert(user) {
                continue;
            }

            match self.update_once(admin, user, &update).await {
                Ok(_) => outcome.updated.push(user),
                Err(error) => {
                    warn!(%user, error = %error, "bulk user update failed");

                    outcome.failed.push(BulkFailure::new(user, &error));
                }
            }
        }

        info!(
            admin = %admin.user,
            updated = outcome.updated.len(),
            failed = outcome.failed.len(),
            "bulk user update finished"
        );

        Ok(outcome)
    }

    async fn user_stats(&self) -> Result<UserStats, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.user_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }

    async fn update_profile(
        &self,
        actor: Actor,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = ProfileUpdate {
            name: update.name.as_deref().map(normalize_name).transpose()?,
            phone: normalize_phone(update.phone.as_deref())?,
        };

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_profile(&mut tx, actor.user, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn change_password(
        &self,
        actor: Actor,
        change: PasswordChange,
    ) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self.repository.get_credentials(&mut tx, actor.user).await?;

        if !verify_password(&change.current_password, &credentials.password_hash)? {
            return Err(UsersServiceError::IncorrectPassword);
        }

        let password_hash = hash_password(&change.new_password)?;

        self.repository
            .set_password_hash(&mut tx, actor.user, &password_hash)
            .await?;

        let revoked = self
            .sessions
            .revoke_user_sessions(&mut tx, actor.user, Some(actor.session))
            .await?;

        tx.commit().await?;

        info!(user = %actor.user, revoked, "password changed");

        Ok(())
    }

    async fn list_addresses(&self, actor: Actor) -> Result<Vec<AddressRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self.repository.list_addresses(&mut tx, actor.user).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn add_address(
        &self,
        actor: Actor,
        address: NewAddress,
    ) -> Result<AddressRecord, UsersServiceError> {
        let mut address = address.validated()?;

        let mut tx = self.db.begin().await?;

        self.repository.lock_user(&mut tx, actor.user).await?;

        if self.repository.count_addresses(&mut tx, actor.user).await? == 0 {
            address.is_default = true;
        }

        if address.is_default {
            self.repository
                .clear_default_address(&mut tx, actor.user)
                .await?;
        }

        let created = self
            .repository
            .create_address(&mut tx, actor.user, AddressUuid::new(), &address)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_address(
        &self,
        actor: Actor,
        address: AddressUuid,
        update: AddressUpdate,
    ) -> Result<AddressRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.lock_user(&mut tx, actor.user).await?;

        if update.is_default == Some(true) {
            self.repository
                .clear_default_address(&mut tx, actor.user)
                .await?;
        }

        let updated = self
            .repository
            .update_address(&mut tx, actor.user, address, &update)
            .await
            .map_err(address_not_found)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_address(
        &self,
        actor: Actor,
        address: AddressUuid,
    ) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.lock_user(&mut tx, actor.user).await?;

        let was_default = self
            .repository
            .delete_address(&mut tx, actor.user, address)
            .await?
            .ok_or(UsersServiceError::AddressNotFound)?;

        if was_default {
            self.repository
                .promote_oldest_address(&mut tx, actor.user)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Users matching the filter, newest first.
    async fn search_users(
        &self,
        filter: UserFilter,
        page: Page,
    ) -> Result<Paginated<UserRecord>, UsersServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Admin edit of another user's name, phone, role or activation.
    ///
    /// Artisan roles stay with the artisan review flow, admin roles are
    /// granted only by super admins, and the last active admin is kept.
    async fn update_user(
        &self,
        admin: Actor,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    async fn set_user_active(
        &self,
        admin: Actor,
        user: UserUuid,
        is_active: bool,
    ) -> Result<UserRecord, UsersServiceError>;

    async fn delete_user(&self, admin: Actor, user: UserUuid) -> Result<(), UsersServiceError>;

    /// Apply the same role or activation change to many users, one transaction each.
    async fn bulk_update(
        &self,
        admin: Actor,
        bulk: BulkUserUpdate,
    ) -> Result<BulkUserUpdateOutcome, UsersServiceError>;

    async fn user_stats(&self) -> Result<UserStats, UsersServiceError>;

    async fn update_profile(
        &self,
        actor: Actor,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Verify the current password, store the new one, and sign out other sessions.
    async fn change_password(
        &self,
        actor: Actor,
        change: PasswordChange,
    ) -> Result<(), UsersServiceError>;

    async fn list_addresses(&self, actor: Actor) -> Result<Vec<AddressRecord>, UsersServiceError>;

    /// The first address a user saves becomes their default.
    async fn add_address(
        &self,
        actor: Actor,
        address: NewAddress,
    ) -> Result<AddressRecord, UsersServiceError>;

    async fn update_address(
        &self,
        actor: Actor,
        address: AddressUuid,
        update: AddressUpdate,
    ) -> Result<AddressRecord, UsersServiceError>;

    /// Removing the default address promotes the oldest remaining one.
    async fn delete_address(
        &self,
        actor: Actor,
        address: AddressUuid,
    ) -> Result<(), UsersServiceError>;
}
