//! Artisans service.

use std::collections::HashSet;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    auth::{Actor, PgAuthRepository},
    database::Db,
    domain::{
        BulkFailure,
        artisans::{
            data::{
                ArtisanFilter, ArtisanProfileUpdate, ArtisanUpdate, BankDetailsUpdate,
                BulkDecisionOutcome,
            },
            errors::ArtisansServiceError,
            lifecycle::ArtisanAction,
            records::{ArtisanRecord, ArtisanStats, ArtisanUuid, BankDetails},
            repository::{Decision, PgArtisansRepository},
        },
        notifications::{
            data::NewNotification,
            records::{NotificationKind, Recipient},
            repository::PgNotificationsRepository,
        },
        optional_text,
        users::{records::UserUuid, repository::PgUsersRepository},
    },
    pagination::{Page, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgArtisansService {
    db: Db,
    repository: PgArtisansRepository,
    users: PgUsersRepository,
    sessions: PgAuthRepository,
    notifications: PgNotificationsRepository,
}

impl PgArtisansService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgArtisansRepository::new(),
            users: PgUsersRepository::new(),
            sessions: PgAuthRepository::new(),
            notifications: PgNotificationsRepository::new(),
        }
    }

    /// Apply one review decision inside the caller's transaction.
    ///
    /// The artisan row is locked first; a rejected transition returns before
    /// anything is written. The owning user's role and activation are updated
    /// to match the new status in the same transaction.
    async fn decide(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        admin: UserUuid,
        artisan: ArtisanUuid,
        action: ArtisanAction,
        reason: Option<&str>,
        admin_notes: Option<&str>,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        let reason = optional_text(reason);

        if action.requires_reason() && reason.is_none() {
            return Err(ArtisansServiceError::ReasonRequired(action));
        }

        let current = self.repository.lock_artisan(tx, artisan).await?;
        let next = current.status.apply(action)?;

        let written = self
            .repository
            .apply_decision(
                tx,
                artisan,
                Decision {
                    action,
                    admin,
                    reason: reason.as_deref(),
                    admin_notes,
                },
            )
            .await?;

        if written == 0 {
            return Err(ArtisansServiceError::InvalidTransition {
                from: current.status,
                action,
            });
        }

        let (role, is_active) = next.mirrored_user_state();

        self.users
            .set_lifecycle_state(tx, current.user_uuid, role, is_active, Some(artisan))
            .await?;

        if action == ArtisanAction::Suspend {
            let revoked = self
                .sessions
                .revoke_user_sessions(tx, current.user_uuid, None)
                .await?;

            info!(%artisan, revoked, "revoked sessions of suspended artisan");
        }

        self.notifications
            .create_notification(tx, &decision_notification(&current, action, reason.as_deref()))
            .await?;

        info!(%artisan, %admin, from = %current.status, to = %next, "artisan decision applied");

        Ok(self.repository.get_artisan(tx, artisan).await?)
    }

    async fn decide_once(
        &self,
        admin: UserUuid,
        artisan: ArtisanUuid,
        action: ArtisanAction,
        reason: Option<&str>,
        admin_notes: Option<&str>,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        let mut tx = self.db.begin().await?;

        let decided = self
            .decide(&mut tx, admin, artisan, action, reason, admin_notes)
            .await?;

        tx.commit().await?;

        Ok(decided.masked())
    }

    /// Run a decision per artisan, each in its own transaction.
    async fn bulk_decide(
        &self,
        admin: UserUuid,
        artisans: Vec<ArtisanUuid>,
        action: ArtisanAction,
        reason: Option<&str>,
    ) -> Result<BulkDecisionOutcome, ArtisansServiceError> {
        if action.requires_reason() && optional_text(reason).is_none() {
            return Err(ArtisansServiceError::ReasonRequired(action));
        }

        let mut outcome = BulkDecisionOutcome::default();
        let mut seen = HashSet::with_capacity(artisans.len());

        for artisan in artisans {
            if !seen.insert(artisan) {
                continue;
            }

            match self.decide_once(admin, artisan, action, reason, None).await {
                Ok(_) => outcome.applied.push(artisan),
                Err(
                    ArtisansServiceError::AlreadyApproved | ArtisansServiceError::AlreadyRejected,
                ) => outcome.unchanged.push(artisan),
                Err(error) => {
                    warn!(%artisan, %action, error = %error, "bulk artisan decision failed");

                    outcome.failed.push(BulkFailure::new(artisan, &error));
                }
            }
        }

        Ok(outcome)
    }

    async fn own_artisan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: Actor,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        let artisan = actor
            .acting_artisan()
            .ok_or(ArtisansServiceError::NotFound)?;

        Ok(self.repository.get_artisan(tx, artisan).await?)
    }
}

fn decision_notification(
    artisan: &ArtisanRecord,
    action: ArtisanAction,
    reason: Option<&str>,
) -> NewNotification {
    let reason = reason.unwrap_or("No reason given");

    let (kind, title, message) = match action {
        ArtisanAction::Approve => (
            NotificationKind::ArtisanApproved,
            "Your artisan application was approved".to_string(),
            format!(
                "{} can now list products on Tantika.",
                artisan.business_name
            ),
        ),
        ArtisanAction::Reject => (
            NotificationKind::ArtisanRejected,
            "Your artisan application was not approved".to_string(),
            format!("Reason: {reason}"),
        ),
        ArtisanAction::Suspend => (
            NotificationKind::ArtisanSuspended,
            "Your artisan account was suspended".to_string(),
            format!("Reason: {reason}"),
        ),
        ArtisanAction::Reactivate => (
            NotificationKind::ArtisanReactivated,
            "Your artisan account was reactivated".to_string(),
            format!("{} is visible to customers again.", artisan.business_name),
        ),
    };

    // Addressed to the owning account so it stays visible whatever role the decision leaves.
    NewNotification::new(Recipient::User(artisan.user_uuid), kind, title, message)
        .with_link("/artisan/profile")
}

#[async_trait]
impl ArtisansService for PgArtisansService {
    async fn list_artisans(
        &self,
        filter: ArtisanFilter,
        page: Page,
    ) -> Result<Paginated<ArtisanRecord>, ArtisansServiceError> {
        let mut tx = self.db.begin().await?;

        let (artisans, total) = self
            .repository
            .list_artisans(&mut tx, &filter, page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(artisans, total, page).map(ArtisanRecord::masked))
    }

    async fn get_artisan(
        &self,
        artisan: ArtisanUuid,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        let mut tx = self.db.begin().await?;

        let artisan = self.repository.get_artisan(&mut tx, artisan).await?;

        tx.commit().await?;

        Ok(artisan.masked())
    }

    async fn artisan_stats(&self) -> Result<ArtisanStats, ArtisansServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.artisan_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }

    async fn approve(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
        admin_notes: Option<String>,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        let notes = optional_text(admin_notes.as_deref());

        self.decide_once(
            admin.user,
            artisan,
            ArtisanAction::Approve,
            None,
            notes.as_deref(),
        )
        .await
    }

    async fn reject(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
        reason: String,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        self.decide_once(admin.user, artisan, ArtisanAction::Reject, Some(&reason), None)
            .await
    }

    async fn suspend(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
        reason: String,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        self.decide_once(admin.user, artisan, ArtisanAction::Suspend, Some(&reason), None)
            .await
    }

    async fn reactivate(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        self.decide_once(admin.user, artisan, ArtisanAction::Reactivate, None, None)
            .await
    }

    async fn bulk_approve(
        &self,
        admin: Actor,
        artisans: Vec<ArtisanUuid>,
    ) -> Result<BulkDecisionOutcome, ArtisansServiceError> {
        self.bulk_decide(admin.user, artisans, ArtisanAction::Approve, None)
            .await
    }

    async fn bulk_reject(
        &self,
        admin: Actor,
        artisans: Vec<ArtisanUuid>,
        reason: String,
    ) -> Result<BulkDecisionOutcome, ArtisansServiceError> {
        self.bulk_decide(admin.user, artisans, ArtisanAction::Reject, Some(&reason))
            .await
    }

    async fn update_artisan(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
        update: ArtisanUpdate,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        let profile = update.profile.validated()?;
        let notes = optional_text(update.admin_notes.as_deref());

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_artisan(&mut tx, artisan).await?;

        self.repository
            .update_profile(&mut tx, artisan, &profile, notes.as_deref())
            .await?;

        if let Some(target) = update.status
            && target != current.status
        {
            let action = current.status.action_towards(target)?;

            self.decide(
                &mut tx,
                admin.user,
                artisan,
                action,
                update.reason.as_deref(),
                None,
            )
            .await?;
        }

        let updated = self.repository.get_artisan(&mut tx, artisan).await?;

        tx.commit().await?;

        Ok(updated.masked())
    }

    async fn verify_bank_details(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_artisan(&mut tx, artisan).await?;

        if !current.bank_details.is_complete() {
            return Err(ArtisansServiceError::BankDetailsIncomplete);
        }

        self.repository
            .verify_bank_details(&mut tx, artisan, admin.user)
            .await?;

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification::new(
                    Recipient::Artisan(artisan),
                    NotificationKind::BankDetailsVerified,
                    "Bank details verified",
                    "Your bank details were verified. You can now request payouts.",
                )
                .with_link("/artisan/bank-details"),
            )
            .await?;

        let verified = self.repository.get_artisan(&mut tx, artisan).await?;

        tx.commit().await?;

        info!(%artisan, admin = %admin.user, "bank details verified");

        Ok(verified.masked())
    }

    async fn get_profile(&self, actor: Actor) -> Result<ArtisanRecord, ArtisansServiceError> {
        let mut tx = self.db.begin().await?;

        let artisan = self.own_artisan(&mut tx, actor).await?;

        tx.commit().await?;

        Ok(artisan.masked())
    }

    async fn update_profile(
        &self,
        actor: Actor,
        update: ArtisanProfileUpdate,
    ) -> Result<ArtisanRecord, ArtisansServiceError> {
        let update = update.validated()?;

        let mut tx = self.db.begin().await?;

        let artisan = self.own_artisan(&mut tx, actor).await?;

        self.repository
            .update_profile(&mut tx, artisan.uuid, &update, None)
            .await?;

        let updated = self.repository.get_artisan(&mut tx, artisan.uuid).await?;

        tx.commit().await?;

        Ok(updated.masked())
    }

    async fn get_bank_details(&self, actor: Actor) -> Result<BankDetails, ArtisansServiceError> {
        let mut tx = self.db.begin().await?;

        let artisan = self.own_artisan(&mut tx, actor).await?;

        tx.commit().await?;

        Ok(artisan.bank_details.masked())
    }

    async fn update_bank_details(
        &self,
        actor: Actor,
        details: BankDetailsUpdate,
    ) -> Result<BankDetails, ArtisansServiceError> {
        let details = details.validated()?;

        let mut tx = self.db.begin().await?;

        let artisan = self.own_artisan(&mut tx, actor).await?;

        self.repository
            .update_bank_details(&mut tx, artisan.uuid, &details)
            .await?;

        let updated = self.repository.get_artisan(&mut tx, artisan.uuid).await?;

        tx.commit().await?;

        info!(artisan = %artisan.uuid, "bank details updated, awaiting verification");

        Ok(updated.bank_details.masked())
    }
}

#[automock]
#[async_trait]
pub trait ArtisansService: Send + Sync {
    /// Artisans matching the filter, newest first.
    async fn list_artisans(
        &self,
        filter: ArtisanFilter,
        page: Page,
    ) -> Result<Paginated<ArtisanRecord>, ArtisansServiceError>;

    async fn get_artisan(&self, artisan: ArtisanUuid)
    -> Result<ArtisanRecord, ArtisansServiceError>;

    /// Counts by review status.
    async fn artisan_stats(&self) -> Result<ArtisanStats, ArtisansServiceError>;

    /// Approves a pending artisan and promotes its owner to the artisan role.
    async fn approve(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
        admin_notes: Option<String>,
    ) -> Result<ArtisanRecord, ArtisansServiceError>;

    /// Rejects a pending artisan. The reason is mandatory.
    async fn reject(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
        reason: String,
    ) -> Result<ArtisanRecord, ArtisansServiceError>;

    /// Suspends an approved artisan, deactivating its owner and revoking their sessions.
    async fn suspend(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
        reason: String,
    ) -> Result<ArtisanRecord, ArtisansServiceError>;

    async fn reactivate(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
    ) -> Result<ArtisanRecord, ArtisansServiceError>;

    async fn bulk_approve(
        &self,
        admin: Actor,
        artisans: Vec<ArtisanUuid>,
    ) -> Result<BulkDecisionOutcome, ArtisansServiceError>;

    async fn bulk_reject(
        &self,
        admin: Actor,
        artisans: Vec<ArtisanUuid>,
        reason: String,
    ) -> Result<BulkDecisionOutcome, ArtisansServiceError>;

    /// Edits profile fields and optionally moves the status through the review lifecycle.
    async fn update_artisan(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
        update: ArtisanUpdate,
    ) -> Result<ArtisanRecord, ArtisansServiceError>;

    async fn verify_bank_details(
        &self,
        admin: Actor,
        artisan: ArtisanUuid,
    ) -> Result<ArtisanRecord, ArtisansServiceError>;

    /// The caller's own artisan profile.
    async fn get_profile(&self, actor: Actor) -> Result<ArtisanRecord, ArtisansServiceError>;

    async fn update_profile(
        &self,
        actor: Actor,
        update: ArtisanProfileUpdate,
    ) -> Result<ArtisanRecord, ArtisansServiceError>;

    async fn get_bank_details(&self, actor: Actor) -> Result<BankDetails, ArtisansServiceError>;

    /// Replaces bank details; verification must be repeated.
    async fn update_bank_details(
        &self,
        actor: Actor,
        details: BankDetailsUpdate,
    ) -> Result<BankDetails, ArtisansServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::AuthService,
        domain::{
            artisans::records::ArtisanStatus,
            notifications::NotificationsService,
            users::{UsersService, records::UserRole},
        },
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn approve_promotes_owner_to_artisan() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let applicant = helpers::apply_as_artisan(&ctx, "weaver@example.com").await?;
        let artisan = applicant.artisan.ok_or("applicant has no artisan")?;

        let approved = ctx
            .artisans
            .approve(admin, artisan, Some("documents checked".to_string()))
            .await?;

        assert_eq!(approved.status, ArtisanStatus::Approved);
        assert_eq!(approved.approved_by, Some(admin.user));
        assert!(approved.identity_proof.verified);
        assert_eq!(approved.admin_notes.as_deref(), Some("documents checked"));

        let owner = ctx.users.get_user(applicant.user).await?;

        assert_eq!(owner.role, UserRole::Artisan);
        assert!(owner.is_active);
        assert_eq!(owner.artisan_uuid, Some(artisan));

        Ok(())
    }

    #[tokio::test]
    async fn approving_twice_reports_already_approved() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let applicant = helpers::apply_as_artisan(&ctx, "weaver@example.com").await?;
        let artisan = applicant.artisan.ok_or("applicant has no artisan")?;

        let first = ctx.artisans.approve(admin, artisan, None).await?;
        let second = ctx.artisans.approve(admin, artisan, None).await;

        assert!(
            matches!(second, Err(ArtisansServiceError::AlreadyApproved)),
            "expected AlreadyApproved, got {second:?}"
        );

        let unchanged = ctx.artisans.get_artisan(artisan).await?;

        assert_eq!(unchanged.approved_at, first.approved_at);
        assert_eq!(unchanged.updated_at, first.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn reject_requires_a_reason() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let applicant = helpers::apply_as_artisan(&ctx, "weaver@example.com").await?;
        let artisan = applicant.artisan.ok_or("applicant has no artisan")?;

        let result = ctx.artisans.reject(admin, artisan, "   ".to_string()).await;

        assert!(matches!(
            result,
            Err(ArtisansServiceError::ReasonRequired(ArtisanAction::Reject))
        ));

        let rejected = ctx
            .artisans
            .reject(admin, artisan, "Identity proof is unreadable".to_string())
            .await?;

        assert_eq!(rejected.status, ArtisanStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Identity proof is unreadable")
        );
        assert_eq!(ctx.users.get_user(applicant.user).await?.role, UserRole::User);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_artisans_can_be_approved_and_approved_ones_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let applicant = helpers::apply_as_artisan(&ctx, "weaver@example.com").await?;
        let artisan = applicant.artisan.ok_or("applicant has no artisan")?;

        ctx.artisans
            .reject(admin, artisan, "Blurry identity proof".to_string())
            .await?;

        let approved = ctx.artisans.approve(admin, artisan, None).await?;

        assert_eq!(approved.status, ArtisanStatus::Approved);
        assert!(approved.rejection_reason.is_none());
        assert_eq!(
            ctx.users.get_user(applicant.user).await?.role,
            UserRole::Artisan
        );

        let rejected = ctx
            .artisans
            .reject(admin, artisan, "Listings violate policy".to_string())
            .await?;

        assert_eq!(rejected.status, ArtisanStatus::Rejected);
        assert_eq!(ctx.users.get_user(applicant.user).await?.role, UserRole::User);

        Ok(())
    }

    #[tokio::test]
    async fn suspended_artisans_can_be_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let actor = helpers::approved_artisan(&ctx, admin, "weaver@example.com").await?;
        let artisan = actor.artisan.ok_or("artisan actor has no artisan")?;

        ctx.artisans
            .suspend(admin, artisan, "Counterfeit listings".to_string())
            .await?;

        let rejected = ctx
            .artisans
            .reject(admin, artisan, "Counterfeit listings confirmed".to_string())
            .await?;

        assert_eq!(rejected.status, ArtisanStatus::Rejected);

        let owner = ctx.users.get_user(actor.user).await?;

        assert_eq!(owner.role, UserRole::User);
        assert!(owner.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn failed_owner_update_rolls_back_the_decision() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let applicant = helpers::apply_as_artisan(&ctx, "weaver@example.com").await?;
        let artisan = applicant.artisan.ok_or("applicant has no artisan")?;
        let before = ctx.artisans.get_artisan(artisan).await?;
        let notices_before = ctx.notifications.unread_count(applicant).await?;

        // Any role write on users now fails, after the artisan row is updated.
        sqlx::raw_sql(
            "CREATE FUNCTION refuse_role_change() RETURNS trigger AS $$
             BEGIN
                 RAISE EXCEPTION 'role changes are disabled';
             END
             $$ LANGUAGE plpgsql;

             CREATE TRIGGER refuse_role_change
             BEFORE UPDATE OF role ON users
             FOR EACH ROW EXECUTE FUNCTION refuse_role_change();",
        )
        .execute(ctx.db.pool())
        .await?;

        let result = ctx.artisans.approve(admin, artisan, None).await;

        assert!(
            matches!(result, Err(ArtisansServiceError::Sql(_))),
            "expected a storage error, got {result:?}"
        );

        let after = ctx.artisans.get_artisan(artisan).await?;

        assert_eq!(after.status, ArtisanStatus::Pending);
        assert_eq!(after.updated_at, before.updated_at);
        assert!(after.approved_at.is_none());

        let owner = ctx.users.get_user(applicant.user).await?;

        assert_eq!(owner.role, UserRole::PendingArtisan);
        assert!(owner.is_active);
        assert_eq!(
            ctx.notifications.unread_count(applicant).await?,
            notices_before
        );

        Ok(())
    }

    #[tokio::test]
    async fn suspend_deactivates_owner_and_revokes_sessions() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let (artisan_actor, token) =
            helpers::approved_artisan_with_token(&ctx, admin, "weaver@example.com").await?;
        let artisan = artisan_actor.artisan.ok_or("artisan actor has no artisan")?;

        let suspended = ctx
            .artisans
            .suspend(admin, artisan, "Counterfeit listings".to_string())
            .await?;

        assert_eq!(suspended.status, ArtisanStatus::Suspended);

        let owner = ctx.users.get_user(artisan_actor.user).await?;

        assert_eq!(owner.role, UserRole::Artisan);
        assert!(!owner.is_active);
        assert!(ctx.auth.authenticate(&token).await.is_err());

        let reactivated = ctx.artisans.reactivate(admin, artisan).await?;

        assert_eq!(reactivated.status, ArtisanStatus::Approved);
        assert!(reactivated.suspension_reason.is_none());
        assert!(ctx.users.get_user(artisan_actor.user).await?.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn bulk_approve_reports_each_artisan() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let first = helpers::apply_as_artisan(&ctx, "weaver@example.com").await?;
        let second = helpers::apply_as_artisan(&ctx, "potter@example.com").await?;
        let first = first.artisan.ok_or("missing artisan")?;
        let second = second.artisan.ok_or("missing artisan")?;
        let missing = ArtisanUuid::new();

        ctx.artisans.approve(admin, second, None).await?;

        let outcome = ctx
            .artisans
            .bulk_approve(admin, vec![first, second, missing, first])
            .await?;

        assert_eq!(outcome.applied, vec![first]);
        assert_eq!(outcome.unchanged, vec![second]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].uuid, missing);

        Ok(())
    }

    #[tokio::test]
    async fn update_artisan_moves_status_through_lifecycle() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let applicant = helpers::apply_as_artisan(&ctx, "weaver@example.com").await?;
        let artisan = applicant.artisan.ok_or("applicant has no artisan")?;

        let updated = ctx
            .artisans
            .update_artisan(
                admin,
                artisan,
                ArtisanUpdate {
                    profile: ArtisanProfileUpdate {
                        city: Some("Varanasi".to_string()),
                        ..ArtisanProfileUpdate::default()
                    },
                    status: Some(ArtisanStatus::Approved),
                    ..ArtisanUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.status, ArtisanStatus::Approved);
        assert_eq!(updated.city.as_deref(), Some("Varanasi"));
        assert_eq!(
            ctx.users.get_user(applicant.user).await?.role,
            UserRole::Artisan
        );

        let back = ctx
            .artisans
            .update_artisan(
                admin,
                artisan,
                ArtisanUpdate {
                    status: Some(ArtisanStatus::Pending),
                    ..ArtisanUpdate::default()
                },
            )
            .await;

        assert!(matches!(back, Err(ArtisansServiceError::BackToPending)));

        Ok(())
    }

    #[tokio::test]
    async fn bank_details_are_masked_and_need_reverification() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan_actor = helpers::approved_artisan(&ctx, admin, "weaver@example.com").await?;
        let artisan = artisan_actor.artisan.ok_or("missing artisan")?;

        let incomplete = ctx.artisans.verify_bank_details(admin, artisan).await;

        assert!(matches!(
            incomplete,
            Err(ArtisansServiceError::BankDetailsIncomplete)
        ));

        let details = ctx
            .artisans
            .update_bank_details(artisan_actor, helpers::bank_details())
            .await?;

        assert_eq!(details.account_number.as_deref(), Some("XXXXXXXX9012"));
        assert!(!details.verified);

        let verified = ctx.artisans.verify_bank_details(admin, artisan).await?;

        assert!(verified.bank_details.verified);

        let replaced = ctx
            .artisans
            .update_bank_details(artisan_actor, helpers::bank_details())
            .await?;

        assert!(!replaced.verified);

        Ok(())
    }
}
