//! Payouts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::Actor,
    database::Db,
    domain::{
        artisans::{
            records::{ArtisanStatus, ArtisanUuid},
            repository::PgArtisansRepository,
        },
        notifications::{
            data::NewNotification,
            records::{NotificationKind, Recipient},
            repository::PgNotificationsRepository,
        },
        orders::pricing::format_rupees,
        payouts::{
            data::{PayoutFilter, PayoutStatusUpdate},
            errors::PayoutsServiceError,
            fees::{DEFAULT_MIN_PAYOUT, PayoutFees},
            records::{PayoutRecord, PayoutStatus, PayoutUuid},
            repository::{BankSnapshot, PgPayoutsRepository},
        },
    },
    pagination::{Page, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgPayoutsService {
    db: Db,
    repository: PgPayoutsRepository,
    artisans: PgArtisansRepository,
    notifications: PgNotificationsRepository,

    /// Smallest amount an artisan may request, in paise.
    min_payout: u64,
}

impl PgPayoutsService {
    #[must_use]
    pub fn new(db: Db, min_payout: u64) -> Self {
        Self {
            db,
            repository: PgPayoutsRepository::new(),
            artisans: PgArtisansRepository::new(),
            notifications: PgNotificationsRepository::new(),
            min_payout,
        }
    }

    #[must_use]
    pub fn with_default_minimum(db: Db) -> Self {
        Self::new(db, DEFAULT_MIN_PAYOUT)
    }
}

fn acting_artisan(actor: Actor) -> Result<ArtisanUuid, PayoutsServiceError> {
    actor.acting_artisan().ok_or(PayoutsServiceError::Forbidden)
}

/// Check a requested amount against the configured minimum before touching storage.
fn check_amount(amount: u64, minimum: u64) -> Result<(), PayoutsServiceError> {
    if amount == 0 {
        return Err(PayoutsServiceError::InvalidInput(
            "amount must be greater than zero",
        ));
    }

    if amount < minimum {
        return Err(PayoutsServiceError::BelowMinimum { minimum });
    }

    Ok(())
}

fn artisan_not_found(error: sqlx::Error) -> PayoutsServiceError {
    match error {
        sqlx::Error::RowNotFound => PayoutsServiceError::ArtisanNotFound,
        error => error.into(),
    }
}

#[async_trait]
impl PayoutsService for PgPayoutsService {
    async fn available_balance(&self, actor: Actor) -> Result<u64, PayoutsServiceError> {
        let artisan = acting_artisan(actor)?;

        let mut tx = self.db.begin().await?;

        let balance = self.repository.available_balance(&mut tx, artisan).await?;

        tx.commit().await?;

        Ok(balance)
    }

    async fn request_payout(
        &self,
        actor: Actor,
        amount: u64,
    ) -> Result<PayoutRecord, PayoutsServiceError> {
        let artisan = acting_artisan(actor)?;

        check_amount(amount, self.min_payout)?;

        let mut tx = self.db.begin().await?;

        // Serialises requests per artisan; the claim below is conditional as well.
        let record = self
            .artisans
            .lock_artisan(&mut tx, artisan)
            .await
            .map_err(artisan_not_found)?;

        if record.status != ArtisanStatus::Approved {
            return Err(PayoutsServiceError::NotApproved);
        }

        let bank = &record.bank_details;

        let snapshot = match (bank.verified, bank.account_last4(), bank.ifsc.clone()) {
            (true, Some(account_last4), Some(ifsc)) if bank.is_complete() => BankSnapshot {
                account_last4,
                ifsc,
            },
            _ => return Err(PayoutsServiceError::BankDetailsUnverified),
        };

        let available = self.repository.available_balance(&mut tx, artisan).await?;

        if amount > available {
            return Err(PayoutsServiceError::InsufficientBalance { available });
        }

        let fees = PayoutFees::for_amount(amount)
            .ok_or(PayoutsServiceError::InvalidInput("amount is too large"))?;

        let uuid = PayoutUuid::new();

        self.repository
            .create_payout(&mut tx, uuid, artisan, amount, fees, &snapshot)
            .await?;

        let claimed = self
            .repository
            .claim_lines(&mut tx, artisan, uuid, amount)
            .await?;

        // Lines are paid whole, so only amounts made of whole lines settle.
        if claimed != amount {
            debug!(%artisan, amount, claimed, "requested amount does not match whole lines");

            return Err(PayoutsServiceError::AmountNotClaimable { claimable: claimed });
        }

        self.notifications
            .create_notifications(
                &mut tx,
                &[
                    NewNotification::new(
                        Recipient::Admins,
                        NotificationKind::PayoutRequested,
                        "Payout requested",
                        format!(
                            "{} requested a payout of {}.",
                            record.business_name,
                            format_rupees(amount)
                        ),
                    )
                    .with_link(format!("/admin/payouts/{uuid}")),
                    NewNotification::new(
                        Recipient::Artisan(artisan),
                        NotificationKind::PayoutRequested,
                        "Payout request received",
                        format!(
                            "Your payout of {} ({} after fees) is pending.",
                            format_rupees(amount),
                            format_rupees(fees.net_amount)
                        ),
                    )
                    .with_link("/artisan/payouts"),
                ],
            )
            .await?;

        let payout = self.repository.get_payout(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(
            payout = %uuid,
            %artisan,
            amount,
            lines = payout.order_lines,
            "payout requested"
        );

        Ok(payout)
    }

    async fn cancel_payout(
        &self,
        actor: Actor,
        payout: PayoutUuid,
    ) -> Result<PayoutRecord, PayoutsServiceError> {
        let artisan = acting_artisan(actor)?;

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_payout(&mut tx, payout).await?;

        if current.artisan_uuid != artisan {
            return Err(PayoutsServiceError::Forbidden);
        }

        current.status.can_move_to(PayoutStatus::Cancelled)?;

        let update = PayoutStatusUpdate {
            status: PayoutStatus::Cancelled,
            transaction_reference: None,
            failure_reason: None,
        };

        if self
            .repository
            .update_status(&mut tx, payout, current.status, &update, None)
            .await?
            == 0
        {
            return Err(PayoutsServiceError::NotFound);
        }

        let released = self.repository.release_lines(&mut tx, payout).await?;

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification::new(
                    Recipient::Admins,
                    NotificationKind::PayoutStatusChanged,
                    "Payout cancelled",
                    format!(
                        "{} cancelled a payout of {}.",
                        current.artisan_name,
                        format_rupees(current.amount)
                    ),
                )
                .with_link(format!("/admin/payouts/{payout}")),
            )
            .await?;

        let cancelled = self.repository.get_payout(&mut tx, payout).await?;

        tx.commit().await?;

        info!(%payout, %artisan, released, "payout cancelled");

        Ok(cancelled)
    }

    async fn update_payout_status(
        &self,
        admin: Actor,
        payout: PayoutUuid,
        update: PayoutStatusUpdate,
    ) -> Result<PayoutRecord, PayoutsServiceError> {
        let update = update.validated()?;

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_payout(&mut tx, payout).await?;

        current.status.can_move_to(update.status)?;

        if self
            .repository
            .update_status(&mut tx, payout, current.status, &update, Some(admin.user))
            .await?
            == 0
        {
            return Err(PayoutsServiceError::NotFound);
        }

        let released = if update.status.releases_lines() {
            self.repository.release_lines(&mut tx, payout).await?
        } else {
            0
        };

        let message = match update.failure_reason.as_deref() {
            Some(reason) => format!(
                "Your payout of {} failed. Reason: {reason}",
                format_rupees(current.amount)
            ),
            None => format!(
                "Your payout of {} is now {}.",
                format_rupees(current.amount),
                update.status
            ),
        };

        self.notifications
            .create_notification(
                &mut tx,
                &NewNotification::new(
                    Recipient::Artisan(current.artisan_uuid),
                    NotificationKind::PayoutStatusChanged,
                    format!("Payout {}", update.status),
                    message,
                )
                .with_link("/artisan/payouts"),
            )
            .await?;

        let updated = self.repository.get_payout(&mut tx, payout).await?;

        tx.commit().await?;

        info!(
            %payout,
            admin = %admin.user,
            from = %current.status,
            to = %updated.status,
            released,
            "payout status updated"
        );

        Ok(updated)
    }

    async fn list_payouts(
        &self,
        actor: Actor,
        page: Page,
    ) -> Result<Paginated<PayoutRecord>, PayoutsServiceError> {
        let artisan = acting_artisan(actor)?;

        let mut tx = self.db.begin().await?;

        let (payouts, total) = self
            .repository
            .list_payouts(&mut tx, Some(artisan), None, page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(payouts, total, page))
    }

    async fn list_all_payouts(
        &self,
        filter: PayoutFilter,
        page: Page,
    ) -> Result<Paginated<PayoutRecord>, PayoutsServiceError> {
        let mut tx = self.db.begin().await?;

        let (payouts, total) = self
            .repository
            .list_payouts(&mut tx, None, filter.status, page)
            .await?;

        tx.commit().await?;

        Ok(Paginated::new(payouts, total, page))
    }
}

#[automock]
#[async_trait]
pub trait PayoutsService: Send + Sync {
    /// Delivered and paid order value the artisan has not been paid out yet.
    async fn available_balance(&self, actor: Actor) -> Result<u64, PayoutsServiceError>;

    /// Request a payout, claiming order lines oldest-first until they cover `amount`.
    ///
    /// Payouts settle whole lines, so the settled amount may exceed the request.
    async fn request_payout(
        &self,
        actor: Actor,
        amount: u64,
    ) -> Result<PayoutRecord, PayoutsServiceError>;

    /// Withdraw a pending payout and return its lines to the balance.
    async fn cancel_payout(
        &self,
        actor: Actor,
        payout: PayoutUuid,
    ) -> Result<PayoutRecord, PayoutsServiceError>;

    async fn update_payout_status(
        &self,
        admin: Actor,
        payout: PayoutUuid,
        update: PayoutStatusUpdate,
    ) -> Result<PayoutRecord, PayoutsServiceError>;

    async fn list_payouts(
        &self,
        actor: Actor,
        page: Page,
    ) -> Result<Paginated<PayoutRecord>, PayoutsServiceError>;

    async fn list_all_payouts(
        &self,
        filter: PayoutFilter,
        page: Page,
    ) -> Result<Paginated<PayoutRecord>, PayoutsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::SessionUuid,
        domain::{
            artisans::ArtisansService,
            orders::OrdersService,
            users::records::{UserRole, UserUuid},
        },
        test::{TestContext, helpers},
    };

    use super::*;

    #[test]
    fn amounts_below_minimum_are_rejected() {
        assert!(matches!(
            check_amount(0, DEFAULT_MIN_PAYOUT),
            Err(PayoutsServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            check_amount(49_999, DEFAULT_MIN_PAYOUT),
            Err(PayoutsServiceError::BelowMinimum { minimum: 50_000 })
        ));
        assert!(check_amount(50_000, DEFAULT_MIN_PAYOUT).is_ok());
    }

    #[test]
    fn customers_have_no_payouts() {
        let customer = Actor {
            user: UserUuid::new(),
            role: UserRole::User,
            artisan: None,
            session: SessionUuid::new(),
        };

        assert!(matches!(
            acting_artisan(customer),
            Err(PayoutsServiceError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn balance_counts_only_delivered_paid_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::verified_artisan(&ctx, admin, "weaver@example.com").await?;
        let product = helpers::create_product(&ctx, artisan, "Ikat stole", 60_000, 10).await?;

        helpers::settled_order(&ctx, admin, product.uuid, 1).await?;
        helpers::place_order(&ctx, None, product.uuid, 1).await?;

        assert_eq!(ctx.payouts.available_balance(artisan).await?, 60_000);

        Ok(())
    }

    #[tokio::test]
    async fn request_claims_whole_lines_and_derives_fees() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::verified_artisan(&ctx, admin, "weaver@example.com").await?;
        let product = helpers::create_product(&ctx, artisan, "Ikat stole", 60_000, 10).await?;

        helpers::settled_order(&ctx, admin, product.uuid, 1).await?;
        helpers::settled_order(&ctx, admin, product.uuid, 1).await?;

        let payout = ctx.payouts.request_payout(artisan, 60_000).await?;

        assert_eq!(payout.status, PayoutStatus::Pending);
        assert_eq!(payout.requested_amount, 60_000);
        assert_eq!(payout.amount, 60_000);
        assert_eq!(payout.order_lines, 1);
        assert_eq!(payout.fees.processing_fee, 1_200);
        assert_eq!(payout.fees.gst, 216);
        assert_eq!(payout.fees.net_amount, 58_584);
        assert_eq!(payout.bank_account_last4, "9012");

        assert_eq!(ctx.payouts.available_balance(artisan).await?, 60_000);

        Ok(())
    }

    #[tokio::test]
    async fn payouts_never_exceed_the_requested_amount() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::verified_artisan(&ctx, admin, "weaver@example.com").await?;
        let stole = helpers::create_product(&ctx, artisan, "Ikat stole", 60_000, 10).await?;
        let basket = helpers::create_product(&ctx, artisan, "Sabai basket", 30_000, 10).await?;

        helpers::settled_order(&ctx, admin, stole.uuid, 1).await?;
        helpers::settled_order(&ctx, admin, basket.uuid, 1).await?;
        helpers::settled_order(&ctx, admin, basket.uuid, 1).await?;

        assert!(matches!(
            ctx.payouts.request_payout(artisan, 50_000).await,
            Err(PayoutsServiceError::AmountNotClaimable { claimable: 30_000 })
        ));
        assert_eq!(ctx.payouts.available_balance(artisan).await?, 120_000);
        assert_eq!(
            ctx.payouts.list_payouts(artisan, Page::default()).await?.total,
            0
        );

        let first = ctx.payouts.request_payout(artisan, 60_000).await?;

        assert_eq!(first.amount, 60_000);
        assert_eq!(first.order_lines, 1);

        let second = ctx.payouts.request_payout(artisan, 60_000).await?;

        assert_eq!(second.requested_amount, 60_000);
        assert_eq!(second.amount, 60_000);
        assert_eq!(second.order_lines, 2);
        assert_eq!(ctx.payouts.available_balance(artisan).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn requests_above_balance_or_below_minimum_fail() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::verified_artisan(&ctx, admin, "weaver@example.com").await?;
        let product = helpers::create_product(&ctx, artisan, "Ikat stole", 60_000, 10).await?;

        helpers::settled_order(&ctx, admin, product.uuid, 1).await?;

        assert!(matches!(
            ctx.payouts.request_payout(artisan, 70_000).await,
            Err(PayoutsServiceError::InsufficientBalance { available: 60_000 })
        ));
        assert!(matches!(
            ctx.payouts.request_payout(artisan, 10_000).await,
            Err(PayoutsServiceError::BelowMinimum { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn unverified_bank_details_block_requests() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::approved_artisan(&ctx, admin, "weaver@example.com").await?;

        ctx.artisans
            .update_bank_details(artisan, helpers::bank_details())
            .await?;

        assert!(matches!(
            ctx.payouts.request_payout(artisan, 50_000).await,
            Err(PayoutsServiceError::BankDetailsUnverified)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn suspended_artisans_cannot_request_payouts() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::verified_artisan(&ctx, admin, "weaver@example.com").await?;
        let product = helpers::create_product(&ctx, artisan, "Ikat stole", 60_000, 10).await?;

        helpers::settled_order(&ctx, admin, product.uuid, 1).await?;

        ctx.artisans
            .suspend(
                admin,
                artisan.artisan.ok_or("missing artisan")?,
                "Counterfeit listings".to_string(),
            )
            .await?;

        assert!(matches!(
            ctx.payouts.request_payout(artisan, 60_000).await,
            Err(PayoutsServiceError::NotApproved)
        ));
        assert_eq!(ctx.payouts.available_balance(artisan).await?, 60_000);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_requests_never_share_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::verified_artisan(&ctx, admin, "weaver@example.com").await?;
        let product = helpers::create_product(&ctx, artisan, "Ikat stole", 60_000, 10).await?;

        helpers::settled_order(&ctx, admin, product.uuid, 1).await?;

        let (first, second) = tokio::join!(
            ctx.payouts.request_payout(artisan, 60_000),
            ctx.payouts.request_payout(artisan, 60_000),
        );

        assert_eq!(
            [first.is_ok(), second.is_ok()]
                .iter()
                .filter(|succeeded| **succeeded)
                .count(),
            1
        );
        assert_eq!(ctx.payouts.available_balance(artisan).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn failed_and_cancelled_payouts_release_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::verified_artisan(&ctx, admin, "weaver@example.com").await?;
        let product = helpers::create_product(&ctx, artisan, "Ikat stole", 60_000, 10).await?;

        helpers::settled_order(&ctx, admin, product.uuid, 1).await?;

        let payout = ctx.payouts.request_payout(artisan, 60_000).await?;
        let cancelled = ctx.payouts.cancel_payout(artisan, payout.uuid).await?;

        assert_eq!(cancelled.status, PayoutStatus::Cancelled);
        assert_eq!(cancelled.order_lines, 0);
        assert_eq!(ctx.payouts.available_balance(artisan).await?, 60_000);

        let payout = ctx.payouts.request_payout(artisan, 60_000).await?;

        ctx.payouts
            .update_payout_status(
                admin,
                payout.uuid,
                PayoutStatusUpdate {
                    status: PayoutStatus::Processing,
                    transaction_reference: None,
                    failure_reason: None,
                },
            )
            .await?;

        assert!(matches!(
            ctx.payouts.cancel_payout(artisan, payout.uuid).await,
            Err(PayoutsServiceError::InvalidTransition(_))
        ));

        let failed = ctx
            .payouts
            .update_payout_status(
                admin,
                payout.uuid,
                PayoutStatusUpdate {
                    status: PayoutStatus::Failed,
                    transaction_reference: None,
                    failure_reason: Some("IFSC rejected by bank".to_string()),
                },
            )
            .await?;

        assert_eq!(failed.status, PayoutStatus::Failed);
        assert!(failed.processed_at.is_some());
        assert_eq!(ctx.payouts.available_balance(artisan).await?, 60_000);

        let listed = ctx.payouts.list_payouts(artisan, Page::default()).await?;

        assert_eq!(listed.total, 2);

        let pending = ctx
            .payouts
            .list_all_payouts(
                PayoutFilter {
                    status: Some(PayoutStatus::Pending),
                },
                Page::default(),
            )
            .await?;

        assert_eq!(pending.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn processed_payouts_keep_their_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = helpers::create_admin(&ctx, "ops@tantika.in").await?;
        let artisan = helpers::verified_artisan(&ctx, admin, "weaver@example.com").await?;
        let product = helpers::create_product(&ctx, artisan, "Ikat stole", 60_000, 10).await?;
        let order = helpers::settled_order(&ctx, admin, product.uuid, 1).await?;

        let payout = ctx.payouts.request_payout(artisan, 60_000).await?;

        for status in [PayoutStatus::Processing, PayoutStatus::Processed] {
            ctx.payouts
                .update_payout_status(
                    admin,
                    payout.uuid,
                    PayoutStatusUpdate {
                        status,
                        transaction_reference: Some("UTR000123".to_string()),
                        failure_reason: None,
                    },
                )
                .await?;
        }

        let order = ctx.orders.get_order(admin, order.uuid).await?;

        assert_eq!(order.items[0].payout_uuid, Some(payout.uuid));
        assert_eq!(ctx.payouts.available_balance(artisan).await?, 0);

        Ok(())
    }
}
