//! Notification Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::Actor,
    domain::{
        UnknownVariant,
        artisans::records::ArtisanUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

/// Notifications live this long before the purge task removes them.
pub const NOTIFICATION_TTL_DAYS: i32 = 30;

/// Who a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    User(UserUuid),
    Artisan(ArtisanUuid),

    /// Visible to every admin.
    Admins,
}

impl Recipient {
    #[must_use]
    pub const fn type_as_str(self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Artisan(_) => "artisan",
            Self::Admins => "admin",
        }
    }

    #[must_use]
    pub fn uuid(self) -> Option<Uuid> {
        match self {
            Self::User(user) => Some(user.into_uuid()),
            Self::Artisan(artisan) => Some(artisan.into_uuid()),
            Self::Admins => None,
        }
    }

    pub(crate) fn from_parts(kind: &str, uuid: Option<Uuid>) -> Result<Self, UnknownVariant> {
        match (kind, uuid) {
            ("user", Some(uuid)) => Ok(Self::User(UserUuid::from_uuid(uuid))),
            ("artisan", Some(uuid)) => Ok(Self::Artisan(ArtisanUuid::from_uuid(uuid))),
            ("admin", None) => Ok(Self::Admins),
            (other, _) => Err(UnknownVariant::new("recipient", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    ArtisanApplication,
    ArtisanApproved,
    ArtisanRejected,
    ArtisanSuspended,
    ArtisanReactivated,
    BankDetailsVerified,
    ProductReviewed,
    NewOrder,
    OrderStatusChanged,
    OrderCancelled,
    PaymentStatusChanged,
    PayoutRequested,
    PayoutStatusChanged,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArtisanApplication => "artisan_application",
            Self::ArtisanApproved => "artisan_approved",
            Self::ArtisanRejected => "artisan_rejected",
            Self::ArtisanSuspended => "artisan_suspended",
            Self::ArtisanReactivated => "artisan_reactivated",
            Self::BankDetailsVerified => "bank_details_verified",
            Self::ProductReviewed => "product_reviewed",
            Self::NewOrder => "new_order",
            Self::OrderStatusChanged => "order_status_changed",
            Self::OrderCancelled => "order_cancelled",
            Self::PaymentStatusChanged => "payment_status_changed",
            Self::PayoutRequested => "payout_requested",
            Self::PayoutStatusChanged => "payout_status_changed",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "artisan_application" => Self::ArtisanApplication,
            "artisan_approved" => Self::ArtisanApproved,
            "artisan_rejected" => Self::ArtisanRejected,
            "artisan_suspended" => Self::ArtisanSuspended,
            "artisan_reactivated" => Self::ArtisanReactivated,
            "bank_details_verified" => Self::BankDetailsVerified,
            "product_reviewed" => Self::ProductReviewed,
            "new_order" => Self::NewOrder,
            "order_status_changed" => Self::OrderStatusChanged,
            "order_cancelled" => Self::OrderCancelled,
            "payment_status_changed" => Self::PaymentStatusChanged,
            "payout_requested" => Self::PayoutRequested,
            "payout_status_changed" => Self::PayoutStatusChanged,
            other => return Err(UnknownVariant::new("notification kind", other)),
        })
    }
}

/// Notification Record
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub recipient: Recipient,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// The set of recipients whose notifications a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Audience {
    pub user: UserUuid,
    pub artisan: Option<ArtisanUuid>,
    pub admin: bool,
}

impl From<Actor> for Audience {
    fn from(actor: Actor) -> Self {
        Self {
            user: actor.user,
            artisan: actor.acting_artisan(),
            admin: actor.is_admin(),
        }
    }
}

impl Audience {
    #[must_use]
    pub fn can_see(&self, recipient: Recipient) -> bool {
        match recipient {
            Recipient::User(user) => user == self.user,
            Recipient::Artisan(artisan) => self.artisan == Some(artisan),
            Recipient::Admins => self.admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{auth::SessionUuid, domain::users::records::UserRole};

    use super::*;

    #[test]
    fn admin_notifications_have_no_recipient_uuid() {
        assert_eq!(Recipient::Admins.uuid(), None);
        assert_eq!(Recipient::from_parts("admin", None), Ok(Recipient::Admins));
        assert!(Recipient::from_parts("admin", Some(Uuid::nil())).is_err());
    }

    #[test]
    fn artisans_see_their_artisan_and_user_notifications() {
        let artisan = ArtisanUuid::new();
        let audience = Audience::from(Actor {
            user: UserUuid::new(),
            role: UserRole::Artisan,
            artisan: Some(artisan),
            session: SessionUuid::new(),
        });

        assert!(audience.can_see(Recipient::Artisan(artisan)));
        assert!(audience.can_see(Recipient::User(audience.user)));
        assert!(!audience.can_see(Recipient::Admins));
        assert!(!audience.can_see(Recipient::Artisan(ArtisanUuid::new())));
    }

    #[test]
    fn customers_do_not_see_admin_notifications() {
        let audience = Audience {
            user: UserUuid::new(),
            artisan: None,
            admin: false,
        };

        assert!(!audience.can_see(Recipient::Admins));
    }

    #[test]
    fn kinds_parse_from_storage_names() {
        assert_eq!(
            "payout_requested".parse::<NotificationKind>(),
            Ok(NotificationKind::PayoutRequested)
        );
        assert!("weekly_digest".parse::<NotificationKind>().is_err());
    }
}
