//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{
        UnknownVariant,
        artisans::records::ArtisanUuid,
        orders::pricing::OrderTotals,
        payouts::records::PayoutUuid,
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Contacted,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "contacted" => Ok(Self::Contacted),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant::new("order status", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(UnknownVariant::new("payment status", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cod,
    Upi,
    Card,
    NetBanking,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Upi => "upi",
            Self::Card => "card",
            Self::NetBanking => "net_banking",
        }
    }

    /// Cash on delivery waits for the courier; online methods start processing at once.
    #[must_use]
    pub const fn initial_payment_status(self) -> PaymentStatus {
        match self {
            Self::Cod => PaymentStatus::Pending,
            Self::Upi | Self::Card | Self::NetBanking => PaymentStatus::Processing,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cod" => Ok(Self::Cod),
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "net_banking" => Ok(Self::NetBanking),
            other => Err(UnknownVariant::new("payment method", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderNoteKind {
    Admin,
    Contact,
}

impl OrderNoteKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for OrderNoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderNoteKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "contact" => Ok(Self::Contact),
            other => Err(UnknownVariant::new("note kind", other)),
        }
    }
}

/// Customer snapshot taken when the order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCustomer {
    /// Set when the order was placed by a signed-in account.
    pub user_uuid: Option<UserUuid>,

    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// A purchased line with the product as it was at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub artisan_uuid: ArtisanUuid,
    pub product_name: String,
    pub product_image: Option<String>,
    pub unit_price: u64,
    pub quantity: u64,
    pub subtotal: u64,

    /// The payout that settled this line, if any.
    pub payout_uuid: Option<PayoutUuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub changed_by: Option<UserUuid>,
    pub reason: Option<String>,
    pub changed_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNote {
    pub kind: OrderNoteKind,
    pub author_uuid: UserUuid,
    pub body: String,
    pub created_at: Timestamp,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub customer: OrderCustomer,
    pub shipping: ShippingAddress,
    pub items: Vec<OrderItemRecord>,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub status_history: Vec<StatusChange>,
    pub order_notes: Vec<OrderNote>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Distinct artisans with lines on this order, in line order.
    #[must_use]
    pub fn artisans(&self) -> Vec<ArtisanUuid> {
        let mut artisans = Vec::new();

        for item in &self.items {
            if !artisans.contains(&item.artisan_uuid) {
                artisans.push(item.artisan_uuid);
            }
        }

        artisans
    }

    /// Whether any line has been claimed by a payout.
    #[must_use]
    pub fn is_claimed_by_payout(&self) -> bool {
        self.items.iter().any(|item| item.payout_uuid.is_some())
    }

    /// Keep only the lines sold by `artisan`.
    #[must_use]
    pub fn restricted_to(mut self, artisan: ArtisanUuid) -> Self {
        self.items.retain(|item| item.artisan_uuid == artisan);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: u64,
    pub pending: u64,
    pub contacted: u64,
    pub confirmed: u64,
    pub processing: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,

    /// Sum of paid order totals, in paise.
    pub revenue: u64,

    pub placed_today: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn online_payments_start_processing() {
        assert_eq!(PaymentMethod::Cod.initial_payment_status(), PaymentStatus::Pending);
        assert_eq!(PaymentMethod::Upi.initial_payment_status(), PaymentStatus::Processing);
        assert_eq!(
            PaymentMethod::NetBanking.initial_payment_status(),
            PaymentStatus::Processing
        );
    }

    #[test]
    fn enums_parse_from_storage_names() {
        assert_eq!("net_banking".parse(), Ok(PaymentMethod::NetBanking));
        assert_eq!("refunded".parse(), Ok(PaymentStatus::Refunded));
        assert_eq!("contacted".parse(), Ok(OrderStatus::Contacted));
        assert!("returned".parse::<OrderStatus>().is_err());
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
