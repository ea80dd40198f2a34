//! Order Requests and Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::orders::{
    pricing::OrderTotals,
    records::{
        OrderCustomer, OrderItemRecord, OrderNote, OrderRecord, OrderStats, ShippingAddress,
        StatusChange,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    /// Set when the order was placed by a signed-in account
    pub user_uuid: Option<Uuid>,

    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<OrderCustomer> for CustomerResponse {
    fn from(customer: OrderCustomer) -> Self {
        Self {
            user_uuid: customer.user_uuid.map(|user| user.into_uuid()),
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingResponse {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<ShippingAddress> for ShippingResponse {
    fn from(address: ShippingAddress) -> Self {
        Self {
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub artisan_uuid: Uuid,
    pub product_name: String,
    pub product_image: Option<String>,

    /// Paise
    pub unit_price: u64,

    pub quantity: u64,

    /// Paise
    pub subtotal: u64,

    /// The payout that settled this line, if any
    pub payout_uuid: Option<Uuid>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            artisan_uuid: item.artisan_uuid.into_uuid(),
            product_name: item.product_name,
            product_image: item.product_image,
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal: item.subtotal,
            payout_uuid: item.payout_uuid.map(|payout| payout.into_uuid()),
        }
    }
}

/// Order amounts in paise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalsResponse {
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub total: u64,
}

impl From<OrderTotals> for TotalsResponse {
    fn from(totals: OrderTotals) -> Self {
        Self {
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            total: totals.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusChangeResponse {
    pub status: String,
    pub changed_by: Option<Uuid>,
    pub reason: Option<String>,
    pub changed_at: String,
}

impl From<StatusChange> for StatusChangeResponse {
    fn from(change: StatusChange) -> Self {
        Self {
            status: change.status.to_string(),
            changed_by: change.changed_by.map(|user| user.into_uuid()),
            reason: change.reason,
            changed_at: change.changed_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderNoteResponse {
    /// `admin` or `contact`
    pub kind: String,

    pub author_uuid: Uuid,
    pub body: String,
    pub created_at: String,
}

impl From<OrderNote> for OrderNoteResponse {
    fn from(note: OrderNote) -> Self {
        Self {
            kind: note.kind.to_string(),
            author_uuid: note.author_uuid.into_uuid(),
            body: note.body,
            created_at: note.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// e.g. `TNK-20260101-000001`
    pub order_number: String,

    pub customer: CustomerResponse,
    pub shipping: ShippingResponse,
    pub items: Vec<OrderItemResponse>,
    pub totals: TotalsResponse,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<String>,
    pub delivered_at: Option<String>,
    pub status_history: Vec<StatusChangeResponse>,
    pub order_notes: Vec<OrderNoteResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            order_number: order.order_number,
            customer: order.customer.into(),
            shipping: order.shipping.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            totals: order.totals.into(),
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method.to_string(),
            notes: order.notes,
            cancellation_reason: order.cancellation_reason,
            cancelled_at: order.cancelled_at.map(|at| at.to_string()),
            delivered_at: order.delivered_at.map(|at| at.to_string()),
            status_history: order.status_history.into_iter().map(Into::into).collect(),
            order_notes: order.order_notes.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatsResponse {
    pub total: u64,
    pub pending: u64,
    pub contacted: u64,
    pub confirmed: u64,
    pub processing: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,

    /// Paid order totals, in paise
    pub revenue: u64,

    pub placed_today: u64,
}

impl From<OrderStats> for OrderStatsResponse {
    fn from(stats: OrderStats) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            contacted: stats.contacted,
            confirmed: stats.confirmed,
            processing: stats.processing,
            shipped: stats.shipped,
            delivered: stats.delivered,
            cancelled: stats.cancelled,
            revenue: stats.revenue,
            placed_today: stats.placed_today,
        }
    }
}
