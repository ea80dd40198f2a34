//! Report Records

use crate::domain::{orders::records::OrderRecord, products::records::ProductUuid};

/// An artisan's live products by review and stock state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductCounts {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub out_of_stock: u64,
    pub low_stock: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCounts {
    pub total: u64,
    pub pending: u64,

    /// Contacted, confirmed, processing or shipped.
    pub in_progress: u64,

    pub delivered: u64,
    pub cancelled: u64,
}

/// Revenue from delivered and paid lines in one calendar month (`YYYY-MM`, India time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopProduct {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub units: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtisanDashboard {
    pub products: ProductCounts,
    pub orders: OrderCounts,

    /// Delivered and paid line value, in paise.
    pub revenue: u64,

    pub available_balance: u64,

    /// The last six months, oldest first.
    pub monthly_revenue: Vec<MonthlyRevenue>,

    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtisanEarnings {
    pub total_earned: u64,
    pub available_balance: u64,

    /// Claimed by payouts that are pending or processing.
    pub pending_payouts: u64,

    /// Net amount of processed payouts.
    pub paid_out: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDashboard {
    pub orders: OrderCounts,

    /// Total of orders that were not cancelled, in paise.
    pub total_spent: u64,

    pub wishlist_items: u64,
    pub recent_orders: Vec<OrderRecord>,
}
