//! Report Responses
//!
//! Amounts are in paise.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::reports::records::{
    ArtisanDashboard, ArtisanEarnings, CustomerDashboard, MonthlyRevenue, OrderCounts,
    ProductCounts, TopProduct,
};

use crate::orders::OrderResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCountsResponse {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub out_of_stock: u64,
    pub low_stock: u64,
}

impl From<ProductCounts> for ProductCountsResponse {
    fn from(counts: ProductCounts) -> Self {
        Self {
            total: counts.total,
            approved: counts.approved,
            pending: counts.pending,
            out_of_stock: counts.out_of_stock,
            low_stock: counts.low_stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCountsResponse {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub delivered: u64,
    pub cancelled: u64,
}

impl From<OrderCounts> for OrderCountsResponse {
    fn from(counts: OrderCounts) -> Self {
        Self {
            total: counts.total,
            pending: counts.pending,
            in_progress: counts.in_progress,
            delivered: counts.delivered,
            cancelled: counts.cancelled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MonthlyRevenueResponse {
    /// `YYYY-MM`
    pub month: String,
    pub revenue: u64,
}

impl From<MonthlyRevenue> for MonthlyRevenueResponse {
    fn from(month: MonthlyRevenue) -> Self {
        Self {
            month: month.month,
            revenue: month.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TopProductResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub units: u64,
    pub revenue: u64,
}

impl From<TopProduct> for TopProductResponse {
    fn from(product: TopProduct) -> Self {
        Self {
            product_uuid: product.product_uuid.into_uuid(),
            product_name: product.product_name,
            units: product.units,
            revenue: product.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ArtisanDashboardResponse {
    pub products: ProductCountsResponse,
    pub orders: OrderCountsResponse,
    pub revenue: u64,
    pub available_balance: u64,
    pub monthly_revenue: Vec<MonthlyRevenueResponse>,
    pub top_products: Vec<TopProductResponse>,
}

impl From<ArtisanDashboard> for ArtisanDashboardResponse {
    fn from(dashboard: ArtisanDashboard) -> Self {
        Self {
            products: dashboard.products.into(),
            orders: dashboard.orders.into(),
            revenue: dashboard.revenue,
            available_balance: dashboard.available_balance,
            monthly_revenue: dashboard.monthly_revenue.into_iter().map(Into::into).collect(),
            top_products: dashboard.top_products.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ArtisanEarningsResponse {
    pub total_earned: u64,
    pub available_balance: u64,
    pub pending_payouts: u64,
    pub paid_out: u64,
}

impl From<ArtisanEarnings> for ArtisanEarningsResponse {
    fn from(earnings: ArtisanEarnings) -> Self {
        Self {
            total_earned: earnings.total_earned,
            available_balance: earnings.available_balance,
            pending_payouts: earnings.pending_payouts,
            paid_out: earnings.paid_out,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerDashboardResponse {
    pub orders: OrderCountsResponse,
    pub total_spent: u64,
    pub wishlist_items: u64,
    pub recent_orders: Vec<OrderResponse>,
}

impl From<CustomerDashboard> for CustomerDashboardResponse {
    fn from(dashboard: CustomerDashboard) -> Self {
        Self {
            orders: dashboard.orders.into(),
            total_spent: dashboard.total_spent,
            wishlist_items: dashboard.wishlist_items,
            recent_orders: dashboard.recent_orders.into_iter().map(Into::into).collect(),
        }
    }
}
