//! Product Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tantika_app::domain::products::records::{CategoryCount, ProductRecord, ProductStats};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub artisan_uuid: Uuid,
    pub artisan_name: String,
    pub name: String,
    pub description: String,
    pub category: String,

    /// Price in paise
    pub price: u64,

    pub stock: u64,
    pub images: Vec<String>,

    /// `active`, `low_stock`, `out_of_stock` or `draft`
    pub status: String,

    /// `pending`, `approved` or `rejected`
    pub approval_status: String,

    pub rejection_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            artisan_uuid: product.artisan_uuid.into_uuid(),
            artisan_name: product.artisan_name,
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
            stock: product.stock,
            images: product.images,
            status: product.status.to_string(),
            approval_status: product.approval_status.to_string(),
            rejection_reason: product.rejection_reason,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub category: String,
    pub products: u64,
}

impl From<CategoryCount> for CategoryResponse {
    fn from(count: CategoryCount) -> Self {
        Self {
            category: count.category,
            products: count.products,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductStatsResponse {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
    pub out_of_stock: u64,
    pub low_stock: u64,
    pub draft: u64,
}

impl From<ProductStats> for ProductStatsResponse {
    fn from(stats: ProductStats) -> Self {
        Self {
            total: stats.total,
            approved: stats.approved,
            pending: stats.pending,
            rejected: stats.rejected,
            out_of_stock: stats.out_of_stock,
            low_stock: stats.low_stock,
            draft: stats.draft,
        }
    }
}
