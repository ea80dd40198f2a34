//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{to_i64, try_get_parsed, try_get_u64},
    domain::{
        artisans::records::ArtisanUuid,
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            records::{
                ApprovalStatus, CategoryCount, LOW_STOCK_THRESHOLD, ProductRecord, ProductStats,
                ProductStatus, ProductUuid,
            },
        },
    },
    pagination::{Page, count_to_total},
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const REVIEW_PRODUCT_SQL: &str = include_str!("sql/review_product.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const PRODUCT_STATS_SQL: &str = include_str!("sql/product_stats.sql");
const RESERVE_STOCK_SQL: &str = include_str!("sql/reserve_stock.sql");
const RESTORE_STOCK_SQL: &str = include_str!("sql/restore_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Products matching `filter`; `listed_only` hides anything customers may not see.
    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
        listed_only: bool,
        page: Page,
    ) -> Result<(Vec<ProductRecord>, u64), sqlx::Error> {
        let artisan = filter.artisan.map(ArtisanUuid::into_uuid);
        let min_price = filter
            .min_price
            .map(|price| to_i64(price, "min_price"))
            .transpose()?;
        let max_price = filter
            .max_price
            .map(|price| to_i64(price, "max_price"))
            .transpose()?;

        let products = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.as_deref())
            .bind(artisan)
            .bind(filter.search.as_deref())
            .bind(min_price)
            .bind(max_price)
            .bind(listed_only)
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(filter.category.as_deref())
            .bind(artisan)
            .bind(filter.search.as_deref())
            .bind(min_price)
            .bind(max_price)
            .bind(listed_only)
            .fetch_one(&mut **tx)
            .await?;

        Ok((products, count_to_total(total)))
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        artisan: ArtisanUuid,
        data: &NewProduct,
        status: ProductStatus,
        approval_status: ApprovalStatus,
    ) -> Result<ProductRecord, sqlx::Error> {
        query(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(artisan.into_uuid())
            .bind(&data.name)
            .bind(&data.description)
            .bind(&data.category)
            .bind(to_i64(data.price, "price")?)
            .bind(to_i64(data.stock, "stock")?)
            .bind(&data.images)
            .bind(status.as_str())
            .bind(approval_status.as_str())
            .execute(&mut **tx)
            .await?;

        self.get_product(tx, product).await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
        status: ProductStatus,
        approval_status: ApprovalStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.category.as_deref())
            .bind(update.price.map(|price| to_i64(price, "price")).transpose()?)
            .bind(update.stock.map(|stock| to_i64(stock, "stock")).transpose()?)
            .bind(update.images.as_deref())
            .bind(status.as_str())
            .bind(approval_status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn review_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        approval_status: ApprovalStatus,
        rejection_reason: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVIEW_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(approval_status.as_str())
            .bind(rejection_reason)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryCount>, sqlx::Error> {
        let rows = query(LIST_CATEGORIES_SQL).fetch_all(&mut **tx).await?;

        rows.iter()
            .map(|row| {
                Ok(CategoryCount {
                    category: row.try_get("category")?,
                    products: try_get_u64(row, "products")?,
                })
            })
            .collect()
    }

    pub(crate) async fn product_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<ProductStats, sqlx::Error> {
        let row = query(PRODUCT_STATS_SQL).fetch_one(&mut **tx).await?;

        Ok(ProductStats {
            total: try_get_u64(&row, "total")?,
            approved: try_get_u64(&row, "approved")?,
            pending: try_get_u64(&row, "pending")?,
            rejected: try_get_u64(&row, "rejected")?,
            out_of_stock: try_get_u64(&row, "out_of_stock")?,
            low_stock: try_get_u64(&row, "low_stock")?,
            draft: try_get_u64(&row, "draft")?,
        })
    }

    /// Take `quantity` units out of stock if that many are available.
    ///
    /// Returns `false` when the conditional update matched nothing.
    pub(crate) async fn reserve_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(RESERVE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(to_i64(quantity, "quantity")?)
            .bind(to_i64(LOW_STOCK_THRESHOLD, "low_stock_threshold")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    pub(crate) async fn restore_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<(), sqlx::Error> {
        query(RESTORE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(to_i64(quantity, "quantity")?)
            .bind(to_i64(LOW_STOCK_THRESHOLD, "low_stock_threshold")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            artisan_uuid: ArtisanUuid::from_uuid(row.try_get("artisan_uuid")?),
            artisan_name: row.try_get("artisan_name")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            price: try_get_u64(row, "price")?,
            stock: try_get_u64(row, "stock")?,
            images: row.try_get("images")?,
            status: try_get_parsed(row, "status")?,
            approval_status: try_get_parsed(row, "approval_status")?,
            rejection_reason: row.try_get("rejection_reason")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
