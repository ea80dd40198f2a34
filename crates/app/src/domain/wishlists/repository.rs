//! Wishlists Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{to_i64, try_get_u64},
    domain::{
        products::records::{ProductRecord, ProductUuid},
        users::records::UserUuid,
        wishlists::records::WishlistItem,
    },
};

const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const ADD_ITEM_SQL: &str = include_str!("sql/add_item.sql");
const REMOVE_ITEM_SQL: &str = include_str!("sql/remove_item.sql");
const CLEAR_ITEMS_SQL: &str = include_str!("sql/clear_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistsRepository;

impl PgWishlistsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<WishlistItem>, sqlx::Error> {
        query_as::<Postgres, WishlistItem>(LIST_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Save a snapshot of `product`. A repeat add hits the primary key.
    pub(crate) async fn add_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: &ProductRecord,
    ) -> Result<WishlistItem, sqlx::Error> {
        query_as::<Postgres, WishlistItem>(ADD_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(to_i64(product.price, "product_price")?)
            .bind(product.primary_image())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn remove_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_ITEMS_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_price: try_get_u64(row, "product_price")?,
            product_image: row.try_get("product_image")?,
            added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
        })
    }
}
