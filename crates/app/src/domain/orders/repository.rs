//! Orders Repository

use std::collections::HashMap;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{to_i64, try_get_parsed, try_get_u64},
    domain::{
        artisans::records::ArtisanUuid,
        orders::{
            data::{NewOrder, OrderFilter},
            pricing::OrderTotals,
            records::{
                OrderCustomer, OrderItemRecord, OrderItemUuid, OrderNote, OrderNoteKind,
                OrderRecord, OrderStats, OrderStatus, OrderUuid, PaymentStatus, ShippingAddress,
                StatusChange,
            },
        },
        payouts::records::PayoutUuid,
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    pagination::{Page, count_to_total},
};

const NEXT_ORDER_NUMBER_SQL: &str = include_str!("sql/next_order_number.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const APPEND_STATUS_HISTORY_SQL: &str = include_str!("sql/append_status_history.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const LIST_STATUS_HISTORY_SQL: &str = include_str!("sql/list_status_history.sql");
const LIST_ORDER_NOTES_SQL: &str = include_str!("sql/list_order_notes.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const CANCEL_ORDER_SQL: &str = include_str!("sql/cancel_order.sql");
const UPDATE_PAYMENT_STATUS_SQL: &str = include_str!("sql/update_payment_status.sql");
const CREATE_ORDER_NOTE_SQL: &str = include_str!("sql/create_order_note.sql");
const ORDER_STATS_SQL: &str = include_str!("sql/order_stats.sql");

/// A line ready to be written, priced from the locked product row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PricedItem {
    pub product_uuid: ProductUuid,
    pub artisan_uuid: ArtisanUuid,
    pub product_name: String,
    pub product_image: Option<String>,
    pub unit_price: u64,
    pub quantity: u64,
    pub subtotal: u64,
}

/// Which orders a listing may return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct OrderScope {
    pub customer: Option<UserUuid>,
    pub artisan: Option<ArtisanUuid>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Allocate the next `TNK-YYYYMMDD-NNNNNN` number, dated in India time.
    pub(crate) async fn next_order_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<String, sqlx::Error> {
        let row = query(NEXT_ORDER_NUMBER_SQL).fetch_one(&mut **tx).await?;
        let day: String = row.try_get("day")?;
        let sequence: i64 = row.try_get("sequence")?;

        Ok(format_order_number(&day, sequence))
    }

    #[expect(clippy::too_many_arguments, reason = "one column group per argument")]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        order_number: &str,
        customer: Option<UserUuid>,
        data: &NewOrder,
        totals: OrderTotals,
        payment_status: PaymentStatus,
        items: &[PricedItem],
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(order_number)
            .bind(customer.map(UserUuid::into_uuid))
            .bind(&data.customer.name)
            .bind(&data.customer.email)
            .bind(&data.customer.phone)
            .bind(&data.customer.street)
            .bind(&data.customer.city)
            .bind(&data.customer.state)
            .bind(&data.customer.postal_code)
            .bind(data.customer.country.as_deref())
            .bind(to_i64(totals.subtotal, "subtotal")?)
            .bind(to_i64(totals.tax, "tax")?)
            .bind(to_i64(totals.shipping, "shipping_cost")?)
            .bind(to_i64(totals.total, "total")?)
            .bind(payment_status.as_str())
            .bind(data.payment_method.as_str())
            .bind(data.notes.as_deref())
            .execute(&mut **tx)
            .await?;

        for (position, item) in (1_i32..).zip(items) {
            query(CREATE_ORDER_ITEM_SQL)
                .bind(OrderItemUuid::new().into_uuid())
                .bind(order.into_uuid())
                .bind(position)
                .bind(item.product_uuid.into_uuid())
                .bind(item.artisan_uuid.into_uuid())
                .bind(&item.product_name)
                .bind(item.product_image.as_deref())
                .bind(to_i64(item.unit_price, "unit_price")?)
                .bind(to_i64(item.quantity, "quantity")?)
                .bind(to_i64(item.subtotal, "subtotal")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn append_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        changed_by: Option<UserUuid>,
        reason: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        query(APPEND_STATUS_HISTORY_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(changed_by.map(UserUuid::into_uuid))
            .bind(reason)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let header = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.single(tx, header).await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let header = query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.single(tx, header).await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: OrderScope,
        filter: &OrderFilter,
        page: Page,
    ) -> Result<(Vec<OrderRecord>, u64), sqlx::Error> {
        let customer = scope.customer.map(UserUuid::into_uuid);
        let artisan = scope.artisan.map(ArtisanUuid::into_uuid);
        let status = filter.status.map(OrderStatus::as_str);
        let payment_status = filter.payment_status.map(PaymentStatus::as_str);

        let headers = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(customer)
            .bind(artisan)
            .bind(status)
            .bind(payment_status)
            .bind(filter.search.as_deref())
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(customer)
            .bind(artisan)
            .bind(status)
            .bind(payment_status)
            .bind(filter.search.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        let orders = self.attach_details(tx, headers).await?;

        Ok((orders, count_to_total(total)))
    }

    /// Advance a live order. Returns zero rows once the order is terminal.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn cancel_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        reason: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CANCEL_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(reason)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        payment_status: PaymentStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PAYMENT_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(payment_status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_note(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        kind: OrderNoteKind,
        author: UserUuid,
        body: &str,
    ) -> Result<OrderNote, sqlx::Error> {
        let row = query(CREATE_ORDER_NOTE_SQL)
            .bind(order.into_uuid())
            .bind(kind.as_str())
            .bind(author.into_uuid())
            .bind(body)
            .fetch_one(&mut **tx)
            .await?;

        note_from_row(&row)
    }

    pub(crate) async fn order_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<OrderStats, sqlx::Error> {
        let row = query(ORDER_STATS_SQL).fetch_one(&mut **tx).await?;

        Ok(OrderStats {
            total: try_get_u64(&row, "total")?,
            pending: try_get_u64(&row, "pending")?,
            contacted: try_get_u64(&row, "contacted")?,
            confirmed: try_get_u64(&row, "confirmed")?,
            processing: try_get_u64(&row, "processing")?,
            shipped: try_get_u64(&row, "shipped")?,
            delivered: try_get_u64(&row, "delivered")?,
            cancelled: try_get_u64(&row, "cancelled")?,
            revenue: try_get_u64(&row, "revenue")?,
            placed_today: try_get_u64(&row, "placed_today")?,
        })
    }

    async fn single(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        header: OrderRecord,
    ) -> Result<OrderRecord, sqlx::Error> {
        self.attach_details(tx, vec![header])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Load lines, history and notes for a batch of order headers.
    async fn attach_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let mut items: HashMap<Uuid, Vec<OrderItemRecord>> = HashMap::new();
        for row in query(LIST_ORDER_ITEMS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?
        {
            let order: Uuid = row.try_get("order_uuid")?;
            items.entry(order).or_default().push(item_from_row(&row)?);
        }

        let mut history: HashMap<Uuid, Vec<StatusChange>> = HashMap::new();
        for row in query(LIST_STATUS_HISTORY_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?
        {
            let order: Uuid = row.try_get("order_uuid")?;
            history.entry(order).or_default().push(StatusChange {
                status: try_get_parsed(&row, "status")?,
                changed_by: row
                    .try_get::<Option<Uuid>, _>("changed_by")?
                    .map(UserUuid::from_uuid),
                reason: row.try_get("reason")?,
                changed_at: row.try_get::<SqlxTimestamp, _>("changed_at")?.to_jiff(),
            });
        }

        let mut notes: HashMap<Uuid, Vec<OrderNote>> = HashMap::new();
        for row in query(LIST_ORDER_NOTES_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?
        {
            let order: Uuid = row.try_get("order_uuid")?;
            notes.entry(order).or_default().push(note_from_row(&row)?);
        }

        for order in &mut orders {
            let uuid = order.uuid.into_uuid();

            order.items = items.remove(&uuid).unwrap_or_default();
            order.status_history = history.remove(&uuid).unwrap_or_default();
            order.order_notes = notes.remove(&uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

fn format_order_number(day: &str, sequence: i64) -> String {
    format!("TNK-{day}-{sequence:06}")
}

fn item_from_row(row: &PgRow) -> sqlx::Result<OrderItemRecord> {
    Ok(OrderItemRecord {
        uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
        product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
        artisan_uuid: ArtisanUuid::from_uuid(row.try_get("artisan_uuid")?),
        product_name: row.try_get("product_name")?,
        product_image: row.try_get("product_image")?,
        unit_price: try_get_u64(row, "unit_price")?,
        quantity: try_get_u64(row, "quantity")?,
        subtotal: try_get_u64(row, "subtotal")?,
        payout_uuid: row
            .try_get::<Option<Uuid>, _>("payout_uuid")?
            .map(PayoutUuid::from_uuid),
    })
}

fn note_from_row(row: &PgRow) -> sqlx::Result<OrderNote> {
    Ok(OrderNote {
        kind: try_get_parsed(row, "kind")?,
        author_uuid: UserUuid::from_uuid(row.try_get("author_uuid")?),
        body: row.try_get("body")?,
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
    })
}

fn try_get_timestamp(row: &PgRow, column: &str) -> sqlx::Result<Option<Timestamp>> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(SqlxTimestamp::to_jiff))
}

/// Decodes the order header only; lines, history and notes are attached afterwards.
impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            customer: OrderCustomer {
                user_uuid: row
                    .try_get::<Option<Uuid>, _>("customer_user_uuid")?
                    .map(UserUuid::from_uuid),
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            shipping: ShippingAddress {
                street: row.try_get("street")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                postal_code: row.try_get("postal_code")?,
                country: row.try_get("country")?,
            },
            items: Vec::new(),
            totals: OrderTotals {
                subtotal: try_get_u64(row, "subtotal")?,
                tax: try_get_u64(row, "tax")?,
                shipping: try_get_u64(row, "shipping_cost")?,
                total: try_get_u64(row, "total")?,
            },
            status: try_get_parsed(row, "status")?,
            payment_status: try_get_parsed(row, "payment_status")?,
            payment_method: try_get_parsed(row, "payment_method")?,
            notes: row.try_get("notes")?,
            cancellation_reason: row.try_get("cancellation_reason")?,
            cancelled_at: try_get_timestamp(row, "cancelled_at")?,
            delivered_at: try_get_timestamp(row, "delivered_at")?,
            status_history: Vec::new(),
            order_notes: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
