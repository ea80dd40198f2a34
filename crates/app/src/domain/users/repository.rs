//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::try_get_parsed,
    domain::{
        artisans::records::ArtisanUuid,
        users::{
            data::{AddressUpdate, NewAddress, NewUser, ProfileUpdate, UserFilter, UserUpdate},
            records::{
                AddressRecord, AddressUuid, UserCredentials, UserRecord, UserRole, UserStats,
                UserUuid,
            },
        },
    },
    pagination::{Page, count_to_total},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const LOCK_USER_SQL: &str = include_str!("sql/lock_user.sql");
const GET_CREDENTIALS_SQL: &str = include_str!("sql/get_credentials.sql");
const GET_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/get_credentials_by_email.sql");
const SEARCH_USERS_SQL: &str = include_str!("sql/search_users.sql");
const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const SET_LIFECYCLE_STATE_SQL: &str = include_str!("sql/set_lifecycle_state.sql");
const SET_PASSWORD_HASH_SQL: &str = include_str!("sql/set_password_hash.sql");
const TOUCH_LAST_LOGIN_SQL: &str = include_str!("sql/touch_last_login.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");
const LOCK_ACTIVE_ADMINS_SQL: &str = include_str!("sql/lock_active_admins.sql");
const COUNT_USER_ORDERS_SQL: &str = include_str!("sql/count_user_orders.sql");
const USER_STATS_SQL: &str = include_str!("sql/user_stats.sql");
const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const UPDATE_ADDRESS_SQL: &str = include_str!("sql/update_address.sql");
const DELETE_ADDRESS_SQL: &str = include_str!("sql/delete_address.sql");
const CLEAR_DEFAULT_ADDRESS_SQL: &str = include_str!("sql/clear_default_address.sql");
const PROMOTE_OLDEST_ADDRESS_SQL: &str = include_str!("sql/promote_oldest_address.sql");
const COUNT_ADDRESSES_SQL: &str = include_str!("sql/count_addresses.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.phone.as_deref())
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Row-lock the user for the rest of the transaction.
    pub(crate) async fn lock_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LOCK_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_credentials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserCredentials, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(GET_CREDENTIALS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(GET_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn search_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &UserFilter,
        page: Page,
    ) -> Result<(Vec<UserRecord>, u64), sqlx::Error> {
        let search = filter.search.as_deref();
        let role = filter.role.map(UserRole::as_str);

        let users = query_as::<Postgres, UserRecord>(SEARCH_USERS_SQL)
            .bind(search)
            .bind(role)
            .bind(filter.is_active)
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_USERS_SQL)
            .bind(search)
            .bind(role)
            .bind(filter.is_active)
            .fetch_one(&mut **tx)
            .await?;

        Ok((users, count_to_total(total)))
    }

    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &UserUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.phone.as_deref())
            .bind(update.role.map(UserRole::as_str))
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &ProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        self.update_user(
            tx,
            user,
            &UserUpdate {
                name: update.name.clone(),
                phone: update.phone.clone(),
                ..UserUpdate::default()
            },
        )
        .await
    }

    /// Write the role and activation an artisan decision implies.
    pub(crate) async fn set_lifecycle_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        role: UserRole,
        is_active: bool,
        artisan: Option<ArtisanUuid>,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_LIFECYCLE_STATE_SQL)
            .bind(user.into_uuid())
            .bind(role.as_str())
            .bind(is_active)
            .bind(artisan.map(ArtisanUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_password_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PASSWORD_HASH_SQL)
            .bind(user.into_uuid())
            .bind(password_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn touch_last_login(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_LAST_LOGIN_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Lock every active admin row and return their ids.
    ///
    /// Holding these locks serialises concurrent demotions so the last admin
    /// cannot be removed by two racing requests.
    pub(crate) async fn lock_active_admins(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<UserUuid>, sqlx::Error> {
        let admins: Vec<Uuid> = query_scalar(LOCK_ACTIVE_ADMINS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(admins.into_iter().map(UserUuid::from_uuid).collect())
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count_to_total(count))
    }

    pub(crate) async fn user_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<UserStats, sqlx::Error> {
        let row = query(USER_STATS_SQL).fetch_one(&mut **tx).await?;

        let count = |column: &str| row.try_get::<i64, _>(column).map(count_to_total);

        Ok(UserStats {
            total: count("total")?,
            active: count("active")?,
            inactive: count("inactive")?,
            customers: count("customers")?,
            artisans: count("artisans")?,
            pending_artisans: count("pending_artisans")?,
            admins: count("admins")?,
            joined_last_30_days: count("joined_last_30_days")?,
        })
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(LIST_ADDRESSES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ADDRESSES_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count_to_total(count))
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: AddressUuid,
        data: &NewAddress,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(CREATE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(user.into_uuid())
            .bind(data.label.as_deref())
            .bind(&data.street)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.postal_code)
            .bind(data.country.as_deref())
            .bind(data.is_default)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: AddressUuid,
        update: &AddressUpdate,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(UPDATE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(user.into_uuid())
            .bind(update.label.as_deref())
            .bind(update.street.as_deref())
            .bind(update.city.as_deref())
            .bind(update.state.as_deref())
            .bind(update.postal_code.as_deref())
            .bind(update.country.as_deref())
            .bind(update.is_default)
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete an address, reporting whether it was the default.
    pub(crate) async fn delete_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        address: AddressUuid,
    ) -> Result<Option<bool>, sqlx::Error> {
        query_scalar(DELETE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn clear_default_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(CLEAR_DEFAULT_ADDRESS_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn promote_oldest_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(PROMOTE_OLDEST_ADDRESS_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            role: try_get_parsed(row, "role")?,
            is_active: row.try_get("is_active")?,
            artisan_uuid: row
                .try_get::<Option<Uuid>, _>("artisan_uuid")?
                .map(ArtisanUuid::from_uuid),
            last_login_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_login_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            password_hash: row.try_get("password_hash")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AddressRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            label: row.try_get("label")?,
            street: row.try_get("street")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            postal_code: row.try_get("postal_code")?,
            country: row.try_get("country")?,
            is_default: row.try_get("is_default")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
