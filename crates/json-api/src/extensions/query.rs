//! Query string helpers.

use std::{fmt::Display, str::FromStr};

use salvo::oapi::extract::QueryParam;

use tantika_app::pagination::Page;

use crate::envelope::ApiError;

/// Build a page window from optional `page` and `limit` parameters.
pub(crate) fn into_page(page: QueryParam<u32, false>, limit: QueryParam<u32, false>) -> Page {
    Page::new(page.into_inner(), limit.into_inner())
}

/// Parse an optional filter value, treating blank input as absent.
pub(crate) fn parse_optional<T>(value: QueryParam<String, false>) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .into_inner()
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<T>())
        .transpose()
        .map_err(|error| ApiError::bad_request(error.to_string()))
}
