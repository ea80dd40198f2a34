//! Session cookie.

use salvo::{
    http::cookie::{Cookie, SameSite, time::Duration},
    prelude::Response,
};

use crate::state::HttpSettings;

pub(crate) const SESSION_COOKIE: &str = "tantika_session";

/// Set the session cookie for a freshly issued token.
pub(crate) fn set_session(res: &mut Response, token: &str, settings: HttpSettings) {
    res.add_cookie(session_cookie(token, settings));
}

/// Expire the session cookie in the browser.
pub(crate) fn clear_session(res: &mut Response, settings: HttpSettings) {
    let mut cookie = session_cookie("", settings);

    cookie.set_max_age(Duration::ZERO);

    res.add_cookie(cookie);
}

fn session_cookie(token: &str, settings: HttpSettings) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookies)
        .max_age(Duration::hours(i64::from(settings.session_ttl_hours)))
        .build()
}
