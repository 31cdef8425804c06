//! Session cookie helpers

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use http::HeaderMap;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// Session cookie: HttpOnly, SameSite=Lax, path `/`, Secure outside development
pub fn session_cookie(token: String, secure: bool, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Cookie that makes the browser drop the session
pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    session_cookie(String::new(), secure, 0)
}

/// Session token from the request cookies, if any
pub fn read_session_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
