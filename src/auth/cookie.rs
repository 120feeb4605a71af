use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

pub const SESSION_COOKIE: &str = "token";

/// Session cookie carrying `token`, living exactly as long as the token.
pub fn session_cookie(token: String, ttl: Duration, production: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(production)
        .same_site(if production { SameSite::None } else { SameSite::Lax })
        .max_age(ttl)
        .build()
}

/// Overwrites the session cookie with an empty, already-expired value.
pub fn cleared_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}
