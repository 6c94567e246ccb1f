use axum::http::{header, HeaderMap};
use axum::routing::get;
use axum::{Json, Router};
use gatehouse_flags::{build_init_flags, InitFlags, RawCookieJar, GITHUB_ACCESS_TOKEN_COOKIE};

use crate::error::ApiError;

pub(crate) fn router() -> Router<()> {
    Router::new()
        .route("/greet", get(greet))
        .route("/flags", get(flags))
        .fallback(super::no_route)
}

async fn greet() -> &'static str {
    "Hello from the server"
}

/// The startup flags the front-end would compute from the same cookies.
async fn flags(headers: HeaderMap) -> Result<Json<InitFlags>, ApiError> {
    Ok(Json(build_init_flags(
        &cookie_jar(&headers),
        GITHUB_ACCESS_TOKEN_COOKIE,
    )?))
}

/// HTTP/2 clients may split cookies over several `Cookie` headers. Browsers
/// send raw UTF-8 cookie values, which `HeaderValue::to_str` refuses.
fn cookie_jar(headers: &HeaderMap) -> RawCookieJar {
    let jar = headers
        .get_all(header::COOKIE)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect::<Vec<_>>()
        .join("; ");
    RawCookieJar::new(jar)
}
