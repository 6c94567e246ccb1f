use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Wraps every request in an `http_request` span.
pub fn wrap_router(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            let path = request.uri().path();
            // Only recorded when it differs from the literal path.
            let matched_path = request
                .extensions()
                .get::<MatchedPath>()
                .map(MatchedPath::as_str)
                .filter(|&matched_path| matched_path != path);
            tracing::info_span!(
                "http_request",
                method = ?request.method(),
                matched_path,
                path,
            )
        }),
    )
}
