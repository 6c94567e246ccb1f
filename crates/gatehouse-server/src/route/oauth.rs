use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::github::{access_token_cookie, TokenClient};

pub(crate) struct OauthState {
    pub(crate) client: TokenClient,
    pub(crate) sign_in_path: String,
}

pub(crate) fn router(state: Arc<OauthState>) -> Router<()> {
    Router::new()
        .route("/callback/github", get(github_callback))
        .fallback(super::no_route)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CallbackQueryParams {
    code: String,
    #[allow(dead_code)]
    state: Option<String>,
}

async fn github_callback(
    State(state): State<Arc<OauthState>>,
    Query(params): Query<CallbackQueryParams>,
) -> Response {
    let received = state.client.exchange(&params.code).await;

    if let Some(token) = received.access_token() {
        // Browsers drop cookies set on a redirect status, so answer 200 and
        // navigate with `Refresh` instead.
        return (
            StatusCode::OK,
            [
                (header::SET_COOKIE, access_token_cookie(token)),
                (header::REFRESH, format!("0;url={}", state.sign_in_path)),
            ],
        )
            .into_response();
    }

    // Nothing usable came back. Show the browser what we got.
    Json(received).into_response()
}
