//! HTTP side of the GitHub sign-in: the OAuth callback that writes the
//! `github-access-token` cookie, a small API, and the single page app.

pub mod config;
pub mod error;
pub mod github;
mod route;
pub mod trace;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

pub use config::{Secrets, ServerConfig};
pub use error::{ApiError, Error, Result};

use route::{api, oauth, spa};

/// Builds the full application router.
///
/// `/api/*` and `/oauth/*` are handled here; every other path is served from
/// `config.ui_dir`.
pub fn router(config: &ServerConfig, secrets: Secrets) -> Result<Router> {
    let oauth_state = Arc::new(oauth::OauthState {
        client: github::TokenClient::new(config, secrets)?,
        sign_in_path: config.sign_in_path.clone(),
    });

    let router = Router::new()
        .nest("/api", api::router())
        .nest("/oauth", oauth::router(oauth_state))
        .fallback_service(spa::serve_dir(&config.ui_dir));

    Ok(trace::wrap_router(router))
}

/// Binds `config.bind` and serves until the process is stopped.
pub async fn serve(config: &ServerConfig, secrets: Secrets) -> Result<()> {
    let router = router(config, secrets)?;
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| Error::Bind {
            addr: config.bind,
            source,
        })?;
    tracing::info!(
        target: "gatehouse_server",
        addr = %listener.local_addr()?,
        ui_dir = %config.ui_dir.display(),
        "listening"
    );
    axum::serve(listener, router).await?;
    Ok(())
}
