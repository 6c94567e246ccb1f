//! Exchange of an OAuth authorization code for a GitHub user access token.

use std::collections::HashMap;

use axum::http::header;
use gatehouse_flags::GITHUB_ACCESS_TOKEN_COOKIE;
use serde::{Deserialize, Serialize};

use crate::config::{Secrets, ServerConfig};
use crate::error::Result;

/// The token cookie expires this many seconds before the token itself, so it
/// is not handed to the front-end moments before GitHub rejects it.
const COOKIE_EXPIRY_MARGIN_SECONDS: u32 = 60 * 60;

/// Everything learned from one token request, dumped to the browser as JSON
/// when no token could be obtained.
#[derive(Debug, Default, Serialize)]
pub struct ReceivedResponse {
    pub server_status: Option<String>,
    pub error_message: Option<String>,
    pub token_response: Option<GithubTokenResponse>,
}

impl ReceivedResponse {
    pub fn access_token(&self) -> Option<&GithubTokenResponseOk> {
        match &self.token_response {
            Some(GithubTokenResponse::Ok(ok)) => Some(ok),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub enum GithubTokenResponse {
    Ok(GithubTokenResponseOk),
    Err(GithubTokenResponseErr),
    Unrecognized { raw: String },
}

/// A successful token response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubTokenResponseOk {
    /// User access token, prefixed `ghu_`.
    pub access_token: String,
    /// Omitted when token expiration is disabled for the app; otherwise 28800.
    #[serde(rename = "expires_in")]
    pub expires_in_seconds: Option<u32>,
    /// Prefixed `ghr_`. Omitted when token expiration is disabled.
    pub refresh_token: Option<String>,
    #[serde(rename = "refresh_token_expires_in")]
    pub refresh_token_expires_in_seconds: Option<u32>,
    /// Always empty for GitHub App user tokens.
    pub scope: String,
    /// Always `bearer`.
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubTokenResponseErr {
    pub error: String,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
}

/// Classifies a token endpoint body as success, GitHub error, or neither.
pub fn parse_token_response(body: String) -> GithubTokenResponse {
    if let Ok(ok) = serde_json::from_str::<GithubTokenResponseOk>(&body) {
        return GithubTokenResponse::Ok(ok);
    }
    match serde_json::from_str::<GithubTokenResponseErr>(&body) {
        Ok(err) => GithubTokenResponse::Err(err),
        Err(_) => GithubTokenResponse::Unrecognized { raw: body },
    }
}

/// `Set-Cookie` value carrying the access token to the front-end.
///
/// See <https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Set-Cookie>.
pub fn access_token_cookie(token: &GithubTokenResponseOk) -> String {
    let max_age = match token.expires_in_seconds {
        Some(expires_in) => format!(
            "Max-Age={}; ",
            expires_in.saturating_sub(COOKIE_EXPIRY_MARGIN_SECONDS)
        ),
        None => String::new(),
    };
    format!(
        "{GITHUB_ACCESS_TOKEN_COOKIE}={access_token}; path=/; {max_age}SameSite=Strict",
        access_token = token.access_token
    )
}

/// Client for the GitHub token endpoint.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    secrets: Secrets,
}

impl TokenClient {
    pub fn new(config: &ServerConfig, secrets: Secrets) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gatehouse/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            token_url: config.github_token_url.clone(),
            client_id: config.github_client_id.clone(),
            secrets,
        })
    }

    /// Trades `code` for a token. Transport and body failures end up in the
    /// returned [`ReceivedResponse`], never as an `Err`.
    pub async fn exchange(&self, code: &str) -> ReceivedResponse {
        let response = self
            .http
            .post(&self.token_url)
            .header(header::ACCEPT, "application/json")
            .json(&HashMap::from([
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.secrets.github_app_client_secret.as_str()),
                ("code", code),
            ]))
            .send()
            .await;

        let mut out = ReceivedResponse::default();
        match response {
            Ok(response) => {
                out.server_status = Some(response.status().to_string());
                match response.text().await {
                    Ok(body) => out.token_response = Some(parse_token_response(body)),
                    Err(e) => {
                        out.error_message = Some(format!("Error receiving response body: {e}"))
                    }
                }
            }
            Err(e) => {
                out.error_message = Some(format!("Cannot connect to {}: {e}", self.token_url))
            }
        }

        match &out.token_response {
            Some(GithubTokenResponse::Ok(_)) => {
                tracing::info!(target: "gatehouse_server", "token exchange succeeded")
            }
            Some(GithubTokenResponse::Err(err)) => {
                tracing::warn!(target: "gatehouse_server", error = %err.error, "token exchange rejected")
            }
            _ => tracing::warn!(
                target: "gatehouse_server",
                status = ?out.server_status,
                message = ?out.error_message,
                "token exchange failed"
            ),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_in_seconds: Option<u32>) -> GithubTokenResponseOk {
        GithubTokenResponseOk {
            access_token: "ghu_abc".to_owned(),
            expires_in_seconds,
            refresh_token: None,
            refresh_token_expires_in_seconds: None,
            scope: String::new(),
            token_type: "bearer".to_owned(),
        }
    }

    #[test]
    fn cookie_without_expiry() {
        assert_eq!(
            access_token_cookie(&token(None)),
            "github-access-token=ghu_abc; path=/; SameSite=Strict"
        );
    }

    #[test]
    fn cookie_expires_an_hour_early() {
        assert_eq!(
            access_token_cookie(&token(Some(28800))),
            "github-access-token=ghu_abc; path=/; Max-Age=25200; SameSite=Strict"
        );
    }

    #[test]
    fn short_expiry_saturates_at_zero() {
        assert!(access_token_cookie(&token(Some(120))).contains("Max-Age=0; "));
    }

    #[test]
    fn classifies_success() {
        let body = r#"{"access_token":"ghu_1","expires_in":28800,"refresh_token":"ghr_1",
            "refresh_token_expires_in":15811200,"scope":"","token_type":"bearer"}"#;
        match parse_token_response(body.to_owned()) {
            GithubTokenResponse::Ok(ok) => {
                assert_eq!(ok.access_token, "ghu_1");
                assert_eq!(ok.expires_in_seconds, Some(28800));
                assert_eq!(ok.refresh_token.as_deref(), Some("ghr_1"));
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn classifies_github_error() {
        let body = r#"{"error":"bad_verification_code","error_description":"The code passed is incorrect or expired."}"#;
        match parse_token_response(body.to_owned()) {
            GithubTokenResponse::Err(err) => {
                assert_eq!(err.error, "bad_verification_code");
                assert_eq!(err.error_uri, None);
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn keeps_unrecognized_body() {
        match parse_token_response("<html>nope</html>".to_owned()) {
            GithubTokenResponse::Unrecognized { raw } => assert_eq!(raw, "<html>nope</html>"),
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
