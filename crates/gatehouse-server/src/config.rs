use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000);
pub const DEFAULT_GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const DEFAULT_GITHUB_CLIENT_ID: &str = "Iv1.b5ba4dcd32da9063";
pub const GITHUB_APP_CLIENT_SECRET_ENV: &str = "GITHUB_APP_CLIENT_SECRET";

/// Server settings, read from an optional TOML file.
///
/// ```toml
/// bind = "0.0.0.0:8000"
/// ui_dir = "ui/dist"
/// github_client_id = "Iv1.b5ba4dcd32da9063"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory holding the built single page app (`index.html` and assets).
    pub ui_dir: PathBuf,
    pub github_client_id: String,
    pub github_token_url: String,
    /// Where the browser is sent once the token cookie is set.
    pub sign_in_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            ui_dir: ["ui", "dist"].iter().collect(),
            github_client_id: DEFAULT_GITHUB_CLIENT_ID.to_owned(),
            github_token_url: DEFAULT_GITHUB_TOKEN_URL.to_owned(),
            sign_in_path: "/sign-in".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(target: "gatehouse_server", path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Values that must never live in the config file.
#[derive(Clone)]
pub struct Secrets {
    pub github_app_client_secret: String,
}

impl Secrets {
    pub fn new(github_app_client_secret: impl Into<String>) -> Self {
        Self {
            github_app_client_secret: github_app_client_secret.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        match std::env::var(GITHUB_APP_CLIENT_SECRET_ENV) {
            Ok(secret) if !secret.trim().is_empty() => Ok(Self::new(secret)),
            _ => Err(Error::MissingSecret(GITHUB_APP_CLIENT_SECRET_ENV)),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("github_app_client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(ServerConfig::from_toml("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let config = ServerConfig::from_toml(
            r#"
            bind = "0.0.0.0:9000"
            sign_in_path = "/welcome"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.sign_in_path, "/welcome");
        assert_eq!(config.github_token_url, DEFAULT_GITHUB_TOKEN_URL);
        assert_eq!(config.ui_dir, PathBuf::from("ui").join("dist"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ServerConfig::from_toml("client_secret = \"x\"").is_err());
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let error = ServerConfig::load(Some(Path::new("/nonexistent/gatehouse.toml"))).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/gatehouse.toml"));
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let rendered = format!("{:?}", Secrets::new("s3cr3t"));
        assert!(!rendered.contains("s3cr3t"));
    }
}
