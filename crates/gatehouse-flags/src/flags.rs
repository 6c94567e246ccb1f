use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::cookie_jar::CookieSource;
use crate::error::Result;
use crate::lookup::lookup_cookie;

/// Key under which the access token is handed to the front-end.
pub const GITHUB_ACCESS_TOKEN_FLAG: &str = "githubAccessToken";

/// Flags passed to the front-end when it initializes.
///
/// Either empty or carrying a single non-empty `githubAccessToken`; an empty
/// token is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitFlags {
    #[serde(
        rename = "githubAccessToken",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_token"
    )]
    github_access_token: Option<String>,
}

impl InitFlags {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds flags from a cookie lookup result. `None` and `Some("")` both
    /// produce empty flags.
    pub fn from_access_token(token: Option<String>) -> Self {
        Self {
            github_access_token: token.filter(|token| !token.is_empty()),
        }
    }

    pub fn github_access_token(&self) -> Option<&str> {
        self.github_access_token.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.github_access_token.is_none()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.github_access_token
            .map(|token| (GITHUB_ACCESS_TOKEN_FLAG.to_owned(), token))
            .into_iter()
            .collect()
    }
}

fn non_empty_token<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|token| !token.is_empty()))
}

/// Reads the jar from `source` and turns cookie `name` into [`InitFlags`].
pub fn build_init_flags<S: CookieSource + ?Sized>(source: &S, name: &str) -> Result<InitFlags> {
    let jar = source.read_jar()?;
    Ok(InitFlags::from_access_token(lookup_cookie(&jar, name)?))
}
