//! Startup flags for the front-end, derived from the browser cookie jar.
//!
//! The sign-in callback stores the GitHub access token in the
//! `github-access-token` cookie. Before the front-end initializes its model,
//! [`build_init_flags`] pulls that value out of the jar and hands it over as
//! the `githubAccessToken` flag.

pub mod cookie_jar;
pub mod error;
pub mod flags;
pub mod interop;
pub mod lookup;

pub use cookie_jar::{CookieSource, FnCookieSource, RawCookieJar, SessionCookieJar};
pub use error::{Error, Result};
pub use flags::{build_init_flags, InitFlags, GITHUB_ACCESS_TOKEN_FLAG};
pub use interop::{CookieInterop, Interop};
pub use lookup::lookup_cookie;

/// Name of the cookie written by the GitHub OAuth callback.
pub const GITHUB_ACCESS_TOKEN_COOKIE: &str = "github-access-token";
