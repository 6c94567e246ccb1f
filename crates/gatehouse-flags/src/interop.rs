use crate::cookie_jar::CookieSource;
use crate::error::Result;
use crate::flags::{build_init_flags, InitFlags};
use crate::GITHUB_ACCESS_TOKEN_COOKIE;

/// Lifecycle contract between the host and the front-end application.
///
/// `flags` runs before the application initializes its model; its result is
/// what the application receives as startup data. `on_ready` runs once the
/// application instance exists and is where message ports would be wired.
pub trait Interop {
    type App: ?Sized;
    type Env: ?Sized;

    fn flags(&self, env: &Self::Env) -> Result<InitFlags>;

    fn on_ready(&self, _app: &Self::App, _env: &Self::Env) {}
}

/// [`Interop`] that reads the access token cookie from a [`CookieSource`].
#[derive(Debug, Clone)]
pub struct CookieInterop<S> {
    source: S,
    cookie_name: String,
}

impl<S: CookieSource> CookieInterop<S> {
    pub fn new(source: S) -> Self {
        Self::with_cookie_name(source, GITHUB_ACCESS_TOKEN_COOKIE)
    }

    pub fn with_cookie_name(source: S, cookie_name: impl Into<String>) -> Self {
        Self {
            source,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: CookieSource> Interop for CookieInterop<S> {
    type App = ();
    type Env = ();

    fn flags(&self, _env: &()) -> Result<InitFlags> {
        build_init_flags(&self.source, &self.cookie_name)
    }
}
