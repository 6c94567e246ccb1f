use gatehouse_flags::{
    build_init_flags, CookieSource, Error as FlagsError, InitFlags, Interop,
    GITHUB_ACCESS_TOKEN_COOKIE,
};

use crate::runtime::Runtime;

/// Reads the jar from the runtime's `document.cookie`.
#[derive(Clone, Copy)]
pub struct JsCookieSource<'a> {
    runtime: &'a Runtime,
}

impl<'a> JsCookieSource<'a> {
    pub fn new(runtime: &'a Runtime) -> Self {
        Self { runtime }
    }
}

impl CookieSource for JsCookieSource<'_> {
    fn read_jar(&self) -> gatehouse_flags::Result<String> {
        self.runtime
            .document_cookie()
            .map_err(|error| FlagsError::jar_unavailable(format!("{error:#}")))
    }
}

/// Startup hooks for an application hosted in a [`Runtime`].
///
/// `flags` extracts the token from the runtime's own `document.cookie`;
/// `on_ready` has nothing to wire.
pub struct JsInterop {
    cookie_name: String,
}

impl JsInterop {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    /// Runs the startup sequence against `runtime`: compute the flags,
    /// publish them to the script as `flags`, then call `on_ready`.
    pub fn start(&self, runtime: &Runtime) -> anyhow::Result<InitFlags> {
        let flags = self.flags(runtime)?;
        runtime.install_flags(&flags)?;
        self.on_ready(runtime, runtime);
        tracing::info!(
            target: "gatehouse_js",
            has_token = !flags.is_empty(),
            "application started"
        );
        Ok(flags)
    }
}

impl Default for JsInterop {
    fn default() -> Self {
        Self::new(GITHUB_ACCESS_TOKEN_COOKIE)
    }
}

impl Interop for JsInterop {
    type App = Runtime;
    type Env = Runtime;

    fn flags(&self, env: &Runtime) -> gatehouse_flags::Result<InitFlags> {
        build_init_flags(&JsCookieSource::new(env), &self.cookie_name)
    }
}
