use crate::error::Result;

/// Anything that can hand out the current cookie jar string.
///
/// The jar is fetched again on every call; implementations must not cache it
/// on behalf of the caller.
pub trait CookieSource {
    fn read_jar(&self) -> Result<String>;
}

impl<T: CookieSource + ?Sized> CookieSource for &T {
    fn read_jar(&self) -> Result<String> {
        (**self).read_jar()
    }
}

/// A jar string captured up front, e.g. an HTTP `Cookie` header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawCookieJar(String);

impl RawCookieJar {
    pub fn new(jar: impl Into<String>) -> Self {
        Self(jar.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CookieSource for RawCookieJar {
    fn read_jar(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Adapts a closure into a [`CookieSource`].
pub struct FnCookieSource<F>(F);

impl<F> FnCookieSource<F>
where
    F: Fn() -> Result<String>,
{
    pub fn new(read: F) -> Self {
        Self(read)
    }
}

impl<F> CookieSource for FnCookieSource<F>
where
    F: Fn() -> Result<String>,
{
    fn read_jar(&self) -> Result<String> {
        (self.0)()
    }
}

/// In-memory jar that keeps cookies in the order they were first set, the
/// way `document.cookie` lists them.
#[derive(Debug, Default, Clone)]
pub struct SessionCookieJar {
    cookies: Vec<(String, String)>,
}

impl SessionCookieJar {
    /// Sets `name`, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.cookies.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.cookies.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.cookies.iter().position(|(existing, _)| existing == name)?;
        Some(self.cookies.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Renders the jar as `name=value` pairs joined by `"; "`.
    pub fn render(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl CookieSource for SessionCookieJar {
    fn read_jar(&self) -> Result<String> {
        Ok(self.render())
    }
}
