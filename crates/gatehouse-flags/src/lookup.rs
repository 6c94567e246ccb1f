use crate::error::Result;

/// Finds the value of cookie `name` in a `document.cookie`-style jar.
///
/// The whole jar is percent-decoded before it is split on `;`, so an encoded
/// `%3B` inside a value also acts as a separator. Only leading spaces are
/// stripped from each segment; the value after `name=` is returned verbatim.
/// The first matching segment wins.
///
/// Returns `Ok(Some(""))` for `name=` and `Ok(None)` when no segment matches.
pub fn lookup_cookie(jar: &str, name: &str) -> Result<Option<String>> {
    let decoded = urlencoding::decode(jar)?;
    let prefix = format!("{name}=");

    let found = decoded
        .split(';')
        .map(|segment| segment.trim_start_matches(' '))
        .find_map(|segment| segment.strip_prefix(prefix.as_str()))
        .map(str::to_owned);

    tracing::debug!(
        target: "gatehouse_flags",
        cookie = name,
        found = found.is_some(),
        value_len = found.as_deref().map_or(0, str::len),
        "cookie lookup"
    );
    Ok(found)
}
