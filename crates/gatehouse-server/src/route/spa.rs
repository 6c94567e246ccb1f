use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serves the single page app in `directory`.
///
/// Paths without a matching file get `index.html`; the app's own router
/// resolves virtual sub-paths in the browser.
pub(crate) fn serve_dir(directory: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(directory).fallback(ServeFile::new(directory.join("index.html")))
}
