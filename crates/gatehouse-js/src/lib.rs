pub mod bridge;
pub mod runtime;

pub use bridge::{JsCookieSource, JsInterop};
pub use runtime::Runtime;
