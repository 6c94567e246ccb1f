use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The jar decoded to bytes that are not valid UTF-8 (e.g. `%FF`).
    #[error("cookie jar is not valid percent-encoded UTF-8: {0}")]
    MalformedEncoding(#[from] std::string::FromUtf8Error),

    #[error("cookie jar unavailable: {reason}")]
    JarUnavailable { reason: String },
}

impl Error {
    pub fn jar_unavailable(reason: impl std::fmt::Display) -> Self {
        Self::JarUnavailable {
            reason: reason.to_string(),
        }
    }
}
