use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("not allowed")]
    Forbidden,

    #[error("maximum reply depth reached")]
    DepthExceeded,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Wraps a store failure without leaking the backend's error type upward.
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Error::Unavailable(err.to_string())
    }
}
