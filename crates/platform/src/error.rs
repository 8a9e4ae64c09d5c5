use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("platform returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("unexpected response shape: {0}")]
    Decode(String),
}
