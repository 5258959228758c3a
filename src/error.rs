use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Failures surfaced by `send` and `load_more`. Any of them means nothing was
/// transmitted, so the whole call can be retried.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("not connected to the chat server")]
    NotConnected,
    #[error("thread has no more messages to load")]
    NoMoreMessages,
    #[error("oldest message date is unknown")]
    InvalidOldestDate,
    #[error("missing parameter: {0}")]
    MissingParameter(String),
    #[error("server error: status {status}")]
    ServerError { status: u16 },
    #[error("attachment upload incomplete")]
    AttachmentError,
    #[error("no such file: {0}")]
    NoSuchFile(String),
    #[error("encoding error")]
    Encoding(#[from] serde_json::Error),
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error("http error")]
    Http(#[from] reqwest::Error),
}

impl ChatError {
    pub fn missing(name: impl Into<String>) -> Self {
        ChatError::MissingParameter(name.into())
    }
}
