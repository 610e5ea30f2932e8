use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Invalid repository reference: {0}")]
    InvalidRef(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote returned status {0}")]
    RemoteStatus(reqwest::StatusCode),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
