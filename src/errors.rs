use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeribitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Venue rejected request: {0}")]
    VenueError(serde_json::Value),

    #[error("Malformed envelope, no result or error field: {0}")]
    ProtocolError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DeribitError>;
