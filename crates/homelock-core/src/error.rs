use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Addressing errors
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    #[error("Server address not set")]
    MissingAddress,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
