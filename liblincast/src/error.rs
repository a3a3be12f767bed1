//! Error types for Lincast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LincastError>;

#[derive(Error, Debug)]
pub enum LincastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LinkedIn API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LincastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LincastError::InvalidInput(_) => 3,
            LincastError::Api(ApiError::EmptyContent) => 3,
            LincastError::Api(ApiError::ContentTooLong { .. }) => 3,
            LincastError::Api(ApiError::CredentialMissing) => 2,
            LincastError::Api(ApiError::ValidationFailed(_)) => 2,
            LincastError::Api(_) => 1,
            LincastError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(std::io::Error),

    #[error("Failed to write config file: {0}")]
    WriteError(std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Failures of the resolve-and-publish flow.
///
/// `ValidationFailed` (the user-info endpoint rejected the token) and
/// `Transport` (the request never completed) are distinct variants so
/// callers can tell an expired token from a dead network. Both count as
/// "token not valid" for callers that only care about that.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("No LinkedIn access token configured")]
    CredentialMissing,

    #[error("Token validation failed: {0}")]
    ValidationFailed(String),

    #[error("Publish attempted without a resolved identity")]
    IdentityMissing,

    #[error("Post content is empty")]
    EmptyContent,

    #[error("Post content exceeds the {limit} character limit (current: {length} characters)")]
    ContentTooLong { length: usize, limit: usize },

    #[error("Publish rejected with unexpected status {status}")]
    PublishFailed { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),
}
