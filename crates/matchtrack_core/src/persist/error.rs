use thiserror::Error;

/// Transport/permission failures of the persistence gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("match not found: {match_id}")]
    NotFound { match_id: String },

    #[error("match already exists: {match_id}")]
    AlreadyExists { match_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}
