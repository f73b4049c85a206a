use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompaniesError {
    #[error("{status} for url: {url}")]
    UpstreamError {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Malformed response from {url}: {source}")]
    DecodeError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CompaniesError {
    /// HTTP status the request handler answers with when this error ends a request.
    pub fn status_code(&self) -> u16 {
        match self {
            CompaniesError::UpstreamError { .. } => 502,
            _ => 500,
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, CompaniesError::UpstreamError { .. })
    }
}

pub type Result<T> = std::result::Result<T, CompaniesError>;
