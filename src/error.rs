use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeteoError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Upstream error: {message}")]
    Upstream { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MeteoError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        MeteoError::InvalidInput {
            message: message.into(),
        }
    }
}

pub type MeteoResult<T> = Result<T, MeteoError>;
