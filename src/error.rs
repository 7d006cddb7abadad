use thiserror::Error;

/// Application-level error surfaced by every service operation. The HTTP
/// layer maps these onto status codes; services never translate or retry.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
}

impl SurveyError {
    pub fn validation(message: impl Into<String>) -> Self {
        SurveyError::Validation(message.into())
    }
}
