use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("request body is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl IngestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::InvalidJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
            IngestError::NotAnObject(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Underlying parser message, kept out of the HTTP response.
    pub fn detail(&self) -> Option<String> {
        match self {
            IngestError::InvalidJson(e) => Some(e.to_string()),
            IngestError::NotAnObject(_) => None,
        }
    }
}
