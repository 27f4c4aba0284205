use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("No spreadsheet configured")]
    NotConfigured,

    #[error("Invalid history filter: {0}")]
    InvalidFilter(String),

    #[error("Spreadsheet request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Spreadsheet responded with status {0}")]
    Status(StatusCode),

    #[error("Malformed spreadsheet export: {0}")]
    Malformed(String),
}

impl SheetError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SheetError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            SheetError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            SheetError::Request(_) => StatusCode::BAD_GATEWAY,
            SheetError::Status(_) => StatusCode::BAD_GATEWAY,
            SheetError::Malformed(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
