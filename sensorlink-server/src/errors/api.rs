use axum::http::Method;

use super::{IngestError, SheetError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Ingestion error: {0}")]
    IngestError(#[from] IngestError),

    #[error("History error: {0}")]
    SheetError(#[from] SheetError),

    #[error("Method {0} not supported")]
    UnsupportedMethod(Method),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
