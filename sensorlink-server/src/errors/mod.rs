pub mod api;
pub mod ingest;
pub mod sheet;

pub use api::ApiError;
pub use ingest::IngestError;
pub use sheet::SheetError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sensorlink_api::restful::FailureResponse;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::IngestError(e) => (
                e.status_code(),
                "Failed to process reading".to_string(),
                Some(e.to_string()),
            ),
            ApiError::SheetError(e) => (
                e.status_code(),
                "Failed to load history".to_string(),
                Some(e.to_string()),
            ),
            ApiError::UnsupportedMethod(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not supported. Use GET or POST.".to_string(),
                None,
            ),
            ApiError::InternalError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(error_id.to_string()),
                )
            }
        };

        (status, Json(FailureResponse::new(message, error))).into_response()
    }
}
