use axum::routing::get;
use axum::{Json, Router};
use sensorlink_api::models::*;
use sensorlink_api::restful::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(super::post_reading, super::get_sensor, super::get_history),
    components(schemas(
        Reading,
        ReadingPayload,
        LogEntry,
        LogKind,
        SheetRow,
        SignalQuality,
        IngestResponse,
        LatestResponse,
        LogsResponse,
        LogsBody,
        LogTotals,
        HistoryResponse,
        FailureResponse
    )),
    tags(
        (name = "sensor", description = "Reading ingestion and queries"),
        (name = "history", description = "Spreadsheet backed sample history")
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    Router::new().route("/api/openapi.json", get(get_openapi))
}

async fn get_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
