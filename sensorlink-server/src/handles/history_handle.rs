use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use sensorlink_api::restful::*;

use crate::errors::{ApiError, SheetError};
use crate::services::{Clock, HistoryFilter, SheetService};

#[derive(Clone)]
pub struct HistoryState {
    pub sheet_service: Option<Arc<SheetService>>,
    pub clock: Arc<dyn Clock>,
}

pub fn history_router(history_state: HistoryState) -> Router {
    Router::new()
        .route("/api/history", get(get_history))
        .with_state(history_state)
}

#[utoipa::path(
    get,
    path = "/api/history",
    tag = "history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Logged samples, newest first", body = HistoryResponse),
        (status = 400, description = "Invalid filter", body = FailureResponse),
        (status = 502, description = "Spreadsheet unreachable or malformed", body = FailureResponse),
        (status = 503, description = "No spreadsheet configured", body = FailureResponse)
    )
)]
pub async fn get_history(
    State(state): State<HistoryState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let filter = HistoryFilter::from_query(&query)?;
    let sheet_service = state
        .sheet_service
        .as_ref()
        .ok_or(SheetError::NotConfigured)?;

    let rows = sheet_service.fetch().await.inspect_err(|e| {
        tracing::warn!("history fetch failed: {e}");
    })?;
    let total = rows.len();

    Ok(Json(HistoryResponse {
        success: true,
        data: filter.apply(rows),
        total,
        server_time: state.clock.now(),
    }))
}
