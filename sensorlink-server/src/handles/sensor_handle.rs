use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use sensorlink_api::models::ReadingPayload;
use sensorlink_api::restful::*;

use crate::errors::ApiError;
use crate::services::{IngestService, QueryService};

#[derive(Clone)]
pub struct SensorState {
    pub ingest_service: Arc<IngestService>,
    pub query_service: Arc<QueryService>,
}

pub fn sensor_router(sensor_state: SensorState) -> Router {
    Router::new()
        .route(
            "/api/sensor",
            get(get_sensor)
                .post(post_reading)
                .fallback(unsupported_method),
        )
        .with_state(sensor_state)
}

#[utoipa::path(
    post,
    path = "/api/sensor",
    tag = "sensor",
    request_body = ReadingPayload,
    responses(
        (status = 200, description = "Reading accepted", body = IngestResponse),
        (status = 500, description = "Body could not be processed", body = FailureResponse)
    )
)]
pub async fn post_reading(
    State(state): State<SensorState>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    let ingested = state.ingest_service.ingest(&body).await?;

    Ok(Json(IngestResponse {
        success: true,
        message: "Reading accepted".to_string(),
        data: ingested.reading,
        server_time: ingested.received_at,
    }))
}

#[utoipa::path(
    get,
    path = "/api/sensor",
    tag = "sensor",
    params(SensorQuery),
    responses(
        (status = 200, description = "Latest reading, or the ingestion logs when action=logs", body = LatestResponse)
    )
)]
pub async fn get_sensor(
    State(state): State<SensorState>,
    Query(query): Query<SensorQuery>,
) -> Response {
    if query.wants_logs() {
        Json(state.query_service.logs().await).into_response()
    } else {
        Json(state.query_service.latest().await).into_response()
    }
}

async fn unsupported_method(method: Method) -> ApiError {
    tracing::debug!("rejected {method} on sensor endpoint");

    ApiError::UnsupportedMethod(method)
}
