use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::configs::{Settings, Sheet};
use crate::handles::*;
use crate::services::{Clock, IngestService, QueryService, ReadingStore, SheetService, SystemClock};

pub fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let clock = Arc::new(SystemClock::new(settings.timezone.offset()?));
    let store = Arc::new(ReadingStore::new());

    create_router(store, clock, settings.sheet.clone())
}

/// Wires the services around an existing store and clock.
pub fn create_router(
    store: Arc<ReadingStore>,
    clock: Arc<dyn Clock>,
    sheet: Option<Sheet>,
) -> anyhow::Result<Router> {
    let ingest_service = Arc::new(IngestService::new(store.clone(), clock.clone()));
    let query_service = Arc::new(QueryService::new(store, clock.clone()));
    let sheet_service = sheet.map(SheetService::new).transpose()?.map(Arc::new);

    if sheet_service.is_none() {
        tracing::info!("no spreadsheet configured, history endpoint disabled");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .merge(sensor_router(SensorState {
            ingest_service,
            query_service,
        }))
        .merge(history_router(HistoryState {
            sheet_service,
            clock,
        }))
        .merge(docs_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}
