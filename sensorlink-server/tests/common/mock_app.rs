use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, Response, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use sensorlink_server::app::create_router;
use sensorlink_server::configs::Sheet;
use sensorlink_server::services::ReadingStore;
use sensorlink_server::tests::ManualClock;

pub struct MockApp {
    pub router: Router,
    pub store: Arc<ReadingStore>,
    pub clock: Arc<ManualClock>,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_sheet(None)
    }

    pub fn with_sheet(sheet: Option<Sheet>) -> Self {
        let store = Arc::new(ReadingStore::new());
        let clock = Arc::new(ManualClock::default());
        let router = create_router(store.clone(), clock.clone(), sheet).unwrap();

        Self {
            router,
            store,
            clock,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn post_reading(&self, body: impl Into<Body>) -> (StatusCode, Value) {
        self.send_json(
            Request::builder()
                .method(Method::POST)
                .uri("/api/sensor")
                .header("Content-Type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }
}
