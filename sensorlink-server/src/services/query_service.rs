use std::sync::Arc;

use sensorlink_api::models::{Reading, SignalQuality};
use sensorlink_api::restful::{LatestResponse, LogTotals, LogsBody, LogsResponse};
use time::{Duration, OffsetDateTime};

use crate::services::{Clock, ReadingStore};

/// Age after which a reading no longer counts as live.
pub const STALE_AFTER: Duration = Duration::seconds(30);

/// Entries returned per log by a logs query.
pub const LOG_QUERY_LIMIT: usize = 20;

/// A reading is stale when it was never reported or is older than [`STALE_AFTER`].
///
/// A device clock running ahead of the server yields a negative age and counts
/// as fresh.
pub fn is_stale(device_timestamp: Option<OffsetDateTime>, now: OffsetDateTime) -> bool {
    match device_timestamp {
        Some(timestamp) => now - timestamp > STALE_AFTER,
        None => true,
    }
}

fn freshness_message(reading: &Reading, stale: bool) -> String {
    if reading.is_empty() {
        "No reading received yet".to_string()
    } else if stale {
        format!(
            "Reading may be stale (older than {} seconds)",
            STALE_AFTER.whole_seconds()
        )
    } else {
        "Latest reading".to_string()
    }
}

pub struct QueryService {
    store: Arc<ReadingStore>,
    clock: Arc<dyn Clock>,
}

impl QueryService {
    pub fn new(store: Arc<ReadingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn latest(&self) -> LatestResponse {
        let reading = self.store.latest().await;
        let now = self.clock.now();
        let stale = is_stale(reading.device_timestamp, now);

        tracing::debug!(stale, "latest reading requested");

        LatestResponse {
            success: true,
            message: freshness_message(&reading, stale),
            signal_quality: SignalQuality::from_strength(reading.signal_strength.as_deref()),
            is_stale: stale,
            data: reading,
            server_time: now,
        }
    }

    pub async fn logs(&self) -> LogsResponse {
        let snapshot = self.store.snapshot(LOG_QUERY_LIMIT).await;
        let now = self.clock.now();
        let stale = is_stale(snapshot.latest.device_timestamp, now);

        tracing::debug!(
            success = snapshot.success_total,
            error = snapshot.error_total,
            "ingestion logs requested"
        );

        LogsResponse {
            success: true,
            latest_data: snapshot.latest,
            is_stale: stale,
            logs: LogsBody {
                success: snapshot.success,
                error: snapshot.error,
                total: LogTotals {
                    success: snapshot.success_total,
                    error: snapshot.error_total,
                },
            },
            server_time: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::services::IngestService;
    use crate::tests::ManualClock;

    #[test]
    fn test_staleness_window() {
        let now = datetime!(2024-05-01 08:00:00 +07:00);

        assert!(is_stale(None, now));
        assert!(is_stale(Some(now - Duration::seconds(31)), now));
        assert!(!is_stale(Some(now - Duration::seconds(30)), now));
        assert!(!is_stale(Some(now - Duration::seconds(10)), now));
        assert!(!is_stale(Some(now + Duration::seconds(10)), now));
    }

    #[test]
    fn test_staleness_compares_instants_across_offsets() {
        let now = datetime!(2024-05-01 08:00:00 +07:00);

        assert!(!is_stale(Some(datetime!(2024-05-01 00:59:50 UTC)), now));
        assert!(is_stale(Some(datetime!(2024-05-01 00:59:00 UTC)), now));
    }

    #[tokio::test]
    async fn test_latest_before_first_reading() {
        let store = Arc::new(ReadingStore::new());
        let service = QueryService::new(store, Arc::new(ManualClock::default()));

        let latest = service.latest().await;

        assert!(latest.is_stale);
        assert_eq!(latest.data, Reading::default());
        assert_eq!(latest.message, "No reading received yet");
        assert_eq!(latest.signal_quality, SignalQuality::Disconnected);
    }

    #[tokio::test]
    async fn test_latest_goes_stale_as_time_passes() {
        let store = Arc::new(ReadingStore::new());
        let clock = Arc::new(ManualClock::default());
        let ingest = IngestService::new(store.clone(), clock.clone());
        let query = QueryService::new(store, clock.clone());

        ingest.ingest(br#"{"temperature": "24", "rssi": "-55"}"#).await.unwrap();

        clock.advance(Duration::seconds(10));
        let fresh = query.latest().await;
        assert!(!fresh.is_stale);
        assert_eq!(fresh.message, "Latest reading");
        assert_eq!(fresh.signal_quality, SignalQuality::Good);

        clock.advance(Duration::seconds(21));
        let stale = query.latest().await;
        assert!(stale.is_stale);
        assert_eq!(stale.message, "Reading may be stale (older than 30 seconds)");
    }

    #[tokio::test]
    async fn test_logs_query_is_idempotent() {
        let store = Arc::new(ReadingStore::new());
        let clock = Arc::new(ManualClock::default());
        let ingest = IngestService::new(store.clone(), clock.clone());
        let query = QueryService::new(store, clock);

        for value in 0..25 {
            ingest
                .ingest(format!(r#"{{"temperature": {value}}}"#).as_bytes())
                .await
                .unwrap();
        }
        let _ = ingest.ingest(b"oops").await;

        let first = query.logs().await;
        let second = query.logs().await;

        assert_eq!(first.latest_data, second.latest_data);
        assert_eq!(first.logs.total, second.logs.total);
        assert_eq!(first.logs.total, LogTotals { success: 25, error: 1 });
        assert_eq!(first.logs.success.len(), LOG_QUERY_LIMIT);
        assert_eq!(first.logs.error.len(), 1);
        assert_eq!(
            first.logs.success[0].data.as_ref().and_then(|r| r.temperature.as_deref()),
            Some("24")
        );
    }
}
