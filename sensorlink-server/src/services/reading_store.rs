use std::collections::VecDeque;

use sensorlink_api::models::{LogEntry, LogKind, Reading};
use tokio::sync::Mutex;

/// Maximum number of entries retained per log.
pub const LOG_CAPACITY: usize = 50;

/// Newest-first log that forgets its oldest entries past a fixed capacity.
#[derive(Debug, Clone)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn recent(&self, limit: usize) -> Vec<T> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Consistent view of the whole store taken under one lock.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub latest: Reading,
    pub success: Vec<LogEntry>,
    pub error: Vec<LogEntry>,
    pub success_total: usize,
    pub error_total: usize,
}

#[derive(Debug)]
struct StoreInner {
    latest: Reading,
    success: BoundedLog<LogEntry>,
    error: BoundedLog<LogEntry>,
}

impl StoreInner {
    fn log(&self, kind: LogKind) -> &BoundedLog<LogEntry> {
        match kind {
            LogKind::Success => &self.success,
            LogKind::Error => &self.error,
        }
    }

    fn log_mut(&mut self, kind: LogKind) -> &mut BoundedLog<LogEntry> {
        match kind {
            LogKind::Success => &mut self.success,
            LogKind::Error => &mut self.error,
        }
    }
}

/// Process-lifetime home of the latest reading and the ingestion logs.
///
/// Every operation runs under a single mutex, so a reader never observes a
/// reading assembled from two ingestions and log eviction always drops the
/// true oldest entry.
#[derive(Debug)]
pub struct ReadingStore {
    inner: Mutex<StoreInner>,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                latest: Reading::default(),
                success: BoundedLog::new(capacity),
                error: BoundedLog::new(capacity),
            }),
        }
    }

    pub async fn latest(&self) -> Reading {
        self.inner.lock().await.latest.clone()
    }

    pub async fn set_latest(&self, reading: Reading) {
        self.inner.lock().await.latest = reading;
    }

    pub async fn append_log(&self, kind: LogKind, entry: LogEntry) {
        self.inner.lock().await.log_mut(kind).push(entry);
    }

    pub async fn logs(&self, kind: LogKind, limit: usize) -> Vec<LogEntry> {
        self.inner.lock().await.log(kind).recent(limit)
    }

    pub async fn log_len(&self, kind: LogKind) -> usize {
        self.inner.lock().await.log(kind).len()
    }

    /// Replaces the latest reading and logs the success in one step.
    pub async fn record(&self, reading: Reading, entry: LogEntry) {
        let mut inner = self.inner.lock().await;

        inner.latest = reading;
        inner.success.push(entry);
    }

    pub async fn snapshot(&self, limit: usize) -> StoreSnapshot {
        let inner = self.inner.lock().await;

        StoreSnapshot {
            latest: inner.latest.clone(),
            success: inner.success.recent(limit),
            error: inner.error.recent(limit),
            success_total: inner.success.len(),
            error_total: inner.error.len(),
        }
    }
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn entry(index: usize) -> LogEntry {
        LogEntry::failure(datetime!(2024-05-01 00:00:00 +07:00), index, None)
    }

    #[test]
    fn test_bounded_log_keeps_newest_first() {
        let mut log = BoundedLog::new(3);

        for value in 1..=5 {
            log.push(value);
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.recent(10), vec![5, 4, 3]);
        assert_eq!(log.recent(2), vec![5, 4]);
    }

    #[test]
    fn test_bounded_log_recent_does_not_consume() {
        let mut log = BoundedLog::new(2);
        assert!(log.is_empty());

        log.push("a");

        assert_eq!(log.recent(1), vec!["a"]);
        assert_eq!(log.recent(1), vec!["a"]);
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_latest_starts_empty() {
        let store = ReadingStore::new();

        let latest = store.latest().await;

        assert!(latest.is_empty());
        assert_eq!(latest, Reading::default());
    }

    #[tokio::test]
    async fn test_set_latest_replaces_whole_reading() {
        let store = ReadingStore::new();

        store
            .set_latest(Reading {
                temperature: Some("20".into()),
                source_address: Some("10.0.0.1".into()),
                ..Default::default()
            })
            .await;
        store
            .set_latest(Reading {
                humidity: Some("55".into()),
                ..Default::default()
            })
            .await;

        let latest = store.latest().await;
        assert_eq!(latest.temperature, None);
        assert_eq!(latest.source_address, None);
        assert_eq!(latest.humidity.as_deref(), Some("55"));
    }

    #[tokio::test]
    async fn test_both_logs_share_the_capacity_policy() {
        let store = ReadingStore::new();

        for index in 0..LOG_CAPACITY + 7 {
            store.append_log(LogKind::Error, entry(index)).await;
            store.append_log(LogKind::Success, entry(index)).await;
        }

        for kind in [LogKind::Success, LogKind::Error] {
            assert_eq!(store.log_len(kind).await, LOG_CAPACITY);

            let logs = store.logs(kind, LOG_CAPACITY).await;
            assert_eq!(logs.first().unwrap().message, format!("Error: {}", LOG_CAPACITY + 6));
            assert_eq!(logs.last().unwrap().message, "Error: 7");
        }
    }

    #[tokio::test]
    async fn test_snapshot_limits_entries_but_reports_totals() {
        let store = ReadingStore::new();

        for index in 0..30 {
            store.append_log(LogKind::Success, entry(index)).await;
        }
        store.append_log(LogKind::Error, entry(99)).await;

        let snapshot = store.snapshot(20).await;

        assert_eq!(snapshot.success.len(), 20);
        assert_eq!(snapshot.success_total, 30);
        assert_eq!(snapshot.error.len(), 1);
        assert_eq!(snapshot.error_total, 1);
    }
}
