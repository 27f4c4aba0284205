use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::{LogEntry, Reading, SignalQuality};

#[cfg_attr(feature = "docs", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "docs", into_params(parameter_in = Query))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SensorQuery {
    /// `logs` to include the ingestion logs
    pub action: Option<String>,
}

impl SensorQuery {
    pub fn wants_logs(&self) -> bool {
        self.action.as_deref() == Some("logs")
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub success: bool,
    pub message: String,
    /// Reading as stored
    pub data: Reading,
    #[serde(with = "time::serde::rfc3339")]
    pub server_time: OffsetDateTime,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestResponse {
    pub success: bool,
    pub data: Reading,
    /// Whether the reading is older than the freshness window
    pub is_stale: bool,
    pub message: String,
    pub signal_quality: SignalQuality,
    #[serde(with = "time::serde::rfc3339")]
    pub server_time: OffsetDateTime,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTotals {
    pub success: usize,
    pub error: usize,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsBody {
    /// Most recent successful attempts, newest first
    pub success: Vec<LogEntry>,
    /// Most recent failed attempts, newest first
    pub error: Vec<LogEntry>,
    /// Number of entries retained per log
    pub total: LogTotals,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsResponse {
    pub success: bool,
    pub latest_data: Reading,
    pub is_stale: bool,
    pub logs: LogsBody,
    #[serde(with = "time::serde::rfc3339")]
    pub server_time: OffsetDateTime,
}
