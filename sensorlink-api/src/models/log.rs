use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::Reading;

/// Human readable layout of [`LogEntry::time`].
pub const LOG_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Reading accepted
    Success,
    /// Ingestion attempt rejected
    Error,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogKind::Success => write!(f, "success"),
            LogKind::Error => write!(f, "error"),
        }
    }
}

/// Audit record of one ingestion attempt.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local wall-clock time of the attempt
    pub time: String,
    /// Summary of the attempt
    pub message: String,
    /// Outcome of the attempt
    pub kind: LogKind,
    /// Reading stored by a successful attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Reading>,
    /// Diagnostic detail of a failed attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LogEntry {
    pub fn success(at: OffsetDateTime, reading: Reading) -> Self {
        let message = format!(
            "Reading received: temperature={}°C, humidity={}%",
            reading.temperature.as_deref().unwrap_or(super::sentinel::SENTINEL),
            reading.humidity.as_deref().unwrap_or(super::sentinel::SENTINEL),
        );

        Self {
            time: Self::format_time(at),
            message,
            kind: LogKind::Success,
            data: Some(reading),
            detail: None,
        }
    }

    pub fn failure(at: OffsetDateTime, error: impl fmt::Display, detail: Option<String>) -> Self {
        Self {
            time: Self::format_time(at),
            message: format!("Error: {error}"),
            kind: LogKind::Error,
            data: None,
            detail,
        }
    }

    fn format_time(at: OffsetDateTime) -> String {
        at.format(LOG_TIME_FORMAT).unwrap_or_else(|_| at.to_string())
    }
}
