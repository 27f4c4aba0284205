use std::sync::Arc;

use sensorlink_api::models::sentinel::SENTINEL;
use sensorlink_api::models::{LogEntry, LogKind, Reading, ReadingPayload};
use serde_json::{Number, Value};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::errors::IngestError;
use crate::services::{Clock, ReadingStore};

const LOCAL_TIMESTAMP_FORMATS: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
];

/// Outcome of an accepted reading.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub reading: Reading,
    pub received_at: OffsetDateTime,
}

pub struct IngestService {
    store: Arc<ReadingStore>,
    clock: Arc<dyn Clock>,
}

impl IngestService {
    pub fn new(store: Arc<ReadingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Decodes a posted body and makes it the latest reading.
    ///
    /// A body that cannot be decoded is recorded in the error log and leaves
    /// the latest reading untouched.
    pub async fn ingest(&self, body: &[u8]) -> Result<Ingested, IngestError> {
        let received_at = self.clock.now();

        let payload = match Self::decode(body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("rejected reading: {e}");

                let entry = LogEntry::failure(received_at, &e, e.detail());
                self.store.append_log(LogKind::Error, entry).await;

                return Err(e);
            }
        };

        let reading = Self::normalize(payload, received_at);
        let entry = LogEntry::success(received_at, reading.clone());

        self.store.record(reading.clone(), entry).await;

        tracing::info!(
            temperature = reading.temperature.as_deref().unwrap_or(SENTINEL),
            humidity = reading.humidity.as_deref().unwrap_or(SENTINEL),
            source = reading.source_address.as_deref().unwrap_or(SENTINEL),
            "reading accepted"
        );

        Ok(Ingested {
            reading,
            received_at,
        })
    }

    /// Parses a raw body into the untyped payload.
    ///
    /// An empty body is read as an empty object so every field falls back to
    /// its default.
    pub fn decode(body: &[u8]) -> Result<ReadingPayload, IngestError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ReadingPayload::default());
        }

        match serde_json::from_slice::<Value>(body).map_err(IngestError::InvalidJson)? {
            Value::Object(fields) => Ok(ReadingPayload::from(fields)),
            other => Err(IngestError::NotAnObject(json_kind(&other))),
        }
    }

    /// Maps the untyped payload onto a reading, field by field.
    pub fn normalize(payload: ReadingPayload, received_at: OffsetDateTime) -> Reading {
        let device_timestamp = payload
            .device_timestamp
            .and_then(|value| timestamp_field(value, received_at.offset()))
            .unwrap_or(received_at);

        Reading {
            temperature: payload.temperature.as_ref().and_then(value_text),
            humidity: payload.humidity.as_ref().and_then(value_text),
            source_address: payload.source_address.as_ref().and_then(value_text),
            signal_strength: payload.signal_strength.as_ref().and_then(value_text),
            device_timestamp: Some(device_timestamp),
            received_at: Some(received_at),
            uptime_seconds: payload.uptime_seconds.as_ref().map_or(0, uptime_field),
        }
    }
}

/// Text form of a scalar JSON value, `None` for anything that reads as absent.
///
/// Numeric zero reads as absent; the string `"0"` does not.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty() && text != SENTINEL).then(|| text.to_string())
        }
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Number(number) => Some(number_text(number)),
        _ => None,
    }
}

/// Renders whole floats without a fractional part, `60.0` becomes `60`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e15 => {
            format!("{}", float as i64)
        }
        _ => number.to_string(),
    }
}

fn uptime_field(value: &Value) -> u64 {
    let seconds = match value {
        Value::Number(number) => number.as_u64().or_else(|| number.as_f64().and_then(whole_seconds)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_seconds))
        }
        _ => None,
    };

    seconds.unwrap_or(0)
}

fn whole_seconds(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

/// Accepts RFC 3339, or a timestamp without offset read in the reference offset.
fn timestamp_field(value: Value, offset: UtcOffset) -> Option<OffsetDateTime> {
    let text = match value {
        Value::String(text) => text,
        other => {
            tracing::warn!("ignoring non-string device timestamp: {other}");
            return None;
        }
    };
    let text = text.trim();

    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(timestamp);
    }

    let local = LOCAL_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(text, *format).ok())
        .map(|timestamp| timestamp.assume_offset(offset));

    if local.is_none() && !text.is_empty() {
        tracing::warn!("ignoring unparsable device timestamp: {text}");
    }

    local
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
