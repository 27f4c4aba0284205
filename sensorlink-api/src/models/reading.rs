use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use super::sentinel;

/// Latest known snapshot reported by a sensor device.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Temperature in Celsius, `-` when unknown
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String, example = "25.5"))]
    pub temperature: Option<String>,
    /// Relative humidity percentage, `-` when unknown
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String, example = "60"))]
    pub humidity: Option<String>,
    /// Network address of the reporting device
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String, example = "192.168.1.20"))]
    pub source_address: Option<String>,
    /// Wi-Fi signal strength in dBm
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String, example = "-67"))]
    pub signal_strength: Option<String>,
    /// Sample time reported by the device
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub device_timestamp: Option<OffsetDateTime>,
    /// Time the server accepted the reading
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub received_at: Option<OffsetDateTime>,
    /// Device uptime in seconds
    #[serde(default)]
    pub uptime_seconds: u64,
}

impl Reading {
    pub fn is_empty(&self) -> bool {
        self.received_at.is_none()
    }
}

/// Body posted by a sensor device.
///
/// Every field is optional and untyped; firmware builds in the field send
/// numbers for some values and strings for others. The Indonesian keys of the
/// first firmware revision are accepted as aliases. When a body carries both
/// spellings of a field the English key wins.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_timestamp: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<Value>,
}

impl ReadingPayload {
    /// Takes a field by its English key, then by its firmware alias. Nulls count as absent.
    fn take(fields: &mut Map<String, Value>, key: &str, alias: &str) -> Option<Value> {
        let primary = fields.remove(key).filter(|value| !value.is_null());
        let fallback = fields.remove(alias).filter(|value| !value.is_null());

        primary.or(fallback)
    }
}

impl From<Map<String, Value>> for ReadingPayload {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            temperature: Self::take(&mut fields, "temperature", "suhu"),
            humidity: Self::take(&mut fields, "humidity", "kelembapan"),
            source_address: Self::take(&mut fields, "sourceAddress", "ip"),
            signal_strength: Self::take(&mut fields, "signalStrength", "rssi"),
            device_timestamp: Self::take(&mut fields, "deviceTimestamp", "timestamp"),
            uptime_seconds: Self::take(&mut fields, "uptimeSeconds", "uptime"),
        }
    }
}

impl<'de> Deserialize<'de> for ReadingPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(Self::from)
    }
}
