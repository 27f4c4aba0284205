use serde::{Deserialize, Serialize};

use super::{SignalQuality, sentinel};

/// One logged sample from the published spreadsheet.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    /// Sample date as `DD/MM/YYYY`
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String, example = "01/05/2024"))]
    pub date: Option<String>,
    /// Sample time as `HH:MM:SS`
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String, example = "08:15:00"))]
    pub time: Option<String>,
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub temperature: Option<String>,
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub humidity: Option<String>,
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub source_address: Option<String>,
    #[serde(default, with = "sentinel")]
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub signal_strength: Option<String>,
    #[serde(default)]
    pub signal_quality: SignalQuality,
}

