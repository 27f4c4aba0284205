use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::SheetRow;

#[cfg_attr(feature = "docs", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "docs", into_params(parameter_in = Query))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Calendar day as `YYYY-MM-DD`
    pub date: Option<String>,
    /// Earliest time of day as `HH:MM`
    pub start: Option<String>,
    /// Latest time of day as `HH:MM`, inclusive of the whole minute
    pub end: Option<String>,
    /// Maximum number of rows returned
    pub limit: Option<usize>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    /// Matching rows, newest first
    pub data: Vec<SheetRow>,
    /// Number of rows in the sheet before filtering
    pub total: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub server_time: OffsetDateTime,
}
