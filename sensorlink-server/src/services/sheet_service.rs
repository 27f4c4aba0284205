use std::time::Duration;

use sensorlink_api::models::{SheetRow, SignalQuality};
use sensorlink_api::restful::HistoryQuery;
use serde::Deserialize;
use serde_json::Value;
use time::macros::format_description;
use time::{Date, Month, Time};

use crate::configs::Sheet;
use crate::errors::SheetError;
use crate::services::value_text;

/// Rows returned by a history query without an explicit limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

const EXPORT_CALL: &str = "google.visualization.Query.setResponse(";
const EXPORT_TAIL: &str = ");";
const LAST_SECOND_OF_DAY: u32 = 86_399;

#[derive(Debug, Deserialize)]
struct Export {
    table: Table,
}

#[derive(Debug, Deserialize)]
struct Table {
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    c: Vec<Option<Cell>>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    #[serde(default)]
    v: Option<Value>,
    #[serde(default)]
    f: Option<String>,
}

impl Row {
    fn cell(&self, index: usize) -> Option<&Cell> {
        self.c.get(index).and_then(Option::as_ref)
    }

    /// Raw value of a column.
    fn value(&self, index: usize) -> Option<String> {
        self.cell(index)?.v.as_ref().and_then(value_text)
    }

    /// Formatted value of a column, falling back to the raw value.
    fn formatted(&self, index: usize) -> Option<String> {
        let cell = self.cell(index)?;

        cell.f
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .or_else(|| cell.v.as_ref().and_then(value_text))
    }

    fn into_sheet_row(self) -> SheetRow {
        let signal_strength = self.value(5);

        SheetRow {
            date: self.formatted(0),
            time: self.formatted(1),
            temperature: self.value(2),
            humidity: self.value(3),
            source_address: self.value(4),
            signal_quality: SignalQuality::from_strength(signal_strength.as_deref()),
            signal_strength,
        }
    }
}

/// Parses a gviz JSON export into rows, newest first.
///
/// The export wraps its JSON in a `setResponse(...)` call. The first row holds
/// the column headers and is skipped.
pub fn parse_export(text: &str) -> Result<Vec<SheetRow>, SheetError> {
    let start = text
        .find(EXPORT_CALL)
        .map(|index| index + EXPORT_CALL.len())
        .ok_or_else(|| SheetError::Malformed("missing setResponse wrapper".into()))?;
    let end = text
        .rfind(EXPORT_TAIL)
        .filter(|end| *end >= start)
        .ok_or_else(|| SheetError::Malformed("unterminated setResponse wrapper".into()))?;

    let export: Export = serde_json::from_str(&text[start..end])
        .map_err(|e| SheetError::Malformed(e.to_string()))?;

    Ok(export
        .table
        .rows
        .into_iter()
        .skip(1)
        .rev()
        .map(Row::into_sheet_row)
        .collect())
}

/// Date, time-of-day and size restrictions on history rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilter {
    pub date: Option<Date>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub limit: usize,
}

impl HistoryFilter {
    pub fn from_query(query: &HistoryQuery) -> Result<Self, SheetError> {
        let date = query
            .date
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| {
                Date::parse(text, format_description!("[year]-[month]-[day]"))
                    .map_err(|_| SheetError::InvalidFilter(format!("date {text}")))
            })
            .transpose()?;

        let start = Self::bound(query.start.as_deref(), "00")?;
        let end = Self::bound(query.end.as_deref(), "59")?;

        Ok(Self {
            date,
            start,
            end,
            limit: query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        })
    }

    fn bound(minute: Option<&str>, second: &str) -> Result<Option<u32>, SheetError> {
        let Some(minute) = minute.filter(|text| !text.is_empty()) else {
            return Ok(None);
        };

        seconds_of_day(&format!("{minute}:{second}"))
            .map(Some)
            .ok_or_else(|| SheetError::InvalidFilter(format!("time {minute}")))
    }

    pub fn is_active(&self) -> bool {
        self.date.is_some() || self.start.is_some() || self.end.is_some()
    }

    pub fn matches(&self, row: &SheetRow) -> bool {
        if let Some(date) = self.date {
            if row.date.as_deref().and_then(parse_sheet_date) != Some(date) {
                return false;
            }
        }

        if self.start.is_some() || self.end.is_some() {
            let Some(time) = row.time.as_deref().and_then(seconds_of_day) else {
                return false;
            };
            let start = self.start.unwrap_or(0);
            let end = self.end.unwrap_or(LAST_SECOND_OF_DAY);

            if time < start || time > end {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, rows: Vec<SheetRow>) -> Vec<SheetRow> {
        rows.into_iter()
            .filter(|row| self.matches(row))
            .take(self.limit)
            .collect()
    }
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            date: None,
            start: None,
            end: None,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Parses a `DD/MM/YYYY` sheet date.
fn parse_sheet_date(text: &str) -> Option<Date> {
    let mut parts = text.trim().split('/');
    let day = parts.next()?.trim().parse::<u8>().ok()?;
    let month = parts.next()?.trim().parse::<u8>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// Parses `HH:MM[:SS]` into seconds since midnight, `None` outside a 24 hour clock.
fn seconds_of_day(text: &str) -> Option<u32> {
    let mut parts = text.trim().split(':');
    let hours = parts.next()?.trim().parse::<u8>().ok()?;
    let minutes = parts.next()?.trim().parse::<u8>().ok()?;
    let seconds = match parts.next() {
        Some(seconds) => seconds.trim().parse::<u8>().ok()?,
        None => 0,
    };

    if parts.next().is_some() {
        return None;
    }

    let (hours, minutes, seconds) = Time::from_hms(hours, minutes, seconds).ok()?.as_hms();

    Some(u32::from(hours) * 3600 + u32::from(minutes) * 60 + u32::from(seconds))
}

pub struct SheetService {
    client: reqwest::Client,
    sheet: Sheet,
}

impl SheetService {
    pub fn new(sheet: Sheet) -> Result<Self, SheetError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, sheet })
    }

    pub fn export_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq?tqx=out:json&sheet={}",
            self.sheet.base_url.trim_end_matches('/'),
            self.sheet.spreadsheet_id,
            self.sheet.sheet_name,
        )
    }

    pub async fn fetch(&self) -> Result<Vec<SheetRow>, SheetError> {
        let url = self.export_url();
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SheetError::Status(response.status()));
        }

        let text = response.text().await?;
        let rows = parse_export(&text)?;

        tracing::debug!(rows = rows.len(), "fetched spreadsheet export from {url}");

        Ok(rows)
    }
}
