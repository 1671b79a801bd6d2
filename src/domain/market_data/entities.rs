use super::value_objects::PriceColumn;
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One element of the upstream `values` array, before numeric coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeriesRow {
    pub datetime: String,
    /// Every other column, untouched (`open`, `high`, ..., plus anything new)
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl RawSeriesRow {
    pub fn new(datetime: impl Into<String>) -> Self {
        Self { datetime: datetime.into(), fields: BTreeMap::new() }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

/// Domain entity - one traded interval with coerced numeric cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub datetime: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    /// Columns the dashboard does not chart but still keeps numeric
    pub extra: BTreeMap<String, Option<f64>>,
}

impl SeriesRow {
    pub fn value(&self, column: PriceColumn) -> Option<f64> {
        match column {
            PriceColumn::Open => self.open,
            PriceColumn::High => self.high,
            PriceColumn::Low => self.low,
            PriceColumn::Close => self.close,
            PriceColumn::Volume => self.volume,
        }
    }

    /// All four prices, when none of them is missing
    pub fn ohlc(&self) -> Option<(f64, f64, f64, f64)> {
        Some((self.open?, self.high?, self.low?, self.close?))
    }
}

/// Domain entity - the fetched window, newest row first as the provider sends it
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeriesTable {
    rows: Vec<SeriesRow>,
}

impl SeriesTable {
    pub fn new(rows: Vec<SeriesRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep at most `max_rows` rows (the newest ones)
    pub fn truncate(&mut self, max_rows: usize) {
        self.rows.truncate(max_rows);
    }

    pub fn column(&self, column: PriceColumn) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.value(column)).collect()
    }

    /// Non-missing values of a column, in table order
    pub fn valid_values(&self, column: PriceColumn) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row.value(column)).collect()
    }

    pub fn datetimes(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.datetime.clone()).collect()
    }

    /// Row 0: the most recent bar
    pub fn latest(&self) -> DomainResult<&SeriesRow> {
        self.rows.first().ok_or(DomainError::EmptySeries)
    }

    /// Close of the most recent bar; `Ok(None)` when that cell is missing
    pub fn latest_close(&self) -> DomainResult<Option<f64>> {
        Ok(self.latest()?.close)
    }

    /// `(first, last)` datetime in table order
    pub fn time_range(&self) -> DomainResult<(&str, &str)> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => Ok((first.datetime.as_str(), last.datetime.as_str())),
            _ => Err(DomainError::EmptySeries),
        }
    }
}
