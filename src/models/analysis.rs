use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::Result;

// ---------------------------------------------------------------------------
// DecompositionRequest — Inputs of the decomposition driver
// ---------------------------------------------------------------------------

/// Explicit request for a seasonal decomposition of one ticker's feature.
///
/// Deserializes from `{"ticker", "start_date", "end_date"}` with `feature`
/// defaulting to `close` and `period` to 12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionRequest {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_feature")]
    pub feature: String,
    #[serde(default = "default_period")]
    pub period: usize,
}

fn default_feature() -> String {
    config::DEFAULT_FEATURE.to_string()
}

fn default_period() -> usize {
    config::DEFAULT_PERIOD
}

impl DecompositionRequest {
    /// Build a request from ISO `YYYY-MM-DD` date strings.
    pub fn new(ticker: &str, start_date: &str, end_date: &str) -> Result<Self> {
        Ok(Self {
            ticker: ticker.to_string(),
            start_date: parse_date(start_date)?,
            end_date: parse_date(end_date)?,
            feature: default_feature(),
            period: default_period(),
        })
    }

    pub fn feature(mut self, feature: &str) -> Self {
        self.feature = feature.to_string();
        self
    }

    pub fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}

// ---------------------------------------------------------------------------
// DecompositionResult — Aligned trend / seasonal / residual / observed
// ---------------------------------------------------------------------------

/// Additive decomposition of a date-indexed series.
///
/// All vectors have the same length as `dates`. `trend` and `residual` are
/// `None` on the first and last `period / 2` rows, where the centred moving
/// average has no full window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    pub ticker: String,
    pub feature: String,
    pub period: usize,
    pub dates: Vec<NaiveDate>,
    pub observed: Vec<f64>,
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
}

impl DecompositionResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The seasonal component paired with its dates.
    pub fn seasonal_points(&self) -> Vec<(NaiveDate, f64)> {
        self.dates
            .iter()
            .copied()
            .zip(self.seasonal.iter().copied())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SeasonalExtremes — Rows at the seasonal minimum and maximum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremeKind {
    Max,
    Min,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalExtreme {
    pub date: NaiveDate,
    pub seasonal_value: f64,
    pub kind: ExtremeKind,
}

/// Max-tagged rows first, then min-tagged rows, each in date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalExtremes {
    pub records: Vec<SeasonalExtreme>,
}

impl SeasonalExtremes {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn maxima(&self) -> impl Iterator<Item = &SeasonalExtreme> {
        self.records.iter().filter(|r| r.kind == ExtremeKind::Max)
    }

    pub fn minima(&self) -> impl Iterator<Item = &SeasonalExtreme> {
        self.records.iter().filter(|r| r.kind == ExtremeKind::Min)
    }
}
