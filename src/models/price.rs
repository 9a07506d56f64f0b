use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceRecord — One daily row of the store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub ticker: String,
    #[serde(default)]
    pub commodity: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

// ---------------------------------------------------------------------------
// Observation — A single dated value of one feature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// FilteredSeries — One feature of one ticker, date ascending
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredSeries {
    pub ticker: String,
    pub feature: String,
    pub points: Vec<Observation>,
}

impl FilteredSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Value on `date`, if the series has a row for it.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by(|p| p.date.cmp(&date))
            .ok()
            .and_then(|i| self.points[i].value)
    }

    /// Number of rows whose value is missing.
    pub fn missing_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_none()).count()
    }
}

// ---------------------------------------------------------------------------
// TickerInfo — Entry of the ticker listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    pub ticker: String,
    pub label: String,
    pub row_count: i64,
}

// ---------------------------------------------------------------------------
// TickerSummary — Dataset overview for one ticker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    pub ticker: String,
    pub row_count: i64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub min_close: Option<f64>,
    pub max_close: Option<f64>,
    pub avg_close: Option<f64>,
}
