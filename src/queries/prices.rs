//! Price queries against the `prices` table.

use chrono::NaiveDate;

use crate::config::PRICES_TABLE;
use crate::connection::Connection;
use crate::error::{FuturesError, Result};
use crate::models::{parse_date, FilteredSeries, Observation, PriceRecord};
use crate::sql_builder::{quote_ident, SqlBuilder};

// ---------------------------------------------------------------------------
// PriceQuery
// ---------------------------------------------------------------------------

/// Query interface for daily futures prices backed by the `prices` table.
pub struct PriceQuery<'a> {
    conn: &'a Connection,
}

impl<'a> PriceQuery<'a> {
    /// Create a new `PriceQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// One feature of one ticker between two ISO dates (both inclusive),
    /// ordered by date ascending.
    ///
    /// An unknown ticker or a start date after the end date yields an empty
    /// series rather than an error. `feature` must be a numeric column.
    pub fn filter(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
        feature: &str,
    ) -> Result<FilteredSeries> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        self.filter_dates(ticker, start, end, feature)
    }

    /// Same as [`filter`](Self::filter) with already parsed dates.
    pub fn filter_dates(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        feature: &str,
    ) -> Result<FilteredSeries> {
        self.feature_series(ticker, feature, Some((start, end)))
    }

    /// Full history of one feature for a ticker, for plain line charts.
    pub fn series(&self, ticker: &str, feature: &str) -> Result<FilteredSeries> {
        self.feature_series(ticker, feature, None)
    }

    /// Full price records for a ticker, optionally bounded by ISO dates.
    pub fn history(
        &self,
        ticker: &str,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<Vec<PriceRecord>> {
        let commodity = if self.conn.has_column(PRICES_TABLE, "commodity")? {
            "CAST(commodity AS VARCHAR) AS commodity"
        } else {
            "NULL AS commodity"
        };

        let mut qb = SqlBuilder::new(PRICES_TABLE);
        qb.select(&[
            "CAST(date AS VARCHAR) AS date",
            "CAST(ticker AS VARCHAR) AS ticker",
            commodity,
            "CAST(open AS DOUBLE) AS open",
            "CAST(high AS DOUBLE) AS high",
            "CAST(low AS DOUBLE) AS low",
            "CAST(close AS DOUBLE) AS close",
            "CAST(volume AS DOUBLE) AS volume",
        ]);
        qb.where_eq("ticker", ticker);
        qb.order_by(&["date ASC"]);

        if let Some(df) = date_from {
            qb.where_date_gte("date", &parse_date(df)?.to_string());
        }

        if let Some(dt) = date_to {
            qb.where_date_lte("date", &parse_date(dt)?.to_string());
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// Numeric columns that can be passed as `feature`.
    pub fn features(&self) -> Result<Vec<String>> {
        self.conn.numeric_columns(PRICES_TABLE)
    }

    fn feature_series(
        &self,
        ticker: &str,
        feature: &str,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<FilteredSeries> {
        self.require_feature(feature)?;

        let value_col = format!("CAST({} AS DOUBLE) AS value", quote_ident(feature));
        let mut qb = SqlBuilder::new(PRICES_TABLE);
        qb.select(&["CAST(date AS VARCHAR) AS date", value_col.as_str()]);
        qb.where_eq("ticker", ticker);
        qb.order_by(&["date ASC"]);

        if let Some((start, end)) = range {
            qb.where_date_between("date", &start.to_string(), &end.to_string());
        }

        let (sql, params) = qb.build();
        let points: Vec<Observation> = self.conn.execute_into(&sql, &params)?;
        log::debug!(
            "Selected {} {} rows for {} ({:?})",
            points.len(),
            feature,
            ticker,
            range
        );

        Ok(FilteredSeries {
            ticker: ticker.to_string(),
            feature: feature.to_string(),
            points,
        })
    }

    fn require_feature(&self, feature: &str) -> Result<()> {
        let numeric = self.features()?;
        if numeric.iter().any(|c| c == feature) {
            Ok(())
        } else {
            Err(FuturesError::InvalidArgument(format!(
                "Unknown feature '{}' (available: {})",
                feature,
                numeric.join(", ")
            )))
        }
    }
}
