//! Seasonal analyses composed from the price filter and the pure routines in
//! [`crate::analysis`].

use crate::analysis::{decompose_series, extremes, RangePolicy};
use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{parse_date, DecompositionRequest, DecompositionResult, SeasonalExtremes};
use crate::queries::prices::PriceQuery;

// ---------------------------------------------------------------------------
// AnalysisQuery
// ---------------------------------------------------------------------------

/// Query interface for decompositions and seasonal extremes.
pub struct AnalysisQuery<'a> {
    conn: &'a Connection,
    policy: RangePolicy,
}

impl<'a> AnalysisQuery<'a> {
    /// Create a new `AnalysisQuery` bound to the given connection.
    pub fn new(conn: &'a Connection, policy: RangePolicy) -> Self {
        Self { conn, policy }
    }

    /// Seasonal extremes of the `close` price for a ticker between two ISO
    /// dates, for the calendar heatmap.
    ///
    /// The date span is checked against the range policy before any data is
    /// read, and the decomposition always uses a period of 12 rows.
    ///
    /// # Errors
    ///
    /// * `DateRangeTooLarge` if the span exceeds the policy limit.
    /// * `InsufficientData` if fewer than 24 rows fall in the range.
    pub fn seasonal_extremes(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<SeasonalExtremes> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        self.policy.check(start, end)?;

        let series = PriceQuery::new(self.conn).filter_dates(
            ticker,
            start,
            end,
            config::DEFAULT_FEATURE,
        )?;
        let decomposition = decompose_series(&series, config::DEFAULT_PERIOD)?;
        let result = extremes(&decomposition.seasonal_points());

        log::debug!(
            "Seasonal extremes for {} {}..{}: {} rows",
            ticker,
            start,
            end,
            result.len()
        );
        Ok(result)
    }

    /// Decompose the requested feature of a ticker over the requested range.
    ///
    /// Returns trend, seasonal, residual and the original series aligned on
    /// the same dates.
    pub fn decomposition(&self, request: &DecompositionRequest) -> Result<DecompositionResult> {
        let series = PriceQuery::new(self.conn).filter_dates(
            &request.ticker,
            request.start_date,
            request.end_date,
            &request.feature,
        )?;
        decompose_series(&series, request.period)
    }

    /// The range policy applied by [`seasonal_extremes`](Self::seasonal_extremes).
    pub fn policy(&self) -> RangePolicy {
        self.policy
    }
}
