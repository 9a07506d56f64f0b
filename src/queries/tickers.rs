//! Ticker listing and per-ticker overview queries.

use crate::config::{self, PRICES_TABLE};
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{TickerInfo, TickerSummary};
use crate::sql_builder::SqlBuilder;

/// Query interface over the distinct tickers of the `prices` table.
pub struct TickerQuery<'a> {
    conn: &'a Connection,
}

impl<'a> TickerQuery<'a> {
    /// Create a new `TickerQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Distinct ticker codes, sorted.
    pub fn codes(&self) -> Result<Vec<String>> {
        let (sql, params) = SqlBuilder::new(PRICES_TABLE)
            .select(&["CAST(ticker AS VARCHAR) AS ticker"])
            .distinct()
            .order_by(&["ticker ASC"])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        Ok(rows
            .into_iter()
            .filter_map(|r| r.get("ticker").and_then(|v| v.as_str()).map(String::from))
            .collect())
    }

    /// Every ticker with its row count and a display label.
    ///
    /// The label is the `commodity` column when the source has one, else the
    /// built-in name of a known ticker, else the ticker code itself.
    pub fn list(&self) -> Result<Vec<TickerInfo>> {
        let has_commodity = self.conn.has_column(PRICES_TABLE, "commodity")?;
        let commodity = if has_commodity {
            "CAST(ANY_VALUE(commodity) AS VARCHAR) AS commodity"
        } else {
            "NULL AS commodity"
        };

        let (sql, params) = SqlBuilder::new(PRICES_TABLE)
            .select(&[
                "CAST(ticker AS VARCHAR) AS ticker",
                "COUNT(*) AS row_count",
                commodity,
            ])
            .group_by(&["ticker"])
            .order_by(&["ticker ASC"])
            .build();

        let known = config::known_tickers();
        let rows = self.conn.execute(&sql, &params)?;
        Ok(rows
            .into_iter()
            .filter_map(|r| {
                let ticker = r.get("ticker")?.as_str()?.to_string();
                let row_count = r.get("row_count").and_then(|v| v.as_i64()).unwrap_or(0);
                let label = r
                    .get("commodity")
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .or_else(|| known.get(ticker.as_str()).map(|s| s.to_string()))
                    .unwrap_or_else(|| ticker.clone());
                Some(TickerInfo {
                    ticker,
                    label,
                    row_count,
                })
            })
            .collect())
    }

    /// Row count, date span and `close` statistics for one ticker.
    ///
    /// Returns `None` for a ticker with no rows.
    pub fn summary(&self, ticker: &str) -> Result<Option<TickerSummary>> {
        let (sql, params) = SqlBuilder::new(PRICES_TABLE)
            .select(&[
                "CAST(ticker AS VARCHAR) AS ticker",
                "COUNT(*) AS row_count",
                "CAST(MIN(date) AS VARCHAR) AS first_date",
                "CAST(MAX(date) AS VARCHAR) AS last_date",
                "CAST(MIN(close) AS DOUBLE) AS min_close",
                "CAST(MAX(close) AS DOUBLE) AS max_close",
                "CAST(AVG(close) AS DOUBLE) AS avg_close",
            ])
            .where_eq("ticker", ticker)
            .group_by(&["ticker"])
            .build();

        let rows: Vec<TickerSummary> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }
}
