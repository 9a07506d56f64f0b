//! Fuel futures SDK for Rust.
//!
//! Loads a static file of daily OHLCV records for oil, gas and other fuel
//! futures into an in-process DuckDB table once, then serves date-range
//! series and seasonal analyses (additive decomposition and seasonal
//! extremes) over it.
//!
//! # Quick start
//!
//! ```no_run
//! use fuel_futures_sdk::{DecompositionRequest, FuturesSdk};
//!
//! let sdk = FuturesSdk::builder()
//!     .data_file("datasets/all_fuels_data.csv")
//!     .build()
//!     .unwrap();
//!
//! // Closing prices for a line chart
//! let series = sdk.prices().filter("CL=F", "2020-01-01", "2022-12-31", "close").unwrap();
//!
//! // Four-panel decomposition
//! let request = DecompositionRequest::new("CL=F", "2020-01-01", "2022-12-31").unwrap();
//! let decomposition = sdk.analysis().decomposition(&request).unwrap();
//!
//! // Calendar heatmap input
//! let extremes = sdk.analysis().seasonal_extremes("NG=F", "2018-01-01", "2022-12-31").unwrap();
//! ```

pub mod analysis;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod queries;
pub mod source;
pub mod sql_builder;

pub use analysis::RangePolicy;
#[cfg(feature = "async")]
pub use async_client::AsyncFuturesSdk;
pub use connection::Connection;
pub use error::{FuturesError, Result};
pub use models::{
    DecompositionRequest, DecompositionResult, ExtremeKind, FilteredSeries, Observation,
    PriceRecord, SeasonalExtreme, SeasonalExtremes, TickerInfo, TickerSummary,
};
pub use source::{DataSource, SourceFormat};
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// FuturesSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`FuturesSdk`] instance.
///
/// Use [`FuturesSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](FuturesSdkBuilder::build) to load the data.
pub struct FuturesSdkBuilder {
    data_file: Option<PathBuf>,
    max_range_years: u32,
}

impl Default for FuturesSdkBuilder {
    fn default() -> Self {
        Self {
            data_file: None,
            max_range_years: config::DEFAULT_MAX_RANGE_YEARS,
        }
    }
}

impl FuturesSdkBuilder {
    /// Set the price data file (CSV, gzip CSV or parquet).
    ///
    /// If not set, the `FUEL_FUTURES_DATA` environment variable is used,
    /// then `./datasets/all_fuels_data.csv`, then the platform data directory
    /// (e.g. `~/.local/share/fuel-futures/all_fuels_data.csv` on Linux).
    pub fn data_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the longest span, in calendar years, accepted by seasonal
    /// extreme requests. Defaults to 10.
    pub fn max_range_years(mut self, years: u32) -> Self {
        self.max_range_years = years;
        self
    }

    /// Resolve the data file and load it into an in-memory DuckDB table.
    ///
    /// This is the only point where the SDK reads from disk.
    pub fn build(self) -> Result<FuturesSdk> {
        let source = DataSource::new(self.data_file)?;
        let conn = Connection::open(&source)?;
        Ok(FuturesSdk {
            conn,
            source,
            policy: RangePolicy::new(self.max_range_years),
        })
    }
}

// ---------------------------------------------------------------------------
// FuturesSdk
// ---------------------------------------------------------------------------

/// The main entry point of the SDK.
///
/// Owns the loaded price store and exposes query interfaces as lightweight
/// borrowing wrappers. The store is never modified after
/// [`build()`](FuturesSdkBuilder::build).
pub struct FuturesSdk {
    conn: Connection,
    source: DataSource,
    policy: RangePolicy,
}

impl FuturesSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> FuturesSdkBuilder {
        FuturesSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the price query interface (range filter, line series, records).
    pub fn prices(&self) -> queries::prices::PriceQuery<'_> {
        queries::prices::PriceQuery::new(&self.conn)
    }

    /// Access the ticker listing and overview interface.
    pub fn tickers(&self) -> queries::tickers::TickerQuery<'_> {
        queries::tickers::TickerQuery::new(&self.conn)
    }

    /// Access the seasonal analysis interface.
    ///
    /// Seasonal extreme requests are checked against the configured
    /// date-range limit.
    pub fn analysis(&self) -> queries::analysis::AnalysisQuery<'_> {
        queries::analysis::AnalysisQuery::new(&self.conn, self.policy)
    }

    // -- Metadata and utility methods --------------------------------------

    /// Number of price records loaded.
    pub fn row_count(&self) -> Result<usize> {
        self.conn.row_count(config::PRICES_TABLE)
    }

    /// The file the store was loaded from.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Execute a raw SQL query against the DuckDB database.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for FuturesSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FuturesSdk(source={}, tables=[{}], max_range_years={})",
            self.source,
            self.conn.tables().join(", "),
            self.policy.max_years
        )
    }
}
