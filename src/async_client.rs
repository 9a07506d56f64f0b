//! Async wrapper around [`FuturesSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs SDK operations on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! # use fuel_futures_sdk::AsyncFuturesSdk;
//! # async fn example() -> fuel_futures_sdk::Result<()> {
//! let sdk = AsyncFuturesSdk::builder()
//!     .data_file("datasets/all_fuels_data.csv")
//!     .build()
//!     .await?;
//!
//! let extremes = sdk
//!     .run(|s| s.analysis().seasonal_extremes("CL=F", "2015-01-01", "2020-12-31"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{FuturesError, Result};
use crate::models::{DecompositionRequest, DecompositionResult, SeasonalExtremes, TickerInfo};
use crate::FuturesSdk;

// ---------------------------------------------------------------------------
// AsyncFuturesSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncFuturesSdk`] instance.
#[derive(Default)]
pub struct AsyncFuturesSdkBuilder {
    data_file: Option<PathBuf>,
    max_range_years: Option<u32>,
}

impl AsyncFuturesSdkBuilder {
    /// Set the price data file.
    pub fn data_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the longest span accepted by seasonal extreme requests.
    pub fn max_range_years(mut self, years: u32) -> Self {
        self.max_range_years = Some(years);
        self
    }

    /// Build the async SDK, loading the store on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncFuturesSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = FuturesSdk::builder();
            if let Some(path) = self.data_file {
                builder = builder.data_file(path);
            }
            if let Some(years) = self.max_range_years {
                builder = builder.max_range_years(years);
            }
            let sdk = builder.build()?;
            Ok(AsyncFuturesSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| FuturesError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncFuturesSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`FuturesSdk`].
///
/// The SDK sits behind a [`Mutex`] because the DuckDB connection is not
/// `Sync`; cloning the wrapper shares the same loaded store.
#[derive(Clone)]
pub struct AsyncFuturesSdk {
    inner: Arc<Mutex<FuturesSdk>>,
}

impl AsyncFuturesSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncFuturesSdkBuilder {
        AsyncFuturesSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FuturesSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| FuturesError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| FuturesError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// List tickers asynchronously.
    pub async fn tickers(&self) -> Result<Vec<TickerInfo>> {
        self.run(|s| s.tickers().list()).await
    }

    /// Run a decomposition request asynchronously.
    pub async fn decomposition(&self, request: DecompositionRequest) -> Result<DecompositionResult> {
        self.run(move |s| s.analysis().decomposition(&request)).await
    }

    /// Compute seasonal extremes asynchronously.
    pub async fn seasonal_extremes(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<SeasonalExtremes> {
        let ticker = ticker.to_string();
        let start_date = start_date.to_string();
        let end_date = end_date.to_string();
        self.run(move |s| {
            s.analysis()
                .seasonal_extremes(&ticker, &start_date, &end_date)
        })
        .await
    }
}
