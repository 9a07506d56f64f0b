//! Location and format of the static price file backing the store.
//!
//! The file is resolved once when the SDK is built. Resolution order is an
//! explicit path, then the `FUEL_FUTURES_DATA` environment variable, then
//! `./datasets/all_fuels_data.csv`, then the platform data directory.

use crate::config;
use crate::error::{FuturesError, Result};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// File formats DuckDB can read the store from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Plain or gzip-compressed CSV with a header row.
    Csv,
    Parquet,
}

impl SourceFormat {
    /// Guess the format from the file extension. Anything that is not
    /// parquet is read as CSV (DuckDB decompresses `.csv.gz` on its own).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => SourceFormat::Parquet,
            _ => SourceFormat::Csv,
        }
    }

    /// DuckDB table function reading a file of this format.
    pub fn reader(&self, path_str: &str) -> String {
        match self {
            SourceFormat::Csv => format!("read_csv_auto('{}', header = true)", path_str),
            SourceFormat::Parquet => format!("read_parquet('{}')", path_str),
        }
    }
}

/// A resolved, existing source file of daily price records.
#[derive(Debug, Clone)]
pub struct DataSource {
    /// Absolute or working-directory-relative path of the file.
    pub path: PathBuf,
    pub format: SourceFormat,
}

impl DataSource {
    /// Resolve the source file.
    ///
    /// If `path` is `None`, falls back to the environment variable and the
    /// default locations. Fails with `NotFound` if the resolved file does not
    /// exist.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => Self::discover(),
        };

        if !path.is_file() {
            return Err(FuturesError::NotFound(format!(
                "Price data file {} does not exist",
                path.display()
            )));
        }

        let format = SourceFormat::from_path(&path);
        log::debug!("Resolved price data file {} ({:?})", path.display(), format);
        Ok(Self { path, format })
    }

    fn discover() -> PathBuf {
        if let Ok(p) = env::var(config::DATA_FILE_ENV) {
            if !p.trim().is_empty() {
                return PathBuf::from(p);
            }
        }
        let local = config::local_data_file();
        if local.is_file() {
            return local;
        }
        config::default_data_file()
    }

    /// Path with forward slashes and escaped quotes, safe to embed in a
    /// DuckDB string literal.
    pub fn sql_path(&self) -> String {
        self.path
            .to_string_lossy()
            .replace('\\', "/")
            .replace('\'', "''")
    }

    /// Table function expression reading this file.
    pub fn reader(&self) -> String {
        self.format.reader(&self.sql_path())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
