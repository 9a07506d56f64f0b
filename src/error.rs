#[derive(Debug, thiserror::Error)]
pub enum FuturesError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Insufficient data: decomposition needs {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Date range too large: {start} to {end} exceeds {max_years} years")]
    DateRangeTooLarge {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
        max_years: u32,
    },

    #[error("Series '{feature}' has {count} missing value(s) and cannot be decomposed")]
    MissingValues { feature: String, count: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, FuturesError>;
