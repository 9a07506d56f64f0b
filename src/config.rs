use std::collections::HashMap;
use std::path::PathBuf;

/// Name of the DuckDB table holding the loaded price records.
pub const PRICES_TABLE: &str = "prices";

/// Environment variable overriding the location of the source file.
pub const DATA_FILE_ENV: &str = "FUEL_FUTURES_DATA";

pub const DATA_FILE_NAME: &str = "all_fuels_data.csv";

pub const DEFAULT_FEATURE: &str = "close";
pub const DEFAULT_PERIOD: usize = 12;
pub const DEFAULT_MAX_RANGE_YEARS: u32 = 10;

/// Columns every source file must provide.
pub const REQUIRED_COLUMNS: [&str; 2] = ["date", "ticker"];

/// Display labels for the tickers shipped in the fuels dataset.
pub fn known_tickers() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("CL=F", "Crude Oil"),
        ("BZ=F", "Brent Crude Oil"),
        ("HO=F", "Heating Oil"),
        ("NG=F", "Natural Gas"),
        ("RB=F", "RBOB Gasoline"),
    ])
}

/// `./datasets/all_fuels_data.csv`, where the dashboard has always kept it.
pub fn local_data_file() -> PathBuf {
    PathBuf::from("datasets").join(DATA_FILE_NAME)
}

pub fn default_data_file() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("fuel-futures").join(DATA_FILE_NAME)
    } else {
        local_data_file()
    }
}
