//! Shared test fixtures for the fuel futures SDK integration tests.
//!
//! Provides `setup_sample_sdk()` which writes a small CSV of daily records
//! to a temp directory and loads it through the public builder.

#![allow(dead_code)]

use chrono::{Months, NaiveDate};
use fuel_futures_sdk::FuturesSdk;
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;

pub const HEADER: &str = "ticker,commodity,date,open,high,low,close,volume";

/// Number of monthly `CL=F` rows in the sample data.
pub const CL_ROWS: usize = 36;

/// Row index of the `HO=F` record with no closing price.
pub const HO_MISSING_ROW: usize = 10;

/// Injected linear trend of the `CL=F` close.
pub fn cl_trend(i: usize) -> f64 {
    50.0 + 0.5 * i as f64
}

/// Injected period-12 sinusoid of the `CL=F` close. Peaks at position 3,
/// bottoms at position 9.
pub fn cl_seasonal(i: usize) -> f64 {
    5.0 * (2.0 * PI * (i % 12) as f64 / 12.0).sin()
}

pub fn cl_close(i: usize) -> f64 {
    cl_trend(i) + cl_seasonal(i)
}

/// First of the month, `i` months after January 2015.
pub fn cl_date(i: usize) -> NaiveDate {
    date(2015, 1, 1) + Months::new(i as u32)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Sample dataset:
///
/// - `CL=F`: 36 monthly rows from 2015-01-01, linear trend + sinusoid,
///   written newest first so loading order differs from date order.
/// - `NG=F`: 5 daily rows, 2020-01-01 to 2020-01-05, close 2.0 .. 2.4.
/// - `HO=F`: 30 monthly rows from 2016-01-01 with one missing close.
pub fn sample_csv() -> String {
    let mut csv = String::new();
    writeln!(csv, "{}", HEADER).unwrap();

    for i in (0..CL_ROWS).rev() {
        let close = cl_close(i);
        writeln!(
            csv,
            "CL=F,Crude Oil,{},{},{},{},{},{}",
            cl_date(i),
            close - 1.0,
            close + 2.0,
            close - 2.0,
            close,
            1000 + i
        )
        .unwrap();

        if i < 5 {
            let ng_close = 2.0 + 0.1 * i as f64;
            writeln!(
                csv,
                "NG=F,Natural Gas,{},{},{},{},{},{}",
                date(2020, 1, 1 + i as u32),
                ng_close,
                ng_close + 0.05,
                ng_close - 0.05,
                ng_close,
                500 + i
            )
            .unwrap();
        }
    }

    for i in 0..30 {
        let d = date(2016, 1, 1) + Months::new(i as u32);
        let close = if i == HO_MISSING_ROW {
            String::new()
        } else {
            format!("{}", 1.5 + 0.01 * i as f64)
        };
        writeln!(csv, "HO=F,Heating Oil,{},1.5,1.6,1.4,{},{}", d, close, 200 + i).unwrap();
    }

    csv
}

/// Write `contents` to a file named `name` in a fresh temp directory.
///
/// Returns the directory (keep it alive for the test) and the file path.
pub fn write_data_file(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (tmp_dir, path)
}

/// Build an SDK over arbitrary CSV contents.
pub fn setup_sdk_from_csv(contents: &str) -> (FuturesSdk, tempfile::TempDir) {
    let (tmp_dir, path) = write_data_file("prices.csv", contents);
    let sdk = FuturesSdk::builder().data_file(&path).build().unwrap();
    (sdk, tmp_dir)
}

/// Build an SDK over the sample dataset.
///
/// Returns `(FuturesSdk, tempfile::TempDir)`. The caller should keep the
/// `TempDir` alive for the duration of the test.
pub fn setup_sample_sdk() -> (FuturesSdk, tempfile::TempDir) {
    setup_sdk_from_csv(&sample_csv())
}

/// Monthly dates starting at `start`, one per value.
pub fn monthly_points(start: NaiveDate, values: &[f64]) -> Vec<(NaiveDate, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (start + Months::new(i as u32), v))
        .collect()
}
