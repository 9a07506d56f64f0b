//! Analysis pipeline tests: decomposition driver, seasonal extremes and the
//! date-range policy, all running against the sample store.

mod common;

use common::date;
use fuel_futures_sdk::{
    DecompositionRequest, ExtremeKind, FuturesError, FuturesSdk, RangePolicy,
};

// ---------------------------------------------------------------------------
// decomposition
// ---------------------------------------------------------------------------

#[test]
fn decomposition_recovers_injected_components() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let request = DecompositionRequest::new("CL=F", "2015-01-01", "2017-12-31").unwrap();
    let result = sdk.analysis().decomposition(&request).unwrap();

    assert_eq!(result.len(), common::CL_ROWS);
    assert_eq!(result.period, 12);
    assert_eq!(result.feature, "close");

    for i in 0..common::CL_ROWS {
        assert_eq!(result.dates[i], common::cl_date(i));
        match result.trend[i] {
            Some(t) => assert!((t - common::cl_trend(i)).abs() < 1e-6, "trend at {}", i),
            None => assert!(i < 6 || i >= 30, "trend missing at {}", i),
        }
    }

    // Peak and trough of the first cycle sit where the sinusoid put them
    let first_cycle = &result.seasonal[..12];
    let peak = (0..12)
        .max_by(|&a, &b| first_cycle[a].total_cmp(&first_cycle[b]))
        .unwrap();
    let trough = (0..12)
        .min_by(|&a, &b| first_cycle[a].total_cmp(&first_cycle[b]))
        .unwrap();
    assert_eq!(peak, 3);
    assert_eq!(trough, 9);
    for i in 0..common::CL_ROWS {
        assert!((result.seasonal[i] - common::cl_seasonal(i)).abs() < 1e-6);
    }
}

#[test]
fn decomposition_reconstructs_observed() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let request = DecompositionRequest::new("CL=F", "2015-01-01", "2017-12-31").unwrap();
    let result = sdk.analysis().decomposition(&request).unwrap();

    for i in 0..result.len() {
        if let (Some(t), Some(r)) = (result.trend[i], result.residual[i]) {
            assert!((t + result.seasonal[i] + r - result.observed[i]).abs() < 1e-6);
        }
    }
}

#[test]
fn decomposition_uses_requested_feature_and_period() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let request = DecompositionRequest::new("CL=F", "2015-01-01", "2017-12-31")
        .unwrap()
        .feature("volume")
        .period(6);
    let result = sdk.analysis().decomposition(&request).unwrap();

    assert_eq!(result.feature, "volume");
    assert_eq!(result.period, 6);
    assert_eq!(result.observed[0], 1000.0);
    assert_eq!(result.trend.iter().filter(|t| t.is_none()).count(), 6);
}

#[test]
fn decomposition_on_short_range_is_insufficient() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let request = DecompositionRequest::new("CL=F", "2015-01-01", "2016-06-30").unwrap();
    match sdk.analysis().decomposition(&request) {
        Err(FuturesError::InsufficientData { required, actual }) => {
            assert_eq!(required, 24);
            assert_eq!(actual, 18);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn decomposition_on_unknown_ticker_is_insufficient() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let request = DecompositionRequest::new("XX=F", "2015-01-01", "2017-12-31").unwrap();
    assert!(matches!(
        sdk.analysis().decomposition(&request),
        Err(FuturesError::InsufficientData { actual: 0, .. })
    ));
}

#[test]
fn decomposition_with_missing_close_fails() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let request = DecompositionRequest::new("HO=F", "2016-01-01", "2018-12-31").unwrap();
    assert!(matches!(
        sdk.analysis().decomposition(&request),
        Err(FuturesError::MissingValues { count: 1, .. })
    ));
}

// ---------------------------------------------------------------------------
// DecompositionRequest
// ---------------------------------------------------------------------------

#[test]
fn request_deserializes_with_defaults() {
    let request: DecompositionRequest = serde_json::from_value(serde_json::json!({
        "ticker": "NG=F",
        "start_date": "2019-01-01",
        "end_date": "2021-12-31"
    }))
    .unwrap();

    assert_eq!(request.feature, "close");
    assert_eq!(request.period, 12);
    assert_eq!(request.start_date, date(2019, 1, 1));
}

#[test]
fn request_rejects_malformed_dates() {
    assert!(matches!(
        DecompositionRequest::new("CL=F", "2019-13-01", "2020-01-01"),
        Err(FuturesError::InvalidDate(_))
    ));
}

// ---------------------------------------------------------------------------
// seasonal_extremes
// ---------------------------------------------------------------------------

#[test]
fn seasonal_extremes_pick_peak_and_trough_months() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let result = sdk
        .analysis()
        .seasonal_extremes("CL=F", "2015-01-01", "2017-12-31")
        .unwrap();

    let max_dates: Vec<_> = result.maxima().map(|r| r.date).collect();
    let min_dates: Vec<_> = result.minima().map(|r| r.date).collect();
    assert_eq!(max_dates, vec![date(2015, 4, 1), date(2016, 4, 1), date(2017, 4, 1)]);
    assert_eq!(min_dates, vec![date(2015, 10, 1), date(2016, 10, 1), date(2017, 10, 1)]);
    assert_eq!(result.records[0].kind, ExtremeKind::Max);
    assert_eq!(result.records[result.len() - 1].kind, ExtremeKind::Min);
    assert!((result.records[0].seasonal_value - 5.0).abs() < 1e-6);
}

#[test]
fn seasonal_extremes_need_two_periods_of_rows() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let result = sdk
        .analysis()
        .seasonal_extremes("NG=F", "2020-01-01", "2020-12-31");
    assert!(matches!(
        result,
        Err(FuturesError::InsufficientData { required: 24, actual: 5 })
    ));
}

#[test]
fn seasonal_extremes_on_inverted_range_is_insufficient() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let result = sdk
        .analysis()
        .seasonal_extremes("CL=F", "2017-12-31", "2015-01-01");
    assert!(matches!(
        result,
        Err(FuturesError::InsufficientData { actual: 0, .. })
    ));
}

// ---------------------------------------------------------------------------
// Date-range policy
// ---------------------------------------------------------------------------

#[test]
fn eleven_year_span_is_rejected_before_decomposition() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    // NG=F only has 5 rows, so reaching the decomposition would fail with
    // InsufficientData instead
    let result = sdk
        .analysis()
        .seasonal_extremes("NG=F", "2010-01-01", "2021-01-01");
    match result {
        Err(FuturesError::DateRangeTooLarge { start, end, max_years }) => {
            assert_eq!(start, date(2010, 1, 1));
            assert_eq!(end, date(2021, 1, 1));
            assert_eq!(max_years, 10);
        }
        other => panic!("expected DateRangeTooLarge, got {:?}", other),
    }
}

#[test]
fn exactly_ten_year_span_is_accepted() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let result = sdk
        .analysis()
        .seasonal_extremes("CL=F", "2010-01-01", "2020-01-01")
        .unwrap();
    assert_eq!(result.len(), 6);
}

#[test]
fn one_day_over_ten_years_is_rejected() {
    let policy = RangePolicy::default();
    assert!(policy.check(date(2010, 1, 1), date(2020, 1, 1)).is_ok());
    assert!(matches!(
        policy.check(date(2010, 1, 1), date(2020, 1, 2)),
        Err(FuturesError::DateRangeTooLarge { .. })
    ));
}

#[test]
fn leap_day_start_is_measured_in_calendar_years() {
    let policy = RangePolicy::new(1);
    assert!(policy.check(date(2020, 2, 29), date(2021, 2, 28)).is_ok());
    assert!(policy.check(date(2020, 2, 29), date(2021, 3, 1)).is_err());
}

#[test]
fn inverted_range_passes_policy() {
    let policy = RangePolicy::default();
    assert!(policy.check(date(2030, 1, 1), date(2000, 1, 1)).is_ok());
}

#[test]
fn builder_limit_overrides_default() {
    let (_tmp, path) = common::write_data_file("prices.csv", &common::sample_csv());
    let sdk = FuturesSdk::builder()
        .data_file(&path)
        .max_range_years(2)
        .build()
        .unwrap();

    assert_eq!(sdk.analysis().policy().max_years, 2);
    assert!(matches!(
        sdk.analysis()
            .seasonal_extremes("CL=F", "2015-01-01", "2017-12-31"),
        Err(FuturesError::DateRangeTooLarge { max_years: 2, .. })
    ));
}

#[test]
fn decomposition_is_not_bound_by_range_policy() {
    let (sdk, _tmp) = common::setup_sample_sdk();

    let request = DecompositionRequest::new("CL=F", "2000-01-01", "2030-12-31").unwrap();
    assert!(sdk.analysis().decomposition(&request).is_ok());
}
