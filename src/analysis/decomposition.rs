//! Classical additive seasonal decomposition.
//!
//! `observed = trend + seasonal + residual`, where the trend is a centred
//! moving average over one period, the seasonal component is the zero-mean
//! average of the detrended values at each position of the cycle, and the
//! residual is what is left. The period counts rows; the series is never
//! resampled to a calendar frequency.

use crate::error::{FuturesError, Result};
use crate::models::{DecompositionResult, FilteredSeries};

/// Trend, seasonal and residual components aligned with the input values.
#[derive(Debug, Clone, PartialEq)]
pub struct Components {
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
}

/// Decompose `values` additively with the given `period`.
///
/// Fails with `InsufficientData` unless there are at least two full cycles
/// (`2 * period` values).
pub fn decompose(values: &[f64], period: usize) -> Result<Components> {
    if period < 2 {
        return Err(FuturesError::InvalidArgument(format!(
            "Decomposition period must be at least 2, got {}",
            period
        )));
    }
    let n = values.len();
    let required = 2 * period;
    if n < required {
        return Err(FuturesError::InsufficientData {
            required,
            actual: n,
        });
    }

    let trend = centered_moving_average(values, period);

    // Detrended values averaged per position in the cycle
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, (&y, t)) in values.iter().zip(trend.iter()).enumerate() {
        if let Some(t) = t {
            sums[i % period] += y - t;
            counts[i % period] += 1;
        }
    }
    let mut pattern: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();

    let mean = pattern.iter().sum::<f64>() / period as f64;
    for s in &mut pattern {
        *s -= mean;
    }

    let seasonal: Vec<f64> = (0..n).map(|i| pattern[i % period]).collect();

    let residual = values
        .iter()
        .zip(trend.iter())
        .zip(seasonal.iter())
        .map(|((&y, t), &s)| t.map(|t| y - t - s))
        .collect();

    Ok(Components {
        trend,
        seasonal,
        residual,
    })
}

/// Decompose a filtered series, carrying its dates and labels along.
///
/// The series must not contain missing values.
pub fn decompose_series(series: &FilteredSeries, period: usize) -> Result<DecompositionResult> {
    let missing = series.missing_count();
    if missing > 0 {
        return Err(FuturesError::MissingValues {
            feature: series.feature.clone(),
            count: missing,
        });
    }
    let observed: Vec<f64> = series.points.iter().filter_map(|p| p.value).collect();

    let components = decompose(&observed, period)?;
    log::debug!(
        "Decomposed {} {} ({} rows, period {})",
        series.ticker,
        series.feature,
        observed.len(),
        period
    );

    Ok(DecompositionResult {
        ticker: series.ticker.clone(),
        feature: series.feature.clone(),
        period,
        dates: series.dates(),
        observed,
        trend: components.trend,
        seasonal: components.seasonal,
        residual: components.residual,
    })
}

/// Centred moving average with a window of one period.
///
/// Even periods use `period + 1` points with half weight at both ends so the
/// window stays centred. The first and last `period / 2` entries are `None`.
fn centered_moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let half = period / 2;
    let weights: Vec<f64> = if period % 2 == 0 {
        let mut w = vec![1.0 / period as f64; period + 1];
        w[0] = 0.5 / period as f64;
        w[period] = 0.5 / period as f64;
        w
    } else {
        vec![1.0 / period as f64; period]
    };

    let mut trend = vec![None; n];
    for (i, slot) in trend.iter_mut().enumerate().take(n - half).skip(half) {
        let window = &values[i - half..i - half + weights.len()];
        *slot = Some(window.iter().zip(weights.iter()).map(|(v, w)| v * w).sum::<f64>());
    }
    trend
}
