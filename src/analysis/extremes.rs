use chrono::NaiveDate;

use crate::models::{ExtremeKind, SeasonalExtreme, SeasonalExtremes};

/// Select the rows holding the global maximum and minimum of a series.
///
/// Every row tied at an extreme is kept. Maximum rows come first, then
/// minimum rows, each in input order. A constant series lists its rows under
/// both kinds.
pub fn extremes(points: &[(NaiveDate, f64)]) -> SeasonalExtremes {
    if points.is_empty() {
        return SeasonalExtremes::default();
    }

    let max_value = points.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);
    let min_value = points.iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min);

    let records = tagged(points, max_value, ExtremeKind::Max)
        .chain(tagged(points, min_value, ExtremeKind::Min))
        .collect();

    SeasonalExtremes { records }
}

fn tagged(
    points: &[(NaiveDate, f64)],
    target: f64,
    kind: ExtremeKind,
) -> impl Iterator<Item = SeasonalExtreme> + '_ {
    points
        .iter()
        .filter(move |&&(_, v)| v == target)
        .map(move |&(date, v)| SeasonalExtreme {
            date,
            seasonal_value: v,
            kind,
        })
}
