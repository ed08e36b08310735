//! A bundled demo series: the first week of cumulative confirmed case
//! counts for a mid-sized city during the March 2020 outbreak onset.
//!
//! Counts are cumulative, strictly positive (so the log-linear path is
//! well-defined) and observed daily, which is the shape the fitting core is
//! designed around.

use chrono::NaiveDate;

use crate::domain::Series;
use crate::error::AppError;

/// 2019 census population estimate for the demo region. Used only to seed
/// the logistic model's ceiling.
pub const SAMPLE_POPULATION: f64 = 500_973.0;

/// Daily cumulative confirmed counts, March 12-18.
const SAMPLE_COUNTS: [(u32, f64); 7] = [
    (12, 2.0),
    (13, 4.0),
    (14, 7.0),
    (15, 10.0),
    (16, 16.0),
    (17, 23.0),
    (18, 34.0),
];

/// Build the demo series.
pub fn sample_series() -> Result<Series, AppError> {
    let records: Vec<(NaiveDate, f64)> = SAMPLE_COUNTS
        .iter()
        .map(|&(day, count)| {
            (
                NaiveDate::from_ymd_opt(2020, 3, day).expect("valid bundled date"),
                count,
            )
        })
        .collect();
    Series::from_records(&records)
}
