//! Zero-based time index over an ordered date sequence.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// An ordered set of distinct dates with implicit indices `0..N-1`.
///
/// The index is append-only: extending with future dates never renumbers
/// existing dates, so predictions stay aligned with the observations they
/// were fitted against.
///
/// Serde represents an index as a bare date array; deserialization funnels
/// through [`TimeIndex::new`], so an empty or out-of-order payload is
/// rejected instead of producing an index that violates the ordering
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<NaiveDate>", try_from = "Vec<NaiveDate>")]
pub struct TimeIndex {
    dates: Vec<NaiveDate>,
}

impl From<TimeIndex> for Vec<NaiveDate> {
    fn from(index: TimeIndex) -> Self {
        index.dates
    }
}

impl TryFrom<Vec<NaiveDate>> for TimeIndex {
    type Error = AppError;

    fn try_from(dates: Vec<NaiveDate>) -> Result<Self, Self::Error> {
        Self::new(dates)
    }
}

impl TimeIndex {
    /// Build an index over strictly ascending dates.
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self, AppError> {
        if dates.is_empty() {
            return Err(AppError::new(
                ErrorKind::InvalidOrder,
                "Cannot index an empty date sequence.",
            ));
        }
        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(AppError::new(
                    ErrorKind::InvalidOrder,
                    format!(
                        "Dates must be strictly increasing: {} does not follow {}.",
                        pair[1], pair[0]
                    ),
                ));
            }
        }
        Ok(Self { dates })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn last_date(&self) -> NaiveDate {
        *self.dates.last().unwrap()
    }

    /// Index of a known date, if present.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// The indices `0..N-1` as floats, ready for regression/evaluation.
    pub fn as_f64(&self) -> Vec<f64> {
        (0..self.dates.len()).map(|i| i as f64).collect()
    }

    /// Extend with future dates, all strictly after the last known date.
    ///
    /// Known dates keep their indices; the future dates receive
    /// `N..N+K-1` in order.
    pub fn extend(&self, future: &[NaiveDate]) -> Result<Self, AppError> {
        let mut dates = self.dates.clone();
        let mut prev = self.last_date();
        for &date in future {
            if date <= prev {
                return Err(AppError::new(
                    ErrorKind::InvalidOrder,
                    format!(
                        "Future date {date} is not strictly after {prev} (known range ends {}).",
                        self.last_date()
                    ),
                ));
            }
            dates.push(date);
            prev = date;
        }
        // Ordering is already established above; skip revalidation.
        Ok(Self { dates })
    }

    /// Extend with `k` synthetic consecutive days after the last known date.
    pub fn extend_daily(&self, k: usize) -> Result<Self, AppError> {
        let last = self.last_date();
        let future: Vec<NaiveDate> = (1..=k as i64).map(|d| last + Duration::days(d)).collect();
        self.extend(&future)
    }
}
