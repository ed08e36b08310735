//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and projection
//! - printed as JSON reports
//! - handed to an external rendering layer for plotting

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};
use crate::models::Transform;
use crate::timeline::TimeIndex;

/// A single observed point: zero-based time index plus cumulative count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub index: usize,
    pub count: f64,
}

/// An ordered, immutable series of cumulative counts over calendar dates.
///
/// Construction collapses consecutive duplicate dates (last count wins, the
/// usual shape of intraday re-reports in cumulative datasets) and then
/// validates strict ascending order. The series is never mutated afterwards;
/// every fit derives its own outputs from it.
///
/// Serialize-only: a series enters the system through [`Series::from_records`],
/// never by decoding a report document.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    index: TimeIndex,
    counts: Vec<f64>,
}

impl Series {
    /// Build a series from date-sorted `(date, count)` records.
    pub fn from_records(records: &[(NaiveDate, f64)]) -> Result<Self, AppError> {
        let mut dates: Vec<NaiveDate> = Vec::with_capacity(records.len());
        let mut counts: Vec<f64> = Vec::with_capacity(records.len());

        for &(date, count) in records {
            if !count.is_finite() || count < 0.0 {
                return Err(AppError::new(
                    ErrorKind::DegenerateInput,
                    format!("Negative or non-finite count {count} at {date}."),
                ));
            }
            if dates.last() == Some(&date) {
                // Duplicate date: keep the most recent figure for that day.
                *counts.last_mut().unwrap() = count;
            } else {
                dates.push(date);
                counts.push(count);
            }
        }

        // Length guards live in the fitter (which knows the parameter count);
        // an empty record set is rejected by the index itself.
        let index = TimeIndex::new(dates)?;
        Ok(Self { index, counts })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn time_index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Integer indices 0..N-1 as floats, ready for regression.
    pub fn indices(&self) -> Vec<f64> {
        self.index.as_f64()
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.counts
            .iter()
            .enumerate()
            .map(|(index, &count)| Observation { index, count })
            .collect()
    }

    pub fn last_date(&self) -> NaiveDate {
        self.index.last_date()
    }
}

/// Which growth model(s) to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelSpec {
    Linear,
    LogLinear,
    Exponential,
    Logistic,
    All,
}

impl ModelSpec {
    /// Concrete kinds covered by this selection, in reporting order.
    pub fn kinds(self) -> Vec<ModelKind> {
        match self {
            ModelSpec::Linear => vec![ModelKind::Linear],
            ModelSpec::LogLinear => vec![ModelKind::LogLinear],
            ModelSpec::Exponential => vec![ModelKind::Exponential],
            ModelSpec::Logistic => vec![ModelKind::Logistic],
            ModelSpec::All => vec![
                ModelKind::Linear,
                ModelKind::LogLinear,
                ModelKind::Exponential,
                ModelKind::Logistic,
            ],
        }
    }
}

impl std::fmt::Display for ModelSpec {
    /// Renders the clap value name, so `default_value_t` round-trips.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModelSpec::Linear => "linear",
            ModelSpec::LogLinear => "log-linear",
            ModelSpec::Exponential => "exponential",
            ModelSpec::Logistic => "logistic",
            ModelSpec::All => "all",
        };
        write!(f, "{name}")
    }
}

/// Concrete fitted model kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// `y = intercept + slope * t`
    Linear,
    /// Linear in log space: `ln y = intercept + slope * t`, reported in count space.
    LogLinear,
    /// `y = a * exp(b * t)`
    Exponential,
    /// `y = c / (1 + exp(-(a + b * t)))`
    Logistic,
}

impl ModelKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Linear => "Linear",
            ModelKind::LogLinear => "Log-linear",
            ModelKind::Exponential => "Exponential",
            ModelKind::Logistic => "Logistic",
        }
    }

    /// Number of fitted parameters for this model.
    pub fn param_len(self) -> usize {
        match self {
            ModelKind::Linear | ModelKind::LogLinear | ModelKind::Exponential => 2,
            ModelKind::Logistic => 3,
        }
    }

    /// Parameter labels, in the order they appear in `GrowthModel::params`.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            ModelKind::Linear | ModelKind::LogLinear => &["intercept", "slope"],
            ModelKind::Exponential => &["a", "b"],
            ModelKind::Logistic => &["a", "b", "c"],
        }
    }

    /// Count-space transform applied before fitting and inverted after
    /// evaluation. Only `LogLinear` fits in a transformed space.
    pub fn transform(self) -> Transform {
        match self {
            ModelKind::LogLinear => Transform::Log,
            _ => Transform::Identity,
        }
    }
}

/// A fitted (or candidate) model: kind tag plus parameter vector.
///
/// Keeping parameters in a plain vector, rather than per-kind closures,
/// keeps models comparable and serializable; evaluation dispatches on the
/// kind tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthModel {
    pub kind: ModelKind,
    pub params: Vec<f64>,
}

impl GrowthModel {
    pub fn new(kind: ModelKind, params: Vec<f64>) -> Result<Self, AppError> {
        if params.len() != kind.param_len() {
            return Err(AppError::new(
                ErrorKind::InvalidConfig,
                format!(
                    "{} expects {} parameters, got {}.",
                    kind.display_name(),
                    kind.param_len(),
                    params.len()
                ),
            ));
        }
        Ok(Self { kind, params })
    }

    /// Predicted count at time index `t`, in real count space.
    pub fn predict(&self, t: f64) -> f64 {
        crate::models::predict(self.kind, t, &self.params)
    }

    /// Predicted counts over a whole index slice.
    pub fn predict_series(&self, index: &[f64]) -> Vec<f64> {
        crate::models::predict_series(self.kind, index, &self.params)
    }
}

/// Fit quality diagnostics.
///
/// `r` is the Pearson product-moment correlation between observed and
/// predicted counts. It is computed the same way for every model kind so
/// qualities are directly comparable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub r: f64,
    pub sse: f64,
    pub n: usize,
}

/// Fit output for a single model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub model: GrowthModel,
    /// Parameter covariance, square with dimension `kind.param_len()`.
    pub covariance: Vec<Vec<f64>>,
    pub quality: FitQuality,
}

impl FitResult {
    /// Per-parameter standard errors from the covariance diagonal.
    pub fn std_errors(&self) -> Vec<f64> {
        self.covariance
            .iter()
            .enumerate()
            .map(|(i, row)| row[i].max(0.0).sqrt())
            .collect()
    }
}

/// Symmetric interval around one fitted parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParamInterval {
    pub lower: f64,
    pub estimate: f64,
    pub upper: f64,
}

/// Per-parameter confidence intervals for a fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceBounds {
    /// Confidence level, e.g. 0.95.
    pub level: f64,
    /// Degrees of freedom used for the t critical value.
    pub dof: usize,
    /// One interval per parameter, in `GrowthModel::params` order.
    pub intervals: Vec<ParamInterval>,
}

impl ConfidenceBounds {
    /// True when the intervals are formally defined but statistically
    /// meaningless (zero degrees of freedom, infinite width).
    pub fn is_degenerate(&self) -> bool {
        self.dof == 0
    }

    /// Parameter vectors at the lower and upper interval ends.
    pub fn param_variants(&self) -> (Vec<f64>, Vec<f64>) {
        let lower = self.intervals.iter().map(|ci| ci.lower).collect();
        let upper = self.intervals.iter().map(|ci| ci.upper).collect();
        (lower, upper)
    }
}

/// A successfully fitted model together with its parameter intervals.
#[derive(Debug, Clone, Serialize)]
pub struct FittedModel {
    pub fit: FitResult,
    pub bounds: ConfidenceBounds,
}

/// A model evaluated over an extended time index.
///
/// All contained series have the same length as `index`, so they align
/// one-to-one with real observations over the known range and with future
/// dates beyond it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub kind: ModelKind,
    pub index: TimeIndex,
    pub predicted: Vec<f64>,
    pub lower: Option<Vec<f64>>,
    pub upper: Option<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
    }

    #[test]
    fn duplicate_dates_collapse_to_one_index() {
        // Two reports on the 13th: only the later figure survives.
        let series = Series::from_records(&[
            (d(12), 2.0),
            (d(13), 3.0),
            (d(13), 5.0),
            (d(14), 8.0),
        ])
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.counts(), &[2.0, 5.0, 8.0]);
        assert_eq!(series.indices(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn out_of_order_dates_are_rejected() {
        let err = Series::from_records(&[(d(13), 2.0), (d(12), 3.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOrder);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let err = Series::from_records(&[(d(12), 2.0), (d(13), -1.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn observations_pair_indices_with_counts() {
        let series = Series::from_records(&[(d(12), 2.0), (d(13), 4.0)]).unwrap();
        let obs = series.observations();
        assert_eq!(obs, vec![
            Observation { index: 0, count: 2.0 },
            Observation { index: 1, count: 4.0 },
        ]);
    }

    #[test]
    fn growth_model_enforces_parameter_length() {
        let err = GrowthModel::new(ModelKind::Logistic, vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn std_errors_are_sqrt_of_diagonal() {
        let fit = FitResult {
            model: GrowthModel::new(ModelKind::Linear, vec![1.0, 2.0]).unwrap(),
            covariance: vec![vec![4.0, 0.5], vec![0.5, 9.0]],
            quality: FitQuality { r: 1.0, sse: 0.0, n: 5 },
        };
        assert_eq!(fit.std_errors(), vec![2.0, 3.0]);
    }
}
