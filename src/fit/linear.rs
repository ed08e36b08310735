//! Closed-form fits: the linear model, and the log-linear model as a linear
//! regression in log space.
//!
//! The log transform is applied through `ModelKind::transform()`, the same
//! pair the projector inverts, so fitted parameters and later predictions
//! always agree on which space they live in.

use crate::domain::{FitQuality, FitResult, GrowthModel, ModelKind, Series};
use crate::error::AppError;
use crate::math::{pearson_r, simple_ols};

/// Fit `Linear` or `LogLinear` by ordinary least squares.
///
/// The returned covariance lives in the fitting space (log space for
/// `LogLinear`), matching the space of the stored parameters.
pub fn fit_linear(kind: ModelKind, series: &Series) -> Result<FitResult, AppError> {
    let xs = series.indices();
    let ys = kind.transform().forward_series(series.counts())?;

    let ols = simple_ols(&xs, &ys)?;
    let model = GrowthModel::new(kind, vec![ols.intercept, ols.slope])?;

    // Quality is always measured in count space between observed and
    // predicted values, so linear and nonlinear fits report the same
    // statistic (see `math::pearson_r`).
    let predicted = model.predict_series(&xs);
    let r = pearson_r(series.counts(), &predicted)?;
    let sse = count_space_sse(series.counts(), &predicted);

    let covariance = ols.covariance.iter().map(|row| row.to_vec()).collect();

    Ok(FitResult {
        model,
        covariance,
        quality: FitQuality {
            r,
            sse,
            n: series.len(),
        },
    })
}

pub(crate) fn count_space_sse(observed: &[f64], predicted: &[f64]) -> f64 {
    observed
        .iter()
        .zip(predicted.iter())
        .map(|(&o, &p)| {
            let d = o - p;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;

    fn series_from_counts(counts: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let records: Vec<(NaiveDate, f64)> = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (start + chrono::Duration::days(i as i64), c))
            .collect();
        Series::from_records(&records).unwrap()
    }

    #[test]
    fn recovers_exact_linear_series() {
        // counts = 5 + 7t, noise-free.
        let counts: Vec<f64> = (0..6).map(|t| 5.0 + 7.0 * t as f64).collect();
        let series = series_from_counts(&counts);

        let fit = fit_linear(ModelKind::Linear, &series).unwrap();
        assert!((fit.model.params[0] - 5.0).abs() < 1e-6);
        assert!((fit.model.params[1] - 7.0).abs() < 1e-6);
        assert!((fit.quality.r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn log_linear_recovers_log_space_line() {
        // ln(counts) = 1 + 2t exactly on t = 0, 1, 2.
        let counts: Vec<f64> = [1.0_f64, 3.0, 5.0].iter().map(|e| e.exp()).collect();
        let series = series_from_counts(&counts);

        let fit = fit_linear(ModelKind::LogLinear, &series).unwrap();
        assert!((fit.model.params[0] - 1.0).abs() < 1e-9, "intercept");
        assert!((fit.model.params[1] - 2.0).abs() < 1e-9, "slope");

        // Back-transformed predictions reproduce the original counts.
        let predicted = fit.model.predict_series(&series.indices());
        for (p, c) in predicted.iter().zip(series.counts()) {
            assert!((p - c).abs() < 1e-9 * c, "predicted {p}, observed {c}");
        }
        assert!((fit.quality.r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn log_linear_rejects_zero_counts() {
        let series = series_from_counts(&[0.0, 1.0, 2.0, 3.0]);
        let err = fit_linear(ModelKind::LogLinear, &series).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn covariance_diagonal_is_non_negative() {
        let series = series_from_counts(&[10.0, 22.0, 29.0, 44.0, 50.0]);
        let fit = fit_linear(ModelKind::Linear, &series).unwrap();

        assert_eq!(fit.covariance.len(), 2);
        assert!(fit.covariance[0][0] >= 0.0);
        assert!(fit.covariance[1][1] >= 0.0);
        // Symmetric off-diagonal.
        assert_eq!(fit.covariance[0][1], fit.covariance[1][0]);
    }
}
