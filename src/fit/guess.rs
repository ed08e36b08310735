//! Initial-guess policy for the nonlinear fits.
//!
//! Both nonlinear kinds are seeded from the log-linear fit, since early
//! cumulative growth is approximately exponential:
//!
//! - exponential: `exp(intercept + slope * t) = exp(intercept) * e^(slope t)`,
//!   so the seed is `[exp(intercept), slope]`
//! - logistic: in its small-y phase `c / (1 + e^-(a + bt)) ~ c * e^(a + bt)`,
//!   so with a caller-supplied population ceiling `c`, matching the
//!   log-linear line gives `a = intercept - ln(c)`, `b = slope`
//!
//! The ceiling is an external input (a census figure for the region), not
//! something this crate estimates.

use crate::domain::{ModelKind, Series};
use crate::error::{AppError, ErrorKind};
use crate::fit::linear::fit_linear;

/// Default seed for a nonlinear fit of `kind` against `series`.
pub fn initial_guess(
    kind: ModelKind,
    series: &Series,
    population: Option<f64>,
) -> Result<Vec<f64>, AppError> {
    let log_fit = fit_linear(ModelKind::LogLinear, series)?;
    let intercept = log_fit.model.params[0];
    let slope = log_fit.model.params[1];

    match kind {
        ModelKind::Exponential => Ok(vec![intercept.exp(), slope]),
        ModelKind::Logistic => {
            let Some(population) = population else {
                return Err(AppError::new(
                    ErrorKind::InvalidConfig,
                    "Logistic fit needs a population ceiling estimate (see --population).",
                ));
            };
            if !population.is_finite() || population <= 0.0 {
                return Err(AppError::new(
                    ErrorKind::InvalidConfig,
                    format!("Population ceiling must be a positive number, got {population}."),
                ));
            }
            Ok(vec![intercept - population.ln(), slope, population])
        }
        ModelKind::Linear | ModelKind::LogLinear => Err(AppError::new(
            ErrorKind::InvalidConfig,
            format!("{} is fitted in closed form and takes no seed.", kind.display_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn exponential_seed_matches_log_linear_line() {
        // counts = 10 * 2^t, so ln(counts) = ln 10 + t ln 2.
        let counts: Vec<f64> = (0..5).map(|t| 10.0 * 2f64.powi(t)).collect();
        let series = series_from_counts(&counts);

        let seed = initial_guess(ModelKind::Exponential, &series, None).unwrap();
        assert!((seed[0] - 10.0).abs() < 1e-9);
        assert!((seed[1] - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn logistic_seed_embeds_ceiling() {
        let counts: Vec<f64> = (0..5).map(|t| 10.0 * 2f64.powi(t)).collect();
        let series = series_from_counts(&counts);

        let seed = initial_guess(ModelKind::Logistic, &series, Some(500_000.0)).unwrap();
        assert_eq!(seed.len(), 3);
        assert!((seed[0] - (10f64.ln() - 500_000f64.ln())).abs() < 1e-9);
        assert!((seed[1] - std::f64::consts::LN_2).abs() < 1e-12);
        assert_eq!(seed[2], 500_000.0);
    }

    #[test]
    fn logistic_without_population_is_a_config_error() {
        let counts: Vec<f64> = (0..5).map(|t| 10.0 * 2f64.powi(t)).collect();
        let series = series_from_counts(&counts);

        let err = initial_guess(ModelKind::Logistic, &series, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }
}
