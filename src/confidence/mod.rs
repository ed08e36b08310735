//! Per-parameter confidence intervals from a fitted covariance matrix.
//!
//! The interval for each parameter is the usual Wald form:
//!
//! ```text
//! param +/- sqrt(cov[i][i]) * t_crit(1 - alpha/2, dof)
//! ```
//!
//! with `dof = n - p`. Zero degrees of freedom is not rejected: the
//! t-quantile diverges as dof -> 0+, so the interval is formally defined but
//! infinitely wide. `ConfidenceBounds::is_degenerate()` lets callers tell
//! that case apart from a fit failure.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::domain::{ConfidenceBounds, FitResult, ParamInterval};
use crate::error::{AppError, ErrorKind};

/// Default significance level (95% confidence).
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Two-sided Student-t critical value at significance `alpha`.
///
/// `dof = 0` returns the quantile's limiting value, positive infinity.
pub fn t_critical(dof: usize, alpha: f64) -> Result<f64, AppError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(AppError::new(
            ErrorKind::InvalidConfig,
            format!("Significance alpha must be in (0, 1), got {alpha}."),
        ));
    }
    if dof == 0 {
        return Ok(f64::INFINITY);
    }

    let dist = StudentsT::new(0.0, 1.0, dof as f64).map_err(|e| {
        AppError::new(ErrorKind::Numeric, format!("t-distribution setup failed: {e}"))
    })?;
    Ok(dist.inverse_cdf(1.0 - alpha / 2.0))
}

/// Confidence intervals for every parameter of a fit.
pub fn confidence_bounds(fit: &FitResult, alpha: f64) -> Result<ConfidenceBounds, AppError> {
    let p = fit.model.params.len();
    if fit.covariance.len() != p || fit.covariance.iter().any(|row| row.len() != p) {
        return Err(AppError::new(
            ErrorKind::Numeric,
            format!("Covariance must be {p}x{p} for a {p}-parameter model."),
        ));
    }

    let dof = fit.quality.n.saturating_sub(p);
    let crit = t_critical(dof, alpha)?;

    let intervals = fit
        .model
        .params
        .iter()
        .zip(fit.std_errors())
        .map(|(&estimate, se)| {
            // 0 * inf would be NaN; a zero standard error pins the interval
            // to the estimate regardless of the critical value.
            let half_width = if se == 0.0 { 0.0 } else { se * crit };
            ParamInterval {
                lower: estimate - half_width,
                estimate,
                upper: estimate + half_width,
            }
        })
        .collect();

    Ok(ConfidenceBounds {
        level: 1.0 - alpha,
        dof,
        intervals,
    })
}
