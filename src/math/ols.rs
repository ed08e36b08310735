//! Closed-form simple linear regression and Pearson correlation.
//!
//! The linear and log-linear growth models regress a single response on the
//! integer time index, so the full design-matrix machinery is unnecessary:
//! slope, intercept, their covariance, and the regression r all have
//! analytic forms from the centered sums.

use crate::error::{AppError, ErrorKind};

/// Output of a simple (one-regressor) OLS fit.
///
/// Parameter order matches the rest of the crate: `[intercept, slope]`.
#[derive(Debug, Clone)]
pub struct SimpleOls {
    pub intercept: f64,
    pub slope: f64,
    /// Regression r (identical to the Pearson r between x and y).
    pub r: f64,
    /// Residual sum of squares in the fitting space.
    pub sse: f64,
    /// 2x2 covariance of `[intercept, slope]`.
    pub covariance: [[f64; 2]; 2],
    pub n: usize,
}

/// Fit `y = intercept + slope * x` by ordinary least squares.
///
/// Requires `n > 2` so the residual variance (and hence the parameter
/// covariance) is defined with positive degrees of freedom.
pub fn simple_ols(x: &[f64], y: &[f64]) -> Result<SimpleOls, AppError> {
    let n = x.len();
    if y.len() != n {
        return Err(AppError::new(
            ErrorKind::Numeric,
            format!("Regression inputs disagree in length: {} vs {}.", n, y.len()),
        ));
    }
    if n <= 2 {
        return Err(AppError::new(
            ErrorKind::InsufficientData,
            format!("Simple OLS needs n > 2 observations, got {n}."),
        ));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(AppError::new(
            ErrorKind::Numeric,
            "Non-finite value in regression input.",
        ));
    }

    let n_f = n as f64;
    let x_bar = x.iter().sum::<f64>() / n_f;
    let y_bar = y.iter().sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_bar;
        let dy = yi - y_bar;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx <= 0.0 {
        return Err(AppError::new(
            ErrorKind::DegenerateInput,
            "Regressor has zero variance; slope is unidentified.",
        ));
    }

    let slope = sxy / sxx;
    let intercept = y_bar - slope * x_bar;

    // r = Sxy / sqrt(Sxx * Syy), clamped like the usual regression
    // implementations: constant y means r = 0, rounding may push |r|
    // marginally past 1.
    let denom = (sxx * syy).sqrt();
    let r = if denom > 0.0 {
        (sxy / denom).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    // Residual variance with n - 2 degrees of freedom. Guard against tiny
    // negative values from cancellation on exact fits.
    let sse = (syy - slope * sxy).max(0.0);
    let s2 = sse / (n_f - 2.0);

    let sum_x2 = sxx + n_f * x_bar * x_bar;
    let var_slope = s2 / sxx;
    let var_intercept = s2 * sum_x2 / (n_f * sxx);
    let cov_is = -s2 * x_bar / sxx;

    Ok(SimpleOls {
        intercept,
        slope,
        r,
        sse,
        covariance: [[var_intercept, cov_is], [cov_is, var_slope]],
        n,
    })
}

/// Pearson product-moment correlation between two equal-length samples.
///
/// This is the single fit-quality definition used for every model kind:
/// nonlinear fits compute it between observed and predicted counts, and it
/// coincides with the regression r on the linear paths.
pub fn pearson_r(a: &[f64], b: &[f64]) -> Result<f64, AppError> {
    let n = a.len();
    if b.len() != n || n < 2 {
        return Err(AppError::new(
            ErrorKind::Numeric,
            format!("Pearson r needs two equal-length samples with n >= 2, got {n} and {}.", b.len()),
        ));
    }

    let n_f = n as f64;
    let a_bar = a.iter().sum::<f64>() / n_f;
    let b_bar = b.iter().sum::<f64>() / n_f;

    let mut saa = 0.0;
    let mut sbb = 0.0;
    let mut sab = 0.0;
    for (&ai, &bi) in a.iter().zip(b.iter()) {
        let da = ai - a_bar;
        let db = bi - b_bar;
        saa += da * da;
        sbb += db * db;
        sab += da * db;
    }

    let denom = (saa * sbb).sqrt();
    if denom > 0.0 {
        Ok((sab / denom).clamp(-1.0, 1.0))
    } else {
        Ok(0.0)
    }
}
