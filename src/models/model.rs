//! Model evaluation for the four growth curves.
//!
//! Parameter conventions (see `ModelKind::param_names`):
//!
//! - Linear:      `[intercept, slope]`, `y = intercept + slope * t`
//! - Log-linear:  `[intercept, slope]` in log space; predictions are
//!   exponentiated back to count space via `Transform::Log`
//! - Exponential: `[a, b]`, `y = a * exp(b * t)`
//! - Logistic:    `[a, b, c]`, `y = c / (1 + exp(-(a + b * t)))`

use crate::domain::ModelKind;

/// Predict `y(t)` for the given model kind, in real count space.
///
/// # Panics
/// Panics if `params` does not have length `kind.param_len()`. Callers build
/// parameter vectors through `GrowthModel::new`, which enforces the length.
pub fn predict(kind: ModelKind, t: f64, params: &[f64]) -> f64 {
    match kind {
        ModelKind::Linear => params[0] + params[1] * t,
        ModelKind::LogLinear => {
            let log_y = params[0] + params[1] * t;
            kind.transform().inverse(log_y)
        }
        ModelKind::Exponential => params[0] * (params[1] * t).exp(),
        ModelKind::Logistic => {
            let exponent = params[0] + params[1] * t;
            params[2] / (1.0 + (-exponent).exp())
        }
    }
}

/// Predict over a whole index slice.
pub fn predict_series(kind: ModelKind, index: &[f64], params: &[f64]) -> Vec<f64> {
    index.iter().map(|&t| predict(kind, t, params)).collect()
}
