//! Model fitting orchestration.
//!
//! Responsibilities:
//!
//! - dispatch each model kind to its fitting strategy (closed-form OLS for
//!   the linear family, Levenberg-Marquardt for the nonlinear family)
//! - seed the nonlinear fits from the log-linear fit (`guess`)
//! - enforce the sample-size guard before any numerics run
//! - fit independent kinds in parallel for the `all` pipeline

use rayon::prelude::*;

use crate::domain::{FitResult, ModelKind, Series};
use crate::error::{AppError, ErrorKind};
use crate::math::LmOptions;

pub mod guess;
pub mod linear;
pub mod nonlinear;

pub use guess::*;
pub use linear::*;
pub use nonlinear::*;

/// Options shared by all fits in a run.
#[derive(Debug, Clone, Default)]
pub struct FitOptions {
    /// Population ceiling estimate for the logistic seed (an external
    /// figure, e.g. the region's census estimate).
    pub population: Option<f64>,
    /// Nonlinear solver settings.
    pub lm: LmOptions,
}

/// Fit one model kind against a series.
pub fn fit_model(kind: ModelKind, series: &Series, opts: &FitOptions) -> Result<FitResult, AppError> {
    let n = series.len();
    let p = kind.param_len();
    if n <= p {
        return Err(AppError::new(
            ErrorKind::InsufficientData,
            format!(
                "{} has {p} parameters but the series has only {n} observation(s); \
                 degrees of freedom would be <= 0.",
                kind.display_name()
            ),
        ));
    }

    match kind {
        ModelKind::Linear | ModelKind::LogLinear => linear::fit_linear(kind, series),
        ModelKind::Exponential | ModelKind::Logistic => {
            let guess = guess::initial_guess(kind, series, opts.population)?;
            nonlinear::fit_nonlinear(kind, series, &guess, &opts.lm)
        }
    }
}

/// Fit several kinds independently (no shared state between fits).
///
/// Returns one entry per requested kind, in the input order, carrying the
/// per-kind outcome so one failing model does not mask the others.
pub fn fit_models(
    kinds: &[ModelKind],
    series: &Series,
    opts: &FitOptions,
) -> Vec<(ModelKind, Result<FitResult, AppError>)> {
    kinds
        .par_iter()
        .map(|&kind| (kind, fit_model(kind, series, opts)))
        .collect()
}
