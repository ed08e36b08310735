//! Count-space transforms for models fitted in a transformed space.
//!
//! The log-linear model is an ordinary linear regression on `ln y`. The same
//! transform pair must be applied symmetrically: `forward` on the counts
//! before fitting, `inverse` on predictions after evaluation. Exposing it as
//! a value keeps the fitter and projector from drifting apart.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Bidirectional transform between count space and fitting space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Fit directly on counts.
    Identity,
    /// Fit on `ln(count)`; predictions are exponentiated back.
    Log,
}

impl Transform {
    /// Map a count into fitting space.
    ///
    /// The log path is undefined for counts <= 0 and fails with
    /// `DegenerateInput` rather than producing -inf/NaN.
    pub fn forward(self, count: f64) -> Result<f64, AppError> {
        match self {
            Transform::Identity => Ok(count),
            Transform::Log => {
                if count > 0.0 && count.is_finite() {
                    Ok(count.ln())
                } else {
                    Err(AppError::new(
                        ErrorKind::DegenerateInput,
                        format!("Log transform undefined for count {count} (must be > 0)."),
                    ))
                }
            }
        }
    }

    /// Map all counts into fitting space.
    pub fn forward_series(self, counts: &[f64]) -> Result<Vec<f64>, AppError> {
        counts.iter().map(|&c| self.forward(c)).collect()
    }

    /// Map a fitted-space value back to count space.
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            Transform::Identity => value,
            Transform::Log => value.exp(),
        }
    }
}
