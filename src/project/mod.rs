//! Forward projection of a fitted model over an extended time index.
//!
//! Projection is pointwise function evaluation, nothing more: no smoothing,
//! no interpolation. All output series share the extended index length so
//! they align one-to-one with real observations over the known range.

use crate::domain::{ConfidenceBounds, FitResult, GrowthModel, Projection};
use crate::error::AppError;
use crate::timeline::TimeIndex;

/// Evaluate a model over the whole extended index.
pub fn project(model: &GrowthModel, index: &TimeIndex) -> Projection {
    let xs = index.as_f64();
    Projection {
        kind: model.kind,
        index: index.clone(),
        predicted: model.predict_series(&xs),
        lower: None,
        upper: None,
    }
}

/// Evaluate a fit plus its lower/upper parameter variants over the index.
///
/// The bound curves come from the same kind of model with every parameter
/// moved to its interval end; they are parameter-uncertainty envelopes, not
/// prediction intervals.
pub fn project_with_bounds(
    fit: &FitResult,
    bounds: &ConfidenceBounds,
    index: &TimeIndex,
) -> Result<Projection, AppError> {
    let (lower_params, upper_params) = bounds.param_variants();
    let lower_model = GrowthModel::new(fit.model.kind, lower_params)?;
    let upper_model = GrowthModel::new(fit.model.kind, upper_params)?;

    let xs = index.as_f64();
    Ok(Projection {
        kind: fit.model.kind,
        index: index.clone(),
        predicted: fit.model.predict_series(&xs),
        lower: Some(lower_model.predict_series(&xs)),
        upper: Some(upper_model.predict_series(&xs)),
    })
}
