//! Shared fit/projection pipeline used by both subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! series -> fits -> confidence bounds -> (optional) projection.
//! The CLI then focuses on presentation.

use crate::confidence::confidence_bounds;
use crate::data::sample_series;
use crate::domain::{FittedModel, ModelKind, ModelSpec, Projection, Series};
use crate::error::{AppError, ErrorKind};
use crate::fit::{fit_models, FitOptions};
use crate::project::project_with_bounds;

/// A single run's configuration, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub model_spec: ModelSpec,
    pub alpha: f64,
    /// Population ceiling for the logistic seed.
    pub population: Option<f64>,
    /// Future days for `project`; ignored by `fit`.
    pub horizon_days: usize,
}

/// All computed outputs of a `growth fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub series: Series,
    /// Fits in the requested order.
    pub fitted: Vec<FittedModel>,
    /// Models that could not be fitted, with the reason.
    pub skipped: Vec<(ModelKind, String)>,
}

/// All computed outputs of a `growth project` run.
#[derive(Debug, Clone)]
pub struct ProjectOutput {
    pub series: Series,
    pub fitted: FittedModel,
    pub projection: Projection,
}

/// Fit the configured models against the bundled series.
pub fn run_fit(config: &RunConfig) -> Result<RunOutput, AppError> {
    let series = sample_series()?;
    run_fit_with_series(config, series)
}

/// Fit the configured models against a caller-supplied series.
pub fn run_fit_with_series(config: &RunConfig, series: Series) -> Result<RunOutput, AppError> {
    let kinds = config.model_spec.kinds();
    let opts = FitOptions {
        population: config.population,
        ..FitOptions::default()
    };

    let mut fitted = Vec::new();
    let mut skipped = Vec::new();
    let mut last_err: Option<AppError> = None;

    for (kind, outcome) in fit_models(&kinds, &series, &opts) {
        match outcome {
            Ok(fit) => {
                let bounds = confidence_bounds(&fit, config.alpha)?;
                fitted.push(FittedModel { fit, bounds });
            }
            Err(err) => {
                skipped.push((kind, err.to_string()));
                last_err = Some(err);
            }
        }
    }

    if fitted.is_empty() {
        return Err(last_err.unwrap_or_else(|| {
            AppError::new(ErrorKind::InvalidConfig, "No models selected to fit.")
        }));
    }

    Ok(RunOutput {
        series,
        fitted,
        skipped,
    })
}

/// Fit one model and project it over the extended index.
pub fn run_project(config: &RunConfig) -> Result<ProjectOutput, AppError> {
    let series = sample_series()?;
    run_project_with_series(config, series)
}

/// Projection over a caller-supplied series.
pub fn run_project_with_series(config: &RunConfig, series: Series) -> Result<ProjectOutput, AppError> {
    let kinds = config.model_spec.kinds();
    let [kind] = kinds.as_slice() else {
        return Err(AppError::new(
            ErrorKind::InvalidConfig,
            "Projection needs a single model kind, not `all`.",
        ));
    };

    let output = run_fit_with_series(config, series)?;
    let fitted = output.fitted.into_iter().next().expect("non-empty on Ok");
    debug_assert_eq!(fitted.fit.model.kind, *kind);

    let index = output.series.time_index().extend_daily(config.horizon_days)?;
    let projection = project_with_bounds(&fitted.fit, &fitted.bounds, &index)?;

    Ok(ProjectOutput {
        series: output.series,
        fitted,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SAMPLE_POPULATION;

    fn config(spec: ModelSpec) -> RunConfig {
        RunConfig {
            model_spec: spec,
            alpha: 0.05,
            population: Some(SAMPLE_POPULATION),
            horizon_days: 7,
        }
    }

    #[test]
    fn all_four_models_fit_the_bundled_series() {
        let output = run_fit(&config(ModelSpec::All)).unwrap();
        assert_eq!(output.fitted.len(), 4, "skipped: {:?}", output.skipped);
        for fitted in &output.fitted {
            assert!(fitted.fit.quality.r.is_finite());
            assert!(!fitted.bounds.is_degenerate());
        }
    }

    #[test]
    fn exponential_tracks_the_bundled_series_closely() {
        // The bundled counts roughly double every other day; the exponential
        // fit should be a near-perfect description of the first week.
        let output = run_fit(&config(ModelSpec::Exponential)).unwrap();
        let fitted = &output.fitted[0];
        assert!(fitted.fit.quality.r > 0.99, "r = {}", fitted.fit.quality.r);
        assert!(fitted.fit.model.params[1] > 0.0, "growth rate must be positive");
    }

    #[test]
    fn projection_extends_by_the_horizon() {
        let output = run_project(&config(ModelSpec::Exponential)).unwrap();
        assert_eq!(
            output.projection.index.len(),
            output.series.len() + 7
        );
        assert!(output.projection.lower.is_some());
        assert!(output.projection.upper.is_some());
    }

    #[test]
    fn projecting_all_kinds_is_a_config_error() {
        let err = run_project(&config(ModelSpec::All)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn logistic_without_population_is_skipped_not_fatal() {
        let mut cfg = config(ModelSpec::All);
        cfg.population = None;
        let output = run_fit(&cfg).unwrap();

        assert_eq!(output.fitted.len(), 3);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].0, ModelKind::Logistic);
    }
}
