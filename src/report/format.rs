//! Terminal/JSON formatting for fit runs and projections.

use crate::domain::{ConfidenceBounds, FitResult, FittedModel, ModelKind, Projection, Series};
use crate::error::{AppError, ErrorKind};

/// Format the fit diagnostics for all attempted models.
pub fn format_fit_summary(
    series: &Series,
    fitted: &[FittedModel],
    skipped: &[(ModelKind, String)],
) -> String {
    let mut out = String::new();

    out.push_str("=== growth - cumulative growth-model fit ===\n");
    out.push_str(&format!(
        "Series: n={} | {} .. {}\n",
        series.len(),
        series.time_index().dates()[0],
        series.last_date(),
    ));
    let counts = series.counts();
    out.push_str(&format!(
        "Counts: [{:.0}, {:.0}] cumulative\n",
        counts.first().copied().unwrap_or(0.0),
        counts.last().copied().unwrap_or(0.0),
    ));

    out.push_str("\nModel diagnostics:\n");
    for entry in fitted {
        out.push_str(&format_fit_block(&entry.fit, &entry.bounds));
    }
    for (kind, reason) in skipped {
        out.push_str(&format!("  (skipped {}) {reason}\n", kind.display_name()));
    }

    out
}

fn format_fit_block(fit: &FitResult, bounds: &ConfidenceBounds) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "- {:<12} r={:.6} SSE={:.4} n={}\n",
        fit.model.kind.display_name(),
        fit.quality.r,
        fit.quality.sse,
        fit.quality.n,
    ));

    let names = fit.model.kind.param_names();
    for (name, ci) in names.iter().zip(&bounds.intervals) {
        out.push_str(&format!(
            "    {name:<9} = {:>12.6}   {:.0}% CI [{}, {}]\n",
            ci.estimate,
            bounds.level * 100.0,
            fmt_bound(ci.lower),
            fmt_bound(ci.upper),
        ));
    }
    if bounds.is_degenerate() {
        out.push_str("    (zero degrees of freedom: intervals are formally infinite)\n");
    }

    out
}

fn fmt_bound(v: f64) -> String {
    if v == f64::INFINITY {
        "+inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{v:.6}")
    }
}

/// Format a date-aligned table of observed vs predicted counts.
///
/// Future dates (beyond the observed range) have no observed column entry.
pub fn format_projection_table(series: &Series, projection: &Projection) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== growth - {} projection ===\n",
        projection.kind.display_name()
    ));

    let has_bounds = projection.lower.is_some() && projection.upper.is_some();
    if has_bounds {
        out.push_str(&format!(
            "{:<12} {:>10} {:>12} {:>12} {:>12}\n",
            "date", "observed", "predicted", "lower", "upper"
        ));
    } else {
        out.push_str(&format!("{:<12} {:>10} {:>12}\n", "date", "observed", "predicted"));
    }

    let observed = series.counts();
    for (i, date) in projection.index.dates().iter().enumerate() {
        let obs = if i < observed.len() {
            format!("{:.0}", observed[i])
        } else {
            "-".to_string()
        };

        if has_bounds {
            let lower = projection.lower.as_ref().unwrap()[i];
            let upper = projection.upper.as_ref().unwrap()[i];
            out.push_str(&format!(
                "{:<12} {:>10} {:>12.1} {:>12} {:>12}\n",
                date.to_string(),
                obs,
                projection.predicted[i],
                fmt_cell(lower),
                fmt_cell(upper),
            ));
        } else {
            out.push_str(&format!(
                "{:<12} {:>10} {:>12.1}\n",
                date.to_string(),
                obs,
                projection.predicted[i],
            ));
        }
    }

    out
}

fn fmt_cell(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.1}")
    } else if v > 0.0 {
        "+inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// Serialize the fit outputs as a JSON document.
pub fn fits_to_json(fitted: &[FittedModel]) -> Result<String, AppError> {
    serde_json::to_string_pretty(fitted)
        .map_err(|e| AppError::new(ErrorKind::Numeric, format!("JSON encoding failed: {e}")))
}

/// Serialize a projection as a JSON document.
pub fn projection_to_json(projection: &Projection) -> Result<String, AppError> {
    serde_json::to_string_pretty(projection)
        .map_err(|e| AppError::new(ErrorKind::Numeric, format!("JSON encoding failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{run_fit, run_project, RunConfig};
    use crate::domain::ModelSpec;

    fn base_config() -> RunConfig {
        RunConfig {
            model_spec: ModelSpec::All,
            alpha: 0.05,
            population: Some(crate::data::SAMPLE_POPULATION),
            horizon_days: 5,
        }
    }

    #[test]
    fn fit_summary_names_every_fitted_model() {
        let output = run_fit(&base_config()).unwrap();
        let text = format_fit_summary(&output.series, &output.fitted, &output.skipped);

        for fitted in &output.fitted {
            assert!(text.contains(fitted.fit.model.kind.display_name()));
        }
        assert!(text.contains("CI ["));
    }

    #[test]
    fn projection_table_marks_future_dates() {
        let config = RunConfig {
            model_spec: ModelSpec::Exponential,
            ..base_config()
        };
        let output = run_project(&config).unwrap();
        let text = format_projection_table(&output.series, &output.projection);

        // One row per extended index entry plus the two header lines.
        let rows = text.lines().count();
        assert_eq!(rows, output.projection.index.len() + 2);
        // Future rows carry the "-" observed marker.
        assert!(text.contains(" -"));
    }

    #[test]
    fn json_report_is_valid() {
        let output = run_fit(&base_config()).unwrap();
        let json = fits_to_json(&output.fitted).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.as_array().unwrap().len() >= 1);
    }
}
