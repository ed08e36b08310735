//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fit/projection pipeline over the bundled series
//! - prints reports

use clap::Parser;

use crate::cli::{Cli, Command, FitArgs, ProjectArgs};
use crate::error::AppError;

pub mod pipeline;

use pipeline::RunConfig;

/// Entry point for the `growth` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Project(args) => handle_project(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = RunConfig {
        model_spec: args.model,
        alpha: args.alpha,
        population: Some(args.population),
        horizon_days: 0,
    };
    let output = pipeline::run_fit(&config)?;

    if args.json {
        println!("{}", crate::report::fits_to_json(&output.fitted)?);
    } else {
        println!(
            "{}",
            crate::report::format_fit_summary(&output.series, &output.fitted, &output.skipped)
        );
    }
    Ok(())
}

fn handle_project(args: ProjectArgs) -> Result<(), AppError> {
    let config = RunConfig {
        model_spec: args.model,
        alpha: args.alpha,
        population: Some(args.population),
        horizon_days: args.days,
    };
    let output = pipeline::run_project(&config)?;

    if args.json {
        println!("{}", crate::report::projection_to_json(&output.projection)?);
    } else {
        println!(
            "{}",
            crate::report::format_projection_table(&output.series, &output.projection)
        );
    }
    Ok(())
}
