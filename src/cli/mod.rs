//! Command-line parsing for the growth-model fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use clap::{Parser, Subcommand};

use crate::data::SAMPLE_POPULATION;
use crate::domain::ModelSpec;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "growth",
    version,
    about = "Fit and project parametric growth models over a cumulative case series"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the selected model(s) and print diagnostics with confidence intervals.
    Fit(FitArgs),
    /// Fit a single model and print a date-aligned projection table.
    Project(ProjectArgs),
}

/// Options for `growth fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Which model(s) to fit.
    #[arg(long, value_enum, default_value_t = ModelSpec::All)]
    pub model: ModelSpec,

    /// Significance level; confidence intervals are at level 1 - alpha.
    #[arg(long, default_value_t = 0.05)]
    pub alpha: f64,

    /// Population ceiling estimate seeding the logistic fit.
    #[arg(long, default_value_t = SAMPLE_POPULATION)]
    pub population: f64,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Options for `growth project`.
#[derive(Debug, Parser, Clone)]
pub struct ProjectArgs {
    /// Which model to project (a single kind, not `all`).
    #[arg(long, value_enum, default_value_t = ModelSpec::Exponential)]
    pub model: ModelSpec,

    /// Number of future days to project past the last observed date.
    #[arg(long, default_value_t = 7)]
    pub days: usize,

    /// Significance level; bound curves use intervals at level 1 - alpha.
    #[arg(long, default_value_t = 0.05)]
    pub alpha: f64,

    /// Population ceiling estimate seeding the logistic fit.
    #[arg(long, default_value_t = SAMPLE_POPULATION)]
    pub population: f64,

    /// Print the projection as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}
