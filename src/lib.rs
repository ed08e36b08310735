//! `growth-curves` library crate.
//!
//! The binary (`growth`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitting/projection engine is reusable by other front-ends
//!   (plotting layers, notebooks, services)
//!
//! The core consumes a cleaned, date-sorted cumulative series and produces
//! fitted models, parameter confidence intervals, and forward projections;
//! dataset loading and rendering live outside it.

pub mod app;
pub mod cli;
pub mod confidence;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod project;
pub mod report;
pub mod timeline;
