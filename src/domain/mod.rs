//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the observed time series (`Observation`, `Series`)
//! - model identity and fitted parameters (`ModelKind`, `GrowthModel`)
//! - fit outputs (`FitResult`, `FitQuality`, `ConfidenceBounds`, `Projection`)

pub mod types;

pub use types::*;
