//! Calendar-date to integer-index mapping.
//!
//! Growth models are functions of an abstract time step, not of calendar
//! dates. This module owns the conversion:
//!
//! - known dates receive stable indices `0..N-1`
//! - future dates extend the mapping without disturbing known indices

pub mod index;

pub use index::*;
