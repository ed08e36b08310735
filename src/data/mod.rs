//! Bundled input data for the demo CLI.
//!
//! Real dataset loading/filtering belongs to an external collaborator; the
//! core only ever sees a cleaned `Series`. This module stands in for that
//! collaborator so the binary works out of the box.

pub mod sample;

pub use sample::*;
