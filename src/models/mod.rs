//! Growth-curve evaluation.
//!
//! The fitter and projector rely on two primitive operations:
//!
//! - predict `y(t)` given a model kind and parameter vector
//! - move counts between real space and a model's fitting space (`Transform`)
//!
//! Both are pure functions with no state.

pub mod model;
pub mod transform;

pub use model::*;
pub use transform::*;
