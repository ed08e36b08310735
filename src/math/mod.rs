//! Mathematical utilities: closed-form regression, correlation, and the
//! Levenberg-Marquardt solver used by the nonlinear fits.

pub mod lm;
pub mod ols;

pub use lm::*;
pub use ols::*;
