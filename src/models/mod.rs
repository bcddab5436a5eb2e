//! Regression models built on the matrix engine.
//!
//! `ols` is the standalone estimator; `ar` prepares a lagged design matrix and
//! delegates to it.

pub mod ar;
pub mod ols;

pub use ar::*;
pub use ols::*;
