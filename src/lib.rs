//! `ar-scratch` library crate.
//!
//! A dense matrix engine written from first principles (LU decomposition,
//! triangular solves, inversion) and the regression layer that consumes it:
//!
//! - `math`: the engine; every operation returns a new [`math::Matrix`] or a
//!   [`error::MatrixError`]
//! - `models`: OLS through the normal equations, AR(p) on a lag matrix
//! - `fit`: AR order selection by BIC
//! - `spot`: next-day spot price prediction from a daily history
//! - `data`, `domain`, `report`, `logging`: inputs, config, output, tracing

pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;
pub mod spot;

pub use error::{FitError, MatrixError};
pub use math::Matrix;
