//! Ordinary least squares through the normal equations.
//!
//! With the design matrix `X = [1 | explanatory]` and response `Y`:
//!
//! ```text
//! β        = (XᵗX)⁻¹ Xᵗ Y
//! E        = Y - Xβ
//! σ²       = EᵗE / n
//! Cov(β)   = σ² (XᵗX)⁻¹
//! t_i      = β_i / sqrt(Cov(β)[i,i])
//! ```
//!
//! Only engine primitives are used (multiply, transpose, inverse), so any
//! shape or pivot failure in the engine surfaces unchanged as
//! [`FitError::Matrix`].

use serde::Serialize;
use tracing::debug;

use crate::error::{FitError, FitResult, MatrixError};
use crate::math::Matrix;

/// Response vector and explanatory matrix, before fitting.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    response: Matrix,
    explanatory: Matrix,
}

/// Everything the estimator derives from one fit.
#[derive(Debug, Clone, Serialize)]
pub struct OlsFit {
    /// `(k+1) x 1`, intercept first.
    pub coefficients: Matrix,
    pub fitted: Matrix,
    pub residuals: Matrix,
    /// Maximum-likelihood residual variance `EᵗE / n`.
    pub residual_variance: f64,
    pub covariance: Matrix,
    pub t_stats: Matrix,
    pub sse: f64,
    pub r_squared: f64,
    pub n_obs: usize,
}

impl LinearRegression {
    /// `y` must be a single column with as many rows as `x`.
    pub fn new(y: Matrix, x: Matrix) -> FitResult<Self> {
        if y.ncols() != 1 || y.nrows() != x.nrows() {
            return Err(MatrixError::DimensionMismatch {
                op: "regression",
                left: y.shape(),
                right: x.shape(),
            }
            .into());
        }
        if y.as_slice().iter().chain(x.as_slice()).any(|v| !v.is_finite()) {
            return Err(FitError::NonFiniteData);
        }
        Ok(Self {
            response: y,
            explanatory: x,
        })
    }

    pub fn response(&self) -> &Matrix {
        &self.response
    }

    pub fn explanatory(&self) -> &Matrix {
        &self.explanatory
    }

    /// Explanatory matrix with a leading column of ones.
    pub fn design_matrix(&self) -> FitResult<Matrix> {
        with_intercept(&self.explanatory)
    }

    pub fn fit(&self) -> FitResult<OlsFit> {
        let x = self.design_matrix()?;
        let n = x.nrows();
        let k = x.ncols();
        if n < k {
            return Err(FitError::InsufficientData { n, min: k });
        }

        let xt = x.transpose();
        let xtx_inv = xt.multiply(&x)?.inverse()?;
        let coefficients = xtx_inv.multiply(&xt)?.multiply(&self.response)?;

        let fitted = x.multiply(&coefficients)?;
        let residuals = self.response.subtract(&fitted)?;
        let sse = residuals.transpose().multiply(&residuals)?[(0, 0)];
        let residual_variance = sse / n as f64;
        let covariance = xtx_inv.scale(residual_variance);

        let mut t_stats = Matrix::zeros(k, 1)?;
        for i in 0..k {
            t_stats.set(i, 0, coefficients[(i, 0)] / covariance[(i, i)].sqrt());
        }

        let r_squared = r_squared(&self.response, sse);
        debug!(n_obs = n, n_params = k, sse, r_squared, "ols fit complete");

        Ok(OlsFit {
            coefficients,
            fitted,
            residuals,
            residual_variance,
            covariance,
            t_stats,
            sse,
            r_squared,
            n_obs: n,
        })
    }
}

impl OlsFit {
    /// Number of estimated coefficients, intercept included.
    pub fn n_params(&self) -> usize {
        self.coefficients.nrows()
    }

    pub fn intercept(&self) -> f64 {
        self.coefficients[(0, 0)]
    }

    /// Square roots of the covariance diagonal.
    pub fn std_errors(&self) -> Vec<f64> {
        (0..self.n_params())
            .map(|i| self.covariance[(i, i)].sqrt())
            .collect()
    }

    /// `n ln(SSE/n) + k ln(n)`.
    pub fn bic(&self) -> f64 {
        let n = self.n_obs as f64;
        n * (self.sse / n).ln() + self.n_params() as f64 * n.ln()
    }

    /// Predictions for new explanatory rows (no intercept column).
    pub fn predict(&self, x_new: &Matrix) -> FitResult<Matrix> {
        Ok(with_intercept(x_new)?.multiply(&self.coefficients)?)
    }
}

pub(crate) fn with_intercept(x: &Matrix) -> FitResult<Matrix> {
    let ones = Matrix::filled(x.nrows(), 1, 1.0)?;
    Ok(ones.concat_columns(x)?)
}

fn r_squared(y: &Matrix, sse: f64) -> f64 {
    let values = y.as_slice();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let sst: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    if sst > 0.0 { 1.0 - sse / sst } else { f64::NAN }
}
