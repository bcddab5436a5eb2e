//! AR(p) models fitted by OLS on a lagged design matrix.
//!
//! ```text
//! y_t = c + φ_1 y_{t-1} + ... + φ_p y_{t-p} + e_t
//! ```
//!
//! Building the model is a two-stage pipeline: [`lag_matrix`] slices the
//! series into the `p` lag columns and the aligned response, then the pair is
//! handed to [`LinearRegression`]. The estimator only ever sees complete
//! inputs.

use serde::Serialize;
use tracing::debug;

use crate::error::{FitError, FitResult, MatrixError};
use crate::math::Matrix;
use crate::models::ols::{LinearRegression, OlsFit};

/// Lagged regressors and aligned response for an AR(p) fit.
#[derive(Debug, Clone, PartialEq)]
pub struct LaggedSeries {
    /// `(n-p) x p`; row `t` holds `y_{t-1}, ..., y_{t-p}`.
    pub design: Matrix,
    /// `(n-p) x 1`; `y_{p+1}, ..., y_n`.
    pub response: Matrix,
}

/// Build the lag matrix and the response tail from a single-column series.
///
/// Requires at least `lag + 1` observations so that one row remains.
pub fn lag_matrix(series: &Matrix, lag: usize) -> FitResult<LaggedSeries> {
    if series.ncols() != 1 {
        return Err(MatrixError::DimensionMismatch {
            op: "lag_matrix",
            left: series.shape(),
            right: (series.nrows(), 1),
        }
        .into());
    }
    if lag == 0 {
        return Err(FitError::InvalidLag(lag));
    }
    let n = series.nrows();
    if n <= lag {
        return Err(FitError::InsufficientData { n, min: lag + 1 });
    }

    // Column i (1-based) is the series shifted down by i.
    let mut design = series.truncate(lag, n - 1, 1, 1)?;
    for i in 2..=lag {
        let shifted = series.truncate(lag + 1 - i, n - i, 1, 1)?;
        design = design.concat_columns(&shifted)?;
    }
    let response = series.truncate(lag + 1, n, 1, 1)?;

    Ok(LaggedSeries { design, response })
}

/// AR order, before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArSpec {
    lag: usize,
}

impl ArSpec {
    pub fn new(lag: usize) -> Self {
        Self { lag }
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Smallest series length that leaves at least as many rows as
    /// parameters (`p` lags plus the intercept).
    pub fn min_observations(&self) -> usize {
        2 * self.lag + 1
    }

    pub fn fit(&self, series: &Matrix) -> FitResult<ArFit> {
        if self.lag == 0 {
            return Err(FitError::InvalidLag(self.lag));
        }
        let n = series.nrows();
        if n < self.min_observations() {
            return Err(FitError::InsufficientData {
                n,
                min: self.min_observations(),
            });
        }

        let LaggedSeries { design, response } = lag_matrix(series, self.lag)?;
        let ols = LinearRegression::new(response, design)?.fit()?;

        let tail = series.truncate(n - self.lag + 1, n, 1, 1)?.column(0);
        debug!(lag = self.lag, n_obs = ols.n_obs, sse = ols.sse, "ar fit complete");

        Ok(ArFit {
            lag: self.lag,
            ols,
            tail,
        })
    }

    /// Convenience wrapper over [`ArSpec::fit`] for plain slices.
    pub fn fit_slice(&self, series: &[f64]) -> FitResult<ArFit> {
        if series.is_empty() {
            return Err(FitError::EmptyData);
        }
        self.fit(&Matrix::column_vector(series)?)
    }
}

/// A fitted AR(p) model.
#[derive(Debug, Clone, Serialize)]
pub struct ArFit {
    lag: usize,
    ols: OlsFit,
    /// Last `lag` observations, oldest first.
    tail: Vec<f64>,
}

impl ArFit {
    pub fn lag(&self) -> usize {
        self.lag
    }

    pub fn ols(&self) -> &OlsFit {
        &self.ols
    }

    pub fn intercept(&self) -> f64 {
        self.ols.intercept()
    }

    /// `φ_1 .. φ_p`, nearest lag first.
    pub fn ar_coefficients(&self) -> Vec<f64> {
        self.ols.coefficients.as_slice()[1..].to_vec()
    }

    /// In-sample one-step predictions for `y_{p+1} .. y_n`.
    pub fn predictions(&self) -> &Matrix {
        &self.ols.fitted
    }

    pub fn residuals(&self) -> &Matrix {
        &self.ols.residuals
    }

    /// One-step-ahead forecast from the end of the series.
    pub fn forecast_next(&self) -> f64 {
        self.step(&self.tail)
    }

    /// Recursive multi-step forecast; each step feeds on the previous ones.
    pub fn forecast(&self, steps: usize) -> Vec<f64> {
        let mut window = self.tail.clone();
        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            let next = self.step(&window);
            window.remove(0);
            window.push(next);
            out.push(next);
        }
        out
    }

    fn step(&self, window: &[f64]) -> f64 {
        let phi = &self.ols.coefficients.as_slice()[1..];
        let lagged = window.iter().rev();
        self.intercept() + phi.iter().zip(lagged).map(|(p, y)| p * y).sum::<f64>()
    }
}
