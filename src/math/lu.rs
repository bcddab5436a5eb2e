//! Doolittle LU decomposition without pivoting.
//!
//! For a square `M` of order `n` we build `L` (unit lower triangular) and `U`
//! (upper triangular) one row block at a time:
//!
//! ```text
//! U[i,j] = M[i,j] - Σ_{k<i} L[i,k] U[k,j]              for j >= i
//! L[j,i] = (M[j,i] - Σ_{k<i} L[j,k] U[k,i]) / U[i,i]   for j > i
//! ```
//!
//! There is no row exchange, so a matrix whose leading principal minor is zero
//! fails with [`MatrixError::SingularMatrix`] even when it is invertible.

use tracing::trace;

use crate::error::{MatrixError, MatrixResult};
use crate::math::Matrix;

/// `L` and `U` factors with `L * U == M`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    pub l: Matrix,
    pub u: Matrix,
}

impl Matrix {
    /// Factor a square matrix into unit-lower `L` and upper `U`.
    pub fn lu(&self) -> MatrixResult<LuDecomposition> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }

        let n = self.nrows();
        let mut l = Matrix::identity(n)?;
        let mut u = Matrix::zeros(n, n)?;

        for i in 0..n {
            for j in i..n {
                let sum: f64 = (0..i).map(|k| l[(i, k)] * u[(k, j)]).sum();
                u.set(i, j, self[(i, j)] - sum);
            }

            let pivot = u[(i, i)];
            if pivot == 0.0 || !pivot.is_finite() {
                return Err(MatrixError::SingularMatrix { pivot: i });
            }

            for j in i + 1..n {
                let sum: f64 = (0..i).map(|k| l[(j, k)] * u[(k, i)]).sum();
                l.set(j, i, (self[(j, i)] - sum) / pivot);
            }
        }

        trace!(order = n, "lu decomposition complete");
        Ok(LuDecomposition { l, u })
    }
}
