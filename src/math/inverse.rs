//! Square matrix inversion through the LU factors: `(LU)^-1 = U^-1 L^-1`.

use tracing::trace;

use crate::error::{MatrixError, MatrixResult};
use crate::math::{LuDecomposition, Matrix};

impl Matrix {
    /// Inverse of a square matrix.
    ///
    /// Fails with [`MatrixError::NotSquare`] for rectangular input and with
    /// [`MatrixError::SingularMatrix`] when the decomposition meets a zero pivot.
    pub fn inverse(&self) -> MatrixResult<Matrix> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }

        let LuDecomposition { l, u } = self.lu()?;
        let l_inv = l.invert_lower()?;
        let u_inv = u.invert_upper()?;

        trace!(order = self.nrows(), "inverted via lu factors");
        u_inv.multiply(&l_inv)
    }
}
