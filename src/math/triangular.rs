//! Forward/back substitution and triangular inversion.
//!
//! Solvers take a single right-hand-side column. Inversion solves `T x = e_i`
//! for each basis vector and writes `x` straight into column `i` of the result.

use crate::error::{MatrixError, MatrixResult, Triangle};
use crate::math::Matrix;

impl Matrix {
    /// Solve `L y = f` by forward substitution.
    pub fn solve_lower(&self, f: &Matrix) -> MatrixResult<Matrix> {
        self.check_triangular_system(f, Triangle::Lower)?;

        let n = self.nrows();
        let mut y = Matrix::zeros(n, 1)?;
        for m in 0..n {
            let sum: f64 = (0..m).map(|i| self[(m, i)] * y[(i, 0)]).sum();
            y.set(m, 0, divide_by_pivot(f[(m, 0)] - sum, self[(m, m)], m)?);
        }
        Ok(y)
    }

    /// Solve `U x = y` by back substitution.
    pub fn solve_upper(&self, y: &Matrix) -> MatrixResult<Matrix> {
        self.check_triangular_system(y, Triangle::Upper)?;

        let n = self.nrows();
        let mut x = Matrix::zeros(n, 1)?;
        for i in (0..n).rev() {
            let sum: f64 = (i + 1..n).map(|k| self[(i, k)] * x[(k, 0)]).sum();
            x.set(i, 0, divide_by_pivot(y[(i, 0)] - sum, self[(i, i)], i)?);
        }
        Ok(x)
    }

    pub fn invert_lower(&self) -> MatrixResult<Matrix> {
        self.invert_triangular(Triangle::Lower)
    }

    pub fn invert_upper(&self) -> MatrixResult<Matrix> {
        self.invert_triangular(Triangle::Upper)
    }

    fn invert_triangular(&self, kind: Triangle) -> MatrixResult<Matrix> {
        self.check_triangular(kind)?;

        let n = self.nrows();
        let mut inv = Matrix::zeros(n, n)?;
        let mut basis = Matrix::zeros(n, 1)?;
        for i in 0..n {
            if i > 0 {
                basis.set(i - 1, 0, 0.0);
            }
            basis.set(i, 0, 1.0);

            let col = match kind {
                Triangle::Lower => self.solve_lower(&basis)?,
                Triangle::Upper => self.solve_upper(&basis)?,
            };
            for r in 0..n {
                inv.set(r, i, col[(r, 0)]);
            }
        }
        Ok(inv)
    }

    fn check_triangular(&self, kind: Triangle) -> MatrixResult<()> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        let ok = match kind {
            Triangle::Lower => self.is_lower(),
            Triangle::Upper => self.is_upper(),
        };
        if ok {
            Ok(())
        } else {
            Err(MatrixError::NotTriangular { expected: kind })
        }
    }

    fn check_triangular_system(&self, rhs: &Matrix, kind: Triangle) -> MatrixResult<()> {
        self.check_triangular(kind)?;
        if rhs.ncols() != 1 || rhs.nrows() != self.nrows() {
            let op = match kind {
                Triangle::Lower => "solve_lower",
                Triangle::Upper => "solve_upper",
            };
            return Err(MatrixError::DimensionMismatch {
                op,
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(())
    }
}

fn divide_by_pivot(numer: f64, pivot: f64, index: usize) -> MatrixResult<f64> {
    if pivot == 0.0 || !pivot.is_finite() {
        return Err(MatrixError::SingularMatrix { pivot: index });
    }
    Ok(numer / pivot)
}
