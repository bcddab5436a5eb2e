//! Dense row-major `f64` matrix: storage, arithmetic and structural transforms.
//!
//! Every operation returns a fresh [`Matrix`]; operands are never mutated.
//! Shape violations come back as [`MatrixError`] rather than a degenerate
//! placeholder, so a valid 1x1 result can always be told apart from a failure.

use std::fmt;
use std::ops::Index;

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{MatrixError, MatrixResult};

/// Result row count from which `multiply` splits rows across the rayon pool.
///
/// Regression design matrices are usually far below this, where the thread
/// hand-off costs more than the product itself.
const PAR_MIN_ROWS: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> MatrixResult<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// `rows x cols` matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> MatrixResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::EmptyShape { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        })
    }

    /// Identity matrix of order `n`.
    pub fn identity(n: usize) -> MatrixResult<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        Ok(m)
    }

    /// Wrap nested rows. The shape is taken from the data itself.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> MatrixResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(MatrixError::EmptyShape {
                rows: n_rows,
                cols: n_cols,
            });
        }

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected: n_cols,
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Take ownership of a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> MatrixResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::EmptyShape { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(MatrixError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Copy a flat row-major slice.
    pub fn from_row_slice(rows: usize, cols: usize, values: &[f64]) -> MatrixResult<Self> {
        Self::from_vec(rows, cols, values.to_vec())
    }

    /// Single-column matrix holding `values` top to bottom.
    pub fn column_vector(values: &[f64]) -> MatrixResult<Self> {
        Self::from_row_slice(values.len(), 1, values)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Checked cell access.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[self.offset(row, col)])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self[(i, col)]).collect()
    }

    /// Elementwise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Cell write, reserved for factory code building a result in place.
    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        let offset = self.offset(row, col);
        self.data[offset] = value;
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                op: "multiply",
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        let mut out = Matrix::zeros(self.rows, rhs.cols)?;
        let fill_row = |(i, out_row): (usize, &mut [f64])| {
            let lhs_row = self.row(i);
            for (j, cell) in out_row.iter_mut().enumerate() {
                let mut s = 0.0;
                for (m, a) in lhs_row.iter().enumerate() {
                    s += a * rhs.data[m * rhs.cols + j];
                }
                *cell = s;
            }
        };

        if self.rows >= PAR_MIN_ROWS {
            out.data
                .par_chunks_mut(rhs.cols)
                .enumerate()
                .for_each(fill_row);
        } else {
            out.data.chunks_mut(rhs.cols).enumerate().for_each(fill_row);
        }
        Ok(out)
    }

    /// Elementwise difference `self - rhs`. Shapes must match exactly.
    pub fn subtract(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::DimensionMismatch {
                op: "subtract",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(a, b)| a - b)
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Every cell multiplied by `factor`.
    pub fn scale(&self, factor: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * factor).collect(),
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self[(i, j)]);
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Extract a sub-block using 1-based inclusive bounds.
    ///
    /// `truncate(1, 2, 2, 3)` on a 3x3 matrix returns the top two rows of the
    /// last two columns.
    pub fn truncate(
        &self,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> MatrixResult<Matrix> {
        let zero_bound = row_start == 0 || row_end == 0 || col_start == 0 || col_end == 0;
        if zero_bound || row_end < row_start || col_end < col_start {
            return Err(MatrixError::IncoherentRange {
                row_start,
                row_end,
                col_start,
                col_end,
            });
        }
        if row_end > self.rows || col_end > self.cols {
            return Err(MatrixError::OutOfBounds {
                row_end,
                col_end,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let n_cols = col_end - col_start + 1;
        let mut data = Vec::with_capacity((row_end - row_start + 1) * n_cols);
        for i in row_start - 1..row_end {
            data.extend_from_slice(&self.row(i)[col_start - 1..col_end]);
        }
        Matrix::from_vec(row_end - row_start + 1, n_cols, data)
    }

    /// Append the columns of `rhs` to the right of `self`.
    pub fn concat_columns(&self, rhs: &Matrix) -> MatrixResult<Matrix> {
        if self.rows != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                op: "concat_columns",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let cols = self.cols + rhs.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            data.extend_from_slice(self.row(i));
            data.extend_from_slice(rhs.row(i));
        }
        Ok(Matrix {
            rows: self.rows,
            cols,
            data,
        })
    }

    /// True iff every entry strictly above the diagonal is exactly zero.
    pub fn is_lower(&self) -> bool {
        (0..self.rows).all(|i| self.row(i).iter().skip(i + 1).all(|&v| v == 0.0))
    }

    /// True iff every entry strictly below the diagonal is exactly zero.
    pub fn is_upper(&self) -> bool {
        (0..self.rows).all(|i| self.row(i).iter().take(i).all(|&v| v == 0.0))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index ({}, {}) out of bounds for {}x{}",
            index.0,
            index.1,
            self.rows,
            self.cols
        );
        &self.data[self.offset(index.0, index.1)]
    }
}

/// Tab-separated rows, one line per row.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision();
        for i in 0..self.rows {
            let line = self
                .row(i)
                .iter()
                .map(|v| match precision {
                    Some(p) => format!("{v:.p$}"),
                    None => v.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
        let data = (0..rows * cols).map(|_| rng.gen_range(-5.0..5.0)).collect();
        Matrix::from_vec(rows, cols, data).unwrap()
    }

    #[test]
    fn zeros_rejects_empty_shape() {
        assert_eq!(
            Matrix::zeros(0, 3),
            Err(MatrixError::EmptyShape { rows: 0, cols: 3 })
        );
        let z = Matrix::zeros(2, 3).unwrap();
        assert_eq!(z.shape(), (2, 3));
        assert!(z.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn from_vec_checks_buffer_length() {
        let err = Matrix::from_vec(2, 2, vec![1.0; 3]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::BufferLength {
                rows: 2,
                cols: 2,
                len: 3
            }
        );
    }

    #[test]
    fn multiply_small_product() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = m(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c, m(vec![vec![58.0, 64.0], vec![139.0, 154.0]]));
    }

    #[test]
    fn multiply_rejects_inner_mismatch() {
        let a = Matrix::zeros(2, 3).unwrap();
        let b = Matrix::zeros(2, 2).unwrap();
        assert!(matches!(
            a.multiply(&b),
            Err(MatrixError::DimensionMismatch { op: "multiply", .. })
        ));
    }

    #[test]
    fn multiply_parallel_path_matches_sequential_definition() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = random_matrix(&mut rng, PAR_MIN_ROWS + 5, 4);
        let b = random_matrix(&mut rng, 4, 3);
        let c = a.multiply(&b).unwrap();
        for i in 0..a.nrows() {
            for j in 0..b.ncols() {
                let expected: f64 = (0..4).map(|k| a[(i, k)] * b[(k, j)]).sum();
                assert!((c[(i, j)] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn subtract_rejects_partial_overlap() {
        let a = Matrix::zeros(2, 2).unwrap();
        let b = Matrix::zeros(3, 2).unwrap();
        assert_eq!(
            a.subtract(&b),
            Err(MatrixError::DimensionMismatch {
                op: "subtract",
                left: (2, 2),
                right: (3, 2)
            })
        );
    }

    #[test]
    fn subtract_elementwise() {
        let a = m(vec![vec![5.0, 4.0], vec![3.0, 2.0]]);
        let b = m(vec![vec![1.0, 1.0], vec![1.0, 3.0]]);
        assert_eq!(
            a.subtract(&b).unwrap(),
            m(vec![vec![4.0, 3.0], vec![2.0, -1.0]])
        );
    }

    #[test]
    fn transpose_round_trips() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let rows = rng.gen_range(1..6);
            let cols = rng.gen_range(1..6);
            let a = random_matrix(&mut rng, rows, cols);
            let t = a.transpose();
            assert_eq!(t.shape(), (cols, rows));
            assert_eq!(t.transpose(), a);
        }
    }

    #[test]
    fn truncate_extracts_one_based_block() {
        let a = m(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        let block = a.truncate(2, 3, 2, 3).unwrap();
        assert_eq!(block, m(vec![vec![5.0, 6.0], vec![8.0, 9.0]]));
        assert_eq!(a.truncate(1, 3, 1, 3).unwrap(), a);
    }

    #[test]
    fn truncate_rejects_out_of_bounds_without_partial_result() {
        let a = Matrix::zeros(3, 2).unwrap();
        assert_eq!(
            a.truncate(1, 4, 1, 2),
            Err(MatrixError::OutOfBounds {
                row_end: 4,
                col_end: 2,
                rows: 3,
                cols: 2
            })
        );
    }

    #[test]
    fn truncate_rejects_incoherent_ranges() {
        let a = Matrix::zeros(3, 3).unwrap();
        for (rs, re, cs, ce) in [(0, 1, 1, 1), (2, 1, 1, 1), (1, 1, 3, 2), (1, 1, 1, 0)] {
            assert!(matches!(
                a.truncate(rs, re, cs, ce),
                Err(MatrixError::IncoherentRange { .. })
            ));
        }
    }

    #[test]
    fn concat_then_truncate_recovers_both_sides() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = random_matrix(&mut rng, 4, 2);
        let b = random_matrix(&mut rng, 4, 3);
        let ab = a.concat_columns(&b).unwrap();
        assert_eq!(ab.shape(), (4, 5));
        assert_eq!(ab.truncate(1, 4, 1, 2).unwrap(), a);
        assert_eq!(ab.truncate(1, 4, 3, 5).unwrap(), b);
    }

    #[test]
    fn concat_rejects_row_mismatch() {
        let a = Matrix::zeros(2, 1).unwrap();
        let b = Matrix::zeros(3, 1).unwrap();
        assert!(matches!(
            a.concat_columns(&b),
            Err(MatrixError::DimensionMismatch {
                op: "concat_columns",
                ..
            })
        ));
    }

    #[test]
    fn triangular_predicates_are_exact() {
        let lower = m(vec![vec![1.0, 0.0], vec![2.0, 3.0]]);
        let upper = lower.transpose();
        assert!(lower.is_lower() && !lower.is_upper());
        assert!(upper.is_upper() && !upper.is_lower());

        let almost = m(vec![vec![1.0, 1e-300], vec![2.0, 3.0]]);
        assert!(!almost.is_lower());

        let diag = Matrix::identity(3).unwrap();
        assert!(diag.is_lower() && diag.is_upper());
    }

    #[test]
    fn display_writes_tab_separated_rows() {
        let a = m(vec![vec![1.0, 2.5], vec![-3.0, 4.0]]);
        assert_eq!(a.to_string(), "1\t2.5\n-3\t4\n");
        assert_eq!(format!("{a:.2}"), "1.00\t2.50\n-3.00\t4.00\n");
    }
}
