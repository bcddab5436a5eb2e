//! End-to-end scenarios across the engine and the regression layer.

use ar_scratch::domain::{SampleConfig, SelectionConfig, SpotConfig};
use ar_scratch::fit::select_lag;
use ar_scratch::math::LuDecomposition;
use ar_scratch::models::{ArSpec, LinearRegression, lag_matrix};
use ar_scratch::report::{ArSummary, format_lag_selection};
use ar_scratch::spot::SpotPricePrediction;
use ar_scratch::{FitError, Matrix, MatrixError};

fn col(values: &[f64]) -> Matrix {
    Matrix::column_vector(values).unwrap()
}

#[test]
fn lu_and_inverse_of_reference_matrix() {
    let a = Matrix::from_rows(vec![vec![4.0, 3.0], vec![6.0, 3.0]]).unwrap();

    let LuDecomposition { l, u } = a.lu().unwrap();
    let l_expected = Matrix::from_rows(vec![vec![1.0, 0.0], vec![1.5, 1.0]]).unwrap();
    let u_expected = Matrix::from_rows(vec![vec![4.0, 3.0], vec![0.0, -1.5]]).unwrap();
    assert!(l.approx_eq(&l_expected, 1e-12));
    assert!(u.approx_eq(&u_expected, 1e-12));

    let inv = a.inverse().unwrap();
    assert!((inv[(0, 0)] + 0.5).abs() < 1e-4);
    assert!((inv[(0, 1)] - 0.5).abs() < 1e-4);
    assert!((inv[(1, 0)] - 1.0).abs() < 1e-4);
    assert!((inv[(1, 1)] + 0.6667).abs() < 1e-4);
}

#[test]
fn ols_perfect_fit() {
    let y = col(&[1.0, 2.0, 3.0, 4.0]);
    let x = col(&[1.0, 2.0, 3.0, 4.0]);
    let fit = LinearRegression::new(y, x).unwrap().fit().unwrap();

    assert!(fit.intercept().abs() < 1e-9);
    assert!((fit.coefficients[(1, 0)] - 1.0).abs() < 1e-9);
    assert!(fit.residuals.as_slice().iter().all(|e| e.abs() < 1e-9));
}

#[test]
fn ar1_on_counting_series() {
    let series = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);

    let lagged = lag_matrix(&series, 1).unwrap();
    assert_eq!(lagged.design, col(&[1.0, 2.0, 3.0, 4.0]));
    assert_eq!(lagged.response, col(&[2.0, 3.0, 4.0, 5.0]));

    let fit = ArSpec::new(1).fit(&series).unwrap();
    assert!((fit.intercept() - 1.0).abs() < 1e-9);
    assert!((fit.ar_coefficients()[0] - 1.0).abs() < 1e-9);
    assert!(fit.residuals().as_slice().iter().all(|e| e.abs() < 1e-9));
}

#[test]
fn truncate_past_the_end_is_out_of_bounds() {
    let a = Matrix::zeros(2, 2).unwrap();
    assert!(matches!(
        a.truncate(1, 3, 1, 2),
        Err(MatrixError::OutOfBounds { .. })
    ));
}

#[test]
fn subtract_with_mismatched_rows_fails() {
    let a = Matrix::zeros(2, 2).unwrap();
    let b = Matrix::zeros(3, 2).unwrap();
    assert!(matches!(
        a.subtract(&b),
        Err(MatrixError::DimensionMismatch { .. })
    ));
}

#[test]
fn engine_errors_reach_the_regression_caller() {
    // Constant regressor duplicates the intercept column.
    let y = col(&[1.0, 2.0, 3.0, 4.0]);
    let x = col(&[5.0, 5.0, 5.0, 5.0]);
    let err = LinearRegression::new(y, x).unwrap().fit().unwrap_err();
    assert!(matches!(
        err,
        FitError::Matrix(MatrixError::SingularMatrix { .. })
    ));
}

#[test]
fn synthetic_prices_through_selection_and_spot_prediction() {
    let history = ar_scratch::data::generate_price_path(&SampleConfig {
        count: 600,
        ..SampleConfig::default()
    })
    .unwrap();
    let series = Matrix::column_vector(&history.prices).unwrap();

    let selection = select_lag(&series, &SelectionConfig::default()).unwrap();
    // Data is AR(1) with phi = 0.8.
    let phi = selection.best.ar_coefficients()[0];
    assert!((phi - 0.8).abs() < 0.1, "phi={phi}");
    assert!(format_lag_selection(&selection).contains('*'));

    let config = SpotConfig {
        lag: selection.best.lag(),
    };
    let spot = SpotPricePrediction::new(history, &config).unwrap();
    let summary = ArSummary::from_fit(spot.model());
    assert_eq!(summary.lag, selection.best.lag());
    let (_, next) = spot.next_price().unwrap();
    assert!((summary.next_forecast - next).abs() < 1e-12);
}
