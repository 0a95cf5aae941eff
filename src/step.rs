//! Single steps of iterative numerical algorithms.
//!
//! Each function takes the current parameter vector by shared reference and
//! returns the updated vector, leaving the caller's copy untouched. That
//! makes a step a pure function of its inputs: trivially composable, and on
//! failure there is no half-updated state to unwind.

mod gauss_newton;
mod gradient_descent;
mod newton_raphson;

pub use gauss_newton::gauss_newton;
pub use gradient_descent::gradient_descent;
pub use newton_raphson::newton_raphson;

use faer::Mat;

use crate::StepError;

/// Checks the caller's parameter vector: nonempty, and a column.
/// Returns N, the number of parameters.
pub(crate) fn check_parameters<T>(x: &Mat<T>) -> Result<usize, StepError> {
    if x.nrows() == 0 {
        return Err(StepError::EmptySystem);
    }
    if x.ncols() != 1 {
        return Err(StepError::ShapeMismatch {
            role: "parameter vector",
            rows: x.nrows(),
            cols: x.ncols(),
            expected_rows: x.nrows(),
            expected_cols: 1,
        });
    }
    Ok(x.nrows())
}

/// Checks that a callable's output is the `rows`×1 column its role demands.
pub(crate) fn check_column<T>(role: &'static str, m: &Mat<T>, rows: usize) -> Result<(), StepError> {
    if m.nrows() != rows || m.ncols() != 1 {
        return Err(StepError::ShapeMismatch {
            role,
            rows: m.nrows(),
            cols: m.ncols(),
            expected_rows: rows,
            expected_cols: 1,
        });
    }
    Ok(())
}
