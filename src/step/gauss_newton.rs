use faer::linalg::solvers::Llt;
use faer::prelude::Solve;
use faer::traits::ComplexField;
use faer::{Mat, Side};
use num_traits::Float;

use super::{check_column, check_parameters};
use crate::{StepError, VectorFunction};

/// Performs one step of the Gauss-Newton algorithm for non-linear least
/// squares.
///
/// Given a residual function `f` with M outputs and its M×N Jacobian `d`,
/// this solves the normal equations
///
/// ```text
/// (Jᵀ J) * s = -Jᵀ f(x)
/// ```
///
/// and returns `x + s`. `Jᵀ J` stands in for the true Hessian of the
/// sum-of-squares objective, which saves computing any second derivative;
/// the approximation is exact for residuals that are linear in the
/// parameters and good whenever residuals are small near the optimum.
///
/// The system must be determined or overdetermined: at least as many
/// residuals as parameters.
///
/// # Errors
///
/// * [`StepError::TooFewResiduals`] if `d` produces fewer rows than
///   parameters.
/// * [`StepError::NormalEquationsNotPositiveDefinite`] if the LLᵀ
///   factorization of `Jᵀ J` fails, which happens exactly when the columns
///   of the Jacobian are linearly dependent at the current point.
/// * [`StepError::ShapeMismatch`] if `f` or the parameter vector breaks the
///   column-vector contract.
pub fn gauss_newton<T, F, D>(f: &F, d: &D, x: &Mat<T>) -> Result<Mat<T>, StepError>
where
    T: ComplexField<Real = T> + Float,
    F: VectorFunction<T> + ?Sized,
    D: VectorFunction<T> + ?Sized,
{
    let n = check_parameters(x)?;
    let jacobian = d.eval(x);

    if jacobian.ncols() != n {
        return Err(StepError::ShapeMismatch {
            role: "Jacobian function",
            rows: jacobian.nrows(),
            cols: jacobian.ncols(),
            expected_rows: jacobian.nrows(),
            expected_cols: n,
        });
    }
    let m = jacobian.nrows();
    if m < n {
        return Err(StepError::TooFewResiduals {
            residuals: m,
            parameters: n,
        });
    }

    let residuals = f.eval(x);
    check_column("residual function", &residuals, m)?;

    let normal = jacobian.transpose() * jacobian.as_ref();
    let jtr = jacobian.transpose() * residuals.as_ref();
    let mut rhs = Mat::<T>::zeros(n, 1);
    for i in 0..n {
        rhs[(i, 0)] = -jtr[(i, 0)];
    }

    // Jᵀ J is symmetric positive-semi-definite by construction, so LLᵀ is
    // the decomposition whose failure is the rank-deficiency signal.
    let llt = Llt::new(normal.as_ref(), Side::Lower)
        .map_err(|_| StepError::NormalEquationsNotPositiveDefinite)?;
    let step = llt.solve(&rhs);

    let mut next = x.clone();
    for i in 0..n {
        next[(i, 0)] = next[(i, 0)] + step[(i, 0)];
    }
    Ok(next)
}
