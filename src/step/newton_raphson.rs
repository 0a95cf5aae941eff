use faer::Mat;
use faer::prelude::Solve;
use faer::traits::ComplexField;
use num_traits::Float;

use super::{check_column, check_parameters};
use crate::{StepError, VectorFunction};

/// A singular value below this fraction of the largest one counts as zero
/// when revealing the Jacobian's numerical rank.
const RANK_TOLERANCE: f64 = 1e-8;

/// Performs one step of the Newton-Raphson root finding algorithm.
///
/// Newton-Raphson iteratively finds a root of `f` by intersecting the
/// linearization of `f` at the current point with zero. For vector-valued
/// `f` that means solving the linear system
///
/// ```text
/// J(x) * s = -f(x)
/// ```
///
/// where `J` is the M×N Jacobian of all first-order partial derivatives,
/// and taking `x + s` as the improved estimate. Only the square case M = N
/// is supported: the number of equations must match the number of unknowns.
///
/// The same step optimizes a scalar function: a stationary point is a root
/// of the gradient, so pass the first derivative as `f` and the second
/// derivative (Hessian) as `d`. Note that a stationary point can be a
/// minimum, maximum, or saddle point; which one you converged to is for the
/// caller to classify, for example by the sign of the second derivative.
///
/// # Errors
///
/// * [`StepError::JacobianNotSquare`] if `d` produces a non-square matrix.
/// * [`StepError::SingularJacobian`] if the Jacobian's numerically revealed
///   rank is below N, i.e. the linearized system has no unique solution at
///   this point. The rank is read off the singular values, thresholded
///   relative to the largest one.
/// * [`StepError::ShapeMismatch`] if `f` or the parameter vector breaks the
///   column-vector contract.
pub fn newton_raphson<T, F, D>(f: &F, d: &D, x: &Mat<T>) -> Result<Mat<T>, StepError>
where
    T: ComplexField<Real = T> + Float,
    F: VectorFunction<T> + ?Sized,
    D: VectorFunction<T> + ?Sized,
{
    let n = check_parameters(x)?;
    let jacobian = d.eval(x);

    if jacobian.nrows() != jacobian.ncols() {
        // We do not cope with more equations than unknowns here.
        return Err(StepError::JacobianNotSquare {
            rows: jacobian.nrows(),
            cols: jacobian.ncols(),
        });
    }
    if jacobian.ncols() != n {
        return Err(StepError::ShapeMismatch {
            role: "Jacobian function",
            rows: jacobian.nrows(),
            cols: jacobian.ncols(),
            expected_rows: n,
            expected_cols: n,
        });
    }

    // Reveal the numerical rank from the singular values. The tolerance
    // scales with the largest singular value, not an absolute cutoff.
    let svd = jacobian.svd().map_err(StepError::Svd)?;
    let sigma = svd.S().column_vector();
    let largest = sigma.iter().copied().fold(T::zero(), Float::max);
    let tolerance =
        T::from(RANK_TOLERANCE).expect("type must support the rank tolerance") * largest;
    let rank = sigma.iter().copied().filter(|&s| s > tolerance).count();
    if rank < n {
        return Err(StepError::SingularJacobian { rank, size: n });
    }

    let y = f.eval(x);
    check_column("objective function", &y, n)?;

    let mut rhs = Mat::<T>::zeros(n, 1);
    for i in 0..n {
        rhs[(i, 0)] = -y[(i, 0)];
    }
    let step = jacobian.full_piv_lu().solve(&rhs);

    let mut next = x.clone();
    for i in 0..n {
        next[(i, 0)] = next[(i, 0)] + step[(i, 0)];
    }
    Ok(next)
}
