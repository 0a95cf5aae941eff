use faer::Mat;
use faer::traits::ComplexField;
use num_traits::Float;

use super::{check_column, check_parameters};
use crate::{StepError, VectorFunction};

/// Performs one step of steepest descent with a fixed step length.
///
/// A differentiable function decreases fastest along its negative gradient,
/// so the update is simply `x - step * d(x)`. No linear system is solved
/// and nothing here can fail numerically; a step length large enough to
/// diverge is a tuning problem for the caller's loop, not something this
/// primitive detects. Line search, momentum, and decay schedules are all
/// left to wrappers.
///
/// The gradient may come back as an N×1 column or a 1×N row; the row form
/// is transposed to keep the column convention.
///
/// # Errors
///
/// * [`StepError::ShapeMismatch`] if `d` produces something that is neither
///   an N×1 column nor a 1×N row, or the parameter vector is not a column.
pub fn gradient_descent<T, D>(d: &D, x: &Mat<T>, step: T) -> Result<Mat<T>, StepError>
where
    T: ComplexField<Real = T> + Float,
    D: VectorFunction<T> + ?Sized,
{
    let n = check_parameters(x)?;

    let mut gradient = d.eval(x);
    if gradient.nrows() == 1 && gradient.ncols() == n && n != 1 {
        gradient = gradient.transpose().to_owned();
    }
    check_column("gradient function", &gradient, n)?;

    let mut next = x.clone();
    for i in 0..n {
        next[(i, 0)] = next[(i, 0)] - step * gradient[(i, 0)];
    }
    Ok(next)
}
