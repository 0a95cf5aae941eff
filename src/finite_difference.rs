//! Numerical approximation of first-order partial derivatives.
//!
//! Both approximators here sample the target function at perturbed inputs
//! and assemble difference quotients into a derivative matrix, column by
//! column. They implement [`VectorFunction`], so a constructed approximator
//! drops into any step function where an analytic derivative is expected.
//!
//! The perturbation `h` has to satisfy three competing requirements: small
//! enough that the local linearization is accurate, large enough to be
//! representable, and such that `x + h` is actually distinguishable from
//! `x` after rounding. See [`StepSize`] for how the default rule handles
//! all three.

use core::fmt;
use core::hint::black_box;

use faer::Mat;
use faer::traits::ComplexField;
use num_traits::Float;

use crate::{Dims, StepError, VectorFunction};

/// How the perturbation for each coordinate is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepSize<T> {
    /// `h = sqrt(machine epsilon) * max(|x_i|, 1)`: proportional to the
    /// magnitude of the coordinate being perturbed, floored so that a zero
    /// coordinate still gets a usable step. The difference quotient is then
    /// divided by the *realized* perturbation `(x_i + h) - x_i`, recovered
    /// through a non-optimizable intermediate, which compensates for the
    /// part of `h` lost to floating-point representation.
    Scaled,
    /// One flat constant for every coordinate. Lower fidelity: no magnitude
    /// scaling and no rounding compensation. Useful when the function is
    /// only meaningful on a known scale.
    Fixed(T),
}

impl<T> Default for StepSize<T> {
    fn default() -> Self {
        Self::Scaled
    }
}

/// First-order derivative approximation by forward differences.
///
/// Column `i` of the result is `(f(x + h·e_i) - f(x)) / h`: one base
/// evaluation plus one perturbed evaluation per input dimension, with
/// truncation error of order `h`.
pub struct ForwardDifference<T, F> {
    f: F,
    dims: Dims,
    step: StepSize<T>,
}

impl<T: fmt::Debug, F> fmt::Debug for ForwardDifference<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardDifference")
            .field("dims", &self.dims)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}

impl<T, F> ForwardDifference<T, F>
where
    T: ComplexField<Real = T> + Float,
    F: VectorFunction<T>,
{
    /// Binds the approximator to `f` and its declared dimensions.
    ///
    /// The dimensions are validated here, once, so that a malformed
    /// declaration surfaces as an error at construction rather than a
    /// panic deep inside an iteration loop.
    pub fn new(f: F, dims: Dims) -> Result<Self, StepError> {
        check_dims(dims)?;
        Ok(Self {
            f,
            dims,
            step: StepSize::Scaled,
        })
    }

    /// Replaces the default [`StepSize::Scaled`] perturbation rule.
    pub fn with_step_size(mut self, step: StepSize<T>) -> Self {
        self.step = step;
        self
    }
}

impl<T, F> VectorFunction<T> for ForwardDifference<T, F>
where
    T: ComplexField<Real = T> + Float,
    F: VectorFunction<T>,
{
    fn eval(&self, x: &Mat<T>) -> Mat<T> {
        let n = self.dims.x_rows;
        let m = self.dims.y_rows;
        debug_assert_eq!(x.nrows(), n, "input does not match declared dims");

        let base = self.f.eval(x);
        let mut d = Mat::<T>::zeros(m, n);
        let mut probe = x.clone();
        for i in 0..n {
            let xi = x[(i, 0)];
            let (forward, h) = forward_probe(self.step, xi);
            probe[(i, 0)] = forward;
            let perturbed = self.f.eval(&probe);
            for r in 0..m {
                d[(r, i)] = (perturbed[(r, 0)] - base[(r, 0)]) / h;
            }
            probe[(i, 0)] = xi;
        }
        into_column_convention(d)
    }
}

/// First-order derivative approximation by central differences.
///
/// Column `i` of the result is `(f(x + h·e_i) - f(x - h·e_i)) / 2h`: two
/// evaluations per input dimension, twice the cost of
/// [`ForwardDifference`], but the symmetric stencil cancels the even error
/// terms and leaves truncation error of order `h²`.
pub struct CentralDifference<T, F> {
    f: F,
    dims: Dims,
    step: StepSize<T>,
}

impl<T: fmt::Debug, F> fmt::Debug for CentralDifference<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CentralDifference")
            .field("dims", &self.dims)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}

impl<T, F> CentralDifference<T, F>
where
    T: ComplexField<Real = T> + Float,
    F: VectorFunction<T>,
{
    /// Binds the approximator to `f` and its declared dimensions,
    /// validating the dimensions once at this boundary.
    pub fn new(f: F, dims: Dims) -> Result<Self, StepError> {
        check_dims(dims)?;
        Ok(Self {
            f,
            dims,
            step: StepSize::Scaled,
        })
    }

    /// Replaces the default [`StepSize::Scaled`] perturbation rule.
    pub fn with_step_size(mut self, step: StepSize<T>) -> Self {
        self.step = step;
        self
    }
}

impl<T, F> VectorFunction<T> for CentralDifference<T, F>
where
    T: ComplexField<Real = T> + Float,
    F: VectorFunction<T>,
{
    fn eval(&self, x: &Mat<T>) -> Mat<T> {
        let n = self.dims.x_rows;
        let m = self.dims.y_rows;
        debug_assert_eq!(x.nrows(), n, "input does not match declared dims");

        let mut d = Mat::<T>::zeros(m, n);
        let mut probe = x.clone();
        for i in 0..n {
            let xi = x[(i, 0)];
            let (forward, backward, spacing) = central_probe(self.step, xi);
            probe[(i, 0)] = forward;
            let ahead = self.f.eval(&probe);
            probe[(i, 0)] = backward;
            let behind = self.f.eval(&probe);
            for r in 0..m {
                d[(r, i)] = (ahead[(r, 0)] - behind[(r, 0)]) / spacing;
            }
            probe[(i, 0)] = xi;
        }
        into_column_convention(d)
    }
}

/// Chooses the forward perturbation for one coordinate. Returns the
/// perturbed coordinate and the realized step between the two points.
fn forward_probe<T: Float>(rule: StepSize<T>, xi: T) -> (T, T) {
    match rule {
        StepSize::Fixed(h) => (xi + h, h),
        StepSize::Scaled => {
            let h = T::epsilon().sqrt() * xi.abs().max(T::one());
            // The rounded sum must actually happen; black_box keeps the
            // compiler from folding (xi + h) - xi back into h.
            let forward = black_box(xi + h);
            (forward, forward - xi)
        }
    }
}

/// Chooses the symmetric perturbation for one coordinate. Returns the two
/// probe points and the realized spacing between them.
fn central_probe<T: Float>(rule: StepSize<T>, xi: T) -> (T, T, T) {
    match rule {
        StepSize::Fixed(h) => (xi + h, xi - h, h + h),
        StepSize::Scaled => {
            let h = T::epsilon().sqrt() * xi.abs().max(T::one());
            let forward = black_box(xi + h);
            let backward = black_box(xi - h);
            (forward, backward, forward - backward)
        }
    }
}

/// Gradient vectors are columns by convention, while the difference loop
/// naturally fills one row per output. A single-row result is therefore a
/// scalar-valued function's gradient and gets transposed; a multi-row
/// Jacobian is returned as computed.
fn into_column_convention<T: ComplexField<Real = T>>(d: Mat<T>) -> Mat<T> {
    if d.nrows() == 1 {
        d.transpose().to_owned()
    } else {
        d
    }
}

fn check_dims(dims: Dims) -> Result<(), StepError> {
    if dims.x_rows == 0 || dims.y_rows == 0 {
        return Err(StepError::EmptySystem);
    }
    if dims.x_cols != 1 {
        return Err(StepError::ShapeMismatch {
            role: "declared input dims",
            rows: dims.x_rows,
            cols: dims.x_cols,
            expected_rows: dims.x_rows,
            expected_cols: 1,
        });
    }
    if dims.y_cols != 1 {
        return Err(StepError::ShapeMismatch {
            role: "declared output dims",
            rows: dims.y_rows,
            cols: dims.y_cols,
            expected_rows: dims.y_rows,
            expected_cols: 1,
        });
    }
    Ok(())
}
