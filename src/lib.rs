//! Single-step numerical optimization and root-finding primitives.
//!
//! Every algorithm here performs exactly one step: evaluate the caller's
//! functions at the current parameters, solve one linear system (gradient
//! descent skips even that), and return the updated parameter vector.
//! Iteration loops, convergence tests, and retry policy belong to the
//! caller. A typical driver looks like:
//!
//! ```
//! use faer::Mat;
//! use stepopt::newton_raphson;
//!
//! // Roots of f(x) = x^2 - 2.
//! let f = |x: &Mat<f64>| Mat::from_fn(1, 1, |_, _| x[(0, 0)] * x[(0, 0)] - 2.0);
//! let d = |x: &Mat<f64>| Mat::from_fn(1, 1, |_, _| 2.0 * x[(0, 0)]);
//!
//! let mut x = Mat::from_fn(1, 1, |_, _| 1.0_f64);
//! while f(&x).norm_l2() > 1e-12 {
//!     x = newton_raphson(&f, &d, &x).unwrap();
//! }
//! assert!((x[(0, 0)] - 2.0_f64.sqrt()).abs() < 1e-12);
//! ```
//!
//! Parameter vectors are N×1 columns, Jacobians are M×N (one row per
//! output, one column per parameter), and gradients returned by derivative
//! functions are columns. When an analytic derivative is unavailable,
//! [`ForwardDifference`] and [`CentralDifference`] build one from function
//! evaluations alone and slot into the same argument position.

pub use crate::error::StepError;
pub use crate::finite_difference::{CentralDifference, ForwardDifference, StepSize};
pub use crate::step::{gauss_newton, gradient_descent, newton_raphson};

/// Errors reported when a step cannot be taken.
mod error;
/// Derivative approximation by sampling at perturbed inputs.
mod finite_difference;
/// One step each of Newton-Raphson, Gauss-Newton, and gradient descent.
mod step;

use faer::Mat;

/// The uniform contract every callable in this crate follows: an N×1
/// column of parameters in, a matrix out.
///
/// What the output means depends on the role the callable plays. Objective
/// and residual functions return M×1 values, derivative functions return
/// M×N Jacobians (or N×1 gradients), and the step functions treat them all
/// through this one trait. The callable itself carries no shape metadata;
/// the step functions validate shapes at the boundary and report
/// [`StepError::ShapeMismatch`] instead of panicking.
///
/// Any `Fn(&Mat<T>) -> Mat<T>` closure satisfies the contract for free.
pub trait VectorFunction<T> {
    /// Evaluates the function at `x`.
    fn eval(&self, x: &Mat<T>) -> Mat<T>;
}

impl<T, F> VectorFunction<T> for F
where
    F: Fn(&Mat<T>) -> Mat<T>,
{
    fn eval(&self, x: &Mat<T>) -> Mat<T> {
        self(x)
    }
}

/// Dimensions of a function's inputs and outputs.
///
/// Only the finite-difference approximators need this: they must size the
/// derivative matrix before the first perturbed evaluation. The analytic
/// step functions read shapes off the matrices the callables return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dims {
    /// Rows of the input vector: the number of parameters, N.
    pub x_rows: usize,
    /// Columns of the input; parameter vectors are columns, so this is 1.
    pub x_cols: usize,
    /// Rows of the output vector: the number of outputs, M.
    pub y_rows: usize,
    /// Columns of the output; values and residuals are columns, so this is 1.
    pub y_cols: usize,
}

impl Dims {
    /// Describes a function of an `x_rows`×`x_cols` input producing a
    /// `y_rows`×`y_cols` output.
    pub fn new(x_rows: usize, x_cols: usize, y_rows: usize, y_cols: usize) -> Self {
        Self {
            x_rows,
            x_cols,
            y_rows,
            y_cols,
        }
    }

    /// Shorthand for the usual case: an N-vector in, an M-vector out.
    pub fn vectors(n: usize, m: usize) -> Self {
        Self::new(n, 1, m, 1)
    }
}
