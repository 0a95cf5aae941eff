//! Minimizes a second-order multivariate polynomial by steepest descent.
//!
//! The function is
//!
//! ```text
//! f(x, y) = x^2 + y^2 + 2x + 8y
//! ```
//!
//! with its global minimum at (-1, -4) and gradient (2x + 2, 2y + 8).
//! The step length is a constant for every iteration; no line search.
//! Compare with Newton-Raphson on the same function, which jumps to the
//! minimum in a single step because the Hessian is constant; steepest
//! descent instead creeps there over a few hundred cheap iterations.

use faer::Mat;
use stepopt::gradient_descent;

/// Largest absolute entry of a column vector.
fn inf_norm(m: &Mat<f64>) -> f64 {
    (0..m.nrows()).map(|i| libm::fabs(m[(i, 0)])).fold(0.0, libm::fmax)
}

fn main() {
    let df = |x: &Mat<f64>| {
        Mat::from_fn(2, 1, |i, _| {
            if i == 0 {
                2.0 * x[(0, 0)] + 2.0
            } else {
                2.0 * x[(1, 0)] + 8.0
            }
        })
    };

    let mut x = Mat::from_fn(2, 1, |i, _| if i == 0 { -3.0_f64 } else { -2.0 });

    let mut iterations = 0;
    while inf_norm(&df(&x)) > 0.001 {
        x = gradient_descent(&df, &x, 0.01).expect("gradient shape is fixed here");
        iterations += 1;
    }

    println!(
        "Minimum near ({:.4}, {:.4}) after {iterations} iterations",
        x[(0, 0)],
        x[(1, 0)]
    );

    assert!(libm::fabs(x[(0, 0)] - -1.0) < 0.001);
    assert!(libm::fabs(x[(1, 0)] - -4.0) < 0.001);
}
