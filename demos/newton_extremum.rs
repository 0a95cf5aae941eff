//! Finds a local extremum of a third-order univariate polynomial with
//! Newton-Raphson.
//!
//! The function to optimize is
//!
//! ```text
//! f(x) = 3x^3 - 10x^2 - 56x + 5
//! ```
//!
//! Newton-Raphson finds roots, and a stationary point of `f` is a root of
//! `f'`, so we hand it the first and second derivatives:
//!
//! ```text
//! f'(x)  = 9x^2 - 20x - 56
//! f''(x) = 18x - 20
//! ```
//!
//! Depending on the start value this converges to a minimum, maximum, or
//! saddle point; only the final curvature check tells us which one we got.
//! Try starting at zero instead and the iteration lands on the maximum.

use faer::Mat;
use stepopt::newton_raphson;

fn main() {
    let df = |x: &Mat<f64>| {
        Mat::from_fn(1, 1, |_, _| {
            9.0 * x[(0, 0)].powi(2) - 20.0 * x[(0, 0)] - 56.0
        })
    };
    let ddf = |x: &Mat<f64>| Mat::from_fn(1, 1, |_, _| 18.0 * x[(0, 0)] - 20.0);

    let mut x = Mat::from_fn(1, 1, |_, _| 2.0_f64);

    // Iterate while the norm of the first derivative is above threshold.
    let mut iterations = 0;
    while df(&x).norm_l2() > 0.001 {
        x = newton_raphson(&df, &ddf, &x).expect("second derivative is regular along this path");
        iterations += 1;
        println!(
            "Parameters: {:>10.6} Error: {:.6}",
            x[(0, 0)],
            df(&x).norm_l2()
        );
    }

    let kind = if ddf(&x)[(0, 0)] < 0.0 {
        "maximum"
    } else {
        "minimum"
    };
    println!("Found a {kind} in {iterations} iterations");

    assert!(libm::fabs(x[(0, 0)] - 3.841) < 0.001);
}
