//! Fits the Michaelis-Menten rate law to measured enzyme kinetics with
//! Gauss-Newton.
//!
//! The model is
//!
//! ```text
//! rate = s1 * c / (s2 + c)
//! ```
//!
//! where `c` is the substrate concentration and (s1, s2) are the
//! parameters to fit. The residual for each data point is the measured
//! rate minus the model prediction, and Gauss-Newton drives the sum of
//! squared residuals down without ever forming a second derivative.
//!
//! The fit runs twice: once with the hand-derived Jacobian, once with a
//! forward-difference approximation of it, to show the approximator
//! dropping into the same slot.

use faer::Mat;
use stepopt::{Dims, ForwardDifference, StepError, VectorFunction, gauss_newton};

const SUBSTRATE: [f64; 7] = [0.038, 0.194, 0.425, 0.626, 1.253, 2.500, 3.740];
const RATE: [f64; 7] = [0.050, 0.127, 0.094, 0.2122, 0.2729, 0.2665, 0.3317];

fn residuals(x: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(SUBSTRATE.len(), 1, |i, _| {
        RATE[i] - (x[(0, 0)] * SUBSTRATE[i]) / (x[(1, 0)] + SUBSTRATE[i])
    })
}

fn jacobian(x: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(SUBSTRATE.len(), 2, |i, j| {
        let denom = x[(1, 0)] + SUBSTRATE[i];
        if j == 0 {
            -SUBSTRATE[i] / denom
        } else {
            (x[(0, 0)] * SUBSTRATE[i]) / (denom * denom)
        }
    })
}

fn sum_of_squares(x: &Mat<f64>) -> f64 {
    let r = residuals(x);
    (r.transpose() * r.as_ref())[(0, 0)]
}

fn fit(d: &impl VectorFunction<f64>) -> Result<Mat<f64>, StepError> {
    let mut x = Mat::from_fn(2, 1, |i, _| if i == 0 { 0.9_f64 } else { 0.2 });
    println!("  start: s1 = {:.4}, s2 = {:.4}, SSR = {:.5}", x[(0, 0)], x[(1, 0)], sum_of_squares(&x));
    for step in 1..=5 {
        x = gauss_newton(&residuals, d, &x)?;
        println!(
            "  step {step}: s1 = {:.4}, s2 = {:.4}, SSR = {:.5}",
            x[(0, 0)],
            x[(1, 0)],
            sum_of_squares(&x)
        );
    }
    Ok(x)
}

fn main() {
    println!("Analytic Jacobian:");
    let fitted = fit(&jacobian).expect("fit should stay well-conditioned");

    println!("Forward-difference Jacobian:");
    let fd = ForwardDifference::new(residuals, Dims::vectors(2, SUBSTRATE.len()))
        .expect("declared dims are valid");
    let fitted_fd = fit(&fd).expect("fit should stay well-conditioned");

    for x in [&fitted, &fitted_fd] {
        assert!(libm::fabs(x[(0, 0)] - 0.362) < 0.01);
        assert!(libm::fabs(x[(1, 0)] - 0.556) < 0.01);
    }
}
