use faer::linalg::svd::SvdError;

/// Errors that stop a step from being taken.
///
/// Every failure is detected before the updated parameter vector is built,
/// so the caller's current parameters stay valid and a retry with different
/// inputs (or a clean abort) is always possible.
#[derive(thiserror::Error, Debug)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum StepError {
    /// A caller-supplied function returned a matrix whose shape breaks the
    /// vector-function contract.
    #[error("{role} produced a {rows}x{cols} matrix, expected {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        /// Which callable (or declared dimension) broke the contract.
        role: &'static str,
        /// Rows actually produced.
        rows: usize,
        /// Columns actually produced.
        cols: usize,
        /// Rows the contract requires.
        expected_rows: usize,
        /// Columns the contract requires.
        expected_cols: usize,
    },
    /// Newton-Raphson needs exactly as many equations as unknowns.
    #[error(
        "Jacobian is {rows}x{cols}, but Newton-Raphson only supports the square case; for more equations than unknowns, use Gauss-Newton"
    )]
    JacobianNotSquare {
        /// Number of equations (Jacobian rows).
        rows: usize,
        /// Number of unknowns (Jacobian columns).
        cols: usize,
    },
    /// Gauss-Newton needs at least as many residuals as parameters.
    #[error(
        "least-squares system is underdetermined: {residuals} residuals for {parameters} parameters"
    )]
    TooFewResiduals {
        /// Number of residuals (Jacobian rows).
        residuals: usize,
        /// Number of parameters being fit.
        parameters: usize,
    },
    /// The Jacobian is singular at the current point, so the Newton linear
    /// system has no unique solution there.
    #[error("Jacobian is rank-deficient at the current point (rank {rank} of {size})")]
    SingularJacobian {
        /// Numerically revealed rank.
        rank: usize,
        /// Full rank the square system requires.
        size: usize,
    },
    /// The Gauss-Newton normal equations are not positive definite: the
    /// Jacobian's columns are linearly dependent at the current point.
    #[error("normal equations are ill-conditioned: Jacobian columns are linearly dependent")]
    NormalEquationsNotPositiveDefinite,
    /// You provided an empty parameter vector.
    #[error("cannot take a step on an empty parameter vector")]
    EmptySystem,
    /// Faer: could not decompose the Jacobian.
    #[error("something went wrong doing SVD in faer")]
    Svd(SvdError),
}
