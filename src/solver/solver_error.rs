/// Solver errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverError
{
    /// Invalid [`crate::solver::SolverParam`] or regularization weight.
    InvalidParam,
    /// Invalid [`crate::solver::Operator`]: size mismatch or bad norm estimate.
    InvalidOp,
    /// Iterates became non-finite.
    Divergence,
}

impl core::fmt::Display for SolverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", match &self {
            SolverError::InvalidParam => "InvalidParam: invalid solver parameter",
            SolverError::InvalidOp    => "InvalidOp: invalid Operator",
            SolverError::Divergence   => "Divergence: iterates became non-finite",
        })
    }
}

//

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for SolverError {}
