//! Error surface for post-fit inference (covariance and delta method).

use crate::optimization::errors::OptError;

/// Unified error type for inference routines.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Observed information ----
    /// Building the Hessian at θ̂ failed inside the optimizer layer.
    Hessian {
        source: OptError,
    },

    // ---- Delta method ----
    /// Jacobian columns must match the covariance dimension.
    JacobianDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Jacobian entries must be finite.
    NonFiniteJacobian {
        row: usize,
        col: usize,
        value: f64,
    },

    /// Covariance must be square.
    CovarianceNotSquare {
        rows: usize,
        cols: usize,
    },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl From<OptError> for InferenceError {
    fn from(source: OptError) -> Self {
        InferenceError::Hessian { source }
    }
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::Hessian { source } => {
                write!(f, "Inference Error: observed information unavailable ({source})")
            }
            InferenceError::JacobianDimMismatch { expected, found } => write!(
                f,
                "Inference Error: Jacobian has {found} columns, covariance dimension is {expected}"
            ),
            InferenceError::NonFiniteJacobian { row, col, value } => {
                write!(f, "Inference Error: Jacobian entry ({row}, {col}) = {value} is not finite")
            }
            InferenceError::CovarianceNotSquare { rows, cols } => {
                write!(f, "Inference Error: covariance is {rows}x{cols}, expected square")
            }
        }
    }
}
