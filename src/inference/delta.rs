//! inference::delta: delta-method propagation of `θ` covariance.
//!
//! For a derived quantity `g(θ)` with Jacobian `G = ∂g/∂θ` at `θ̂`, the
//! first-order covariance is `G Σ Gᵀ`. Growth models obtain `G` exactly from
//! dual numbers, so only the linear algebra lives here.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::{Array1, Array2, ArrayView1};

/// `G Σ Gᵀ` for a `m×n` Jacobian and an `n×n` covariance.
///
/// # Errors
/// - [`InferenceError::CovarianceNotSquare`] for a non-square `cov`.
/// - [`InferenceError::JacobianDimMismatch`] when `jac.ncols() != n`.
/// - [`InferenceError::NonFiniteJacobian`] for the first NaN/±∞ entry.
pub fn delta_method(cov: &Array2<f64>, jac: &Array2<f64>) -> InferenceResult<Array2<f64>> {
    check_shapes(cov, jac)?;
    Ok(jac.dot(cov).dot(&jac.t()))
}

/// Standard errors `sqrt(diag(G Σ Gᵀ))` without forming the full product.
pub fn delta_method_se(cov: &Array2<f64>, jac: &Array2<f64>) -> InferenceResult<Array1<f64>> {
    check_shapes(cov, jac)?;
    Ok(jac.rows().into_iter().map(|g| quad_form(cov, g).sqrt()).collect())
}

// ---- Helper methods ----

fn quad_form(cov: &Array2<f64>, g: ArrayView1<f64>) -> f64 {
    g.dot(&cov.dot(&g))
}

fn check_shapes(cov: &Array2<f64>, jac: &Array2<f64>) -> InferenceResult<()> {
    let (rows, cols) = cov.dim();
    if rows != cols {
        return Err(InferenceError::CovarianceNotSquare { rows, cols });
    }
    if jac.ncols() != rows {
        return Err(InferenceError::JacobianDimMismatch { expected: rows, found: jac.ncols() });
    }
    match jac.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(InferenceError::NonFiniteJacobian { row, col, value }),
        None => Ok(()),
    }
}
