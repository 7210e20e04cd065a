//! inference::hessian: covariance from the observed information.
//!
//! Purpose
//! -------
//! Turn an exact gradient map of the negative log-likelihood into the
//! asymptotic covariance of `θ̂`: the Hessian is obtained by finite
//! differences of the gradient, copied into `nalgebra`, and inverted with a
//! truncated symmetric eigendecomposition.
//!
//! Key behaviors
//! -------------
//! - [`calc_covariance`] returns the full `n×n` pseudoinverse `J⁺` of the
//!   observed information `J(θ̂) = ∇²nll(θ̂)`.
//! - [`standard_errors`] takes square roots of its diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - `compute_hessian` hands back a finite, symmetric `n×n` matrix.
//! - Eigenvalues `λ ≤ EIGEN_EPS` are dropped, so flat or concave directions
//!   contribute zero variance instead of dividing by ~0.
//!
//! Conventions
//! -----------
//! - The gradient is of the *summed* nll (not an average), so no rescaling
//!   by the number of observations happens here.
//! - No explicit inverse is ever formed.
//!
//! Testing notes
//! -------------
//! - Unit tests use quadratic objectives with known information matrices,
//!   including a rank-deficient one.
use crate::{
    inference::errors::InferenceResult,
    optimization::{
        nll_optimizer::{Hessian, Theta, finite_diff::compute_hessian},
        numerical_stability::EIGEN_EPS,
    },
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Covariance of `θ̂` from the gradient map `grad_fn` of the nll.
///
/// `Σ = J⁺` with `J = ∇²nll(θ̂)` and eigenvalues `≤ EIGEN_EPS` truncated.
///
/// # Errors
/// - [`InferenceError::Hessian`](crate::inference::errors::InferenceError::Hessian)
///   when the finite-difference Hessian fails validation.
///
/// # Examples
/// ```rust
/// # use ndarray::array;
/// # use fishgrowth::inference::hessian::{calc_covariance, standard_errors};
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let grad = |theta: &ndarray::Array1<f64>| a.dot(theta);
///
/// let cov = calc_covariance(&grad, &array![1.0, -1.0]).unwrap();
/// let se = standard_errors(&cov);
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// assert!((se[1] - 1.0).abs() < 1e-6);
/// ```
pub fn calc_covariance<F: Fn(&Theta) -> Array1<f64>>(
    grad_fn: &F, theta_hat: &Theta,
) -> InferenceResult<Array2<f64>> {
    let obs_info = compute_hessian(grad_fn, theta_hat)?;
    Ok(pseudo_inverse(fill_dmatrix(&obs_info)))
}

/// Square roots of the covariance diagonal.
///
/// Negative diagonal entries cannot come out of [`calc_covariance`]; if a
/// caller passes one, its standard error is NaN.
pub fn standard_errors(cov: &Array2<f64>) -> Array1<f64> {
    cov.diag().mapv(f64::sqrt)
}

// ---- Helper methods ----

/// Copy an `ndarray` matrix into a column-major `DMatrix`.
fn fill_dmatrix(obs_info: &Hessian) -> DMatrix<f64> {
    let (rows, cols) = obs_info.dim();
    DMatrix::from_fn(rows, cols, |i, j| obs_info[[i, j]])
}

/// `J⁺ = Σ_{k: λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k` for `J = Q Λ Qᵀ`.
fn pseudo_inverse(obs_info: DMatrix<f64>) -> Array2<f64> {
    let n = obs_info.nrows();
    let eigen = obs_info.symmetric_eigen();
    let q = eigen.eigenvectors;
    let mut cov = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda <= EIGEN_EPS {
            continue;
        }
        for i in 0..n {
            let qi = q[(i, k)] / lambda;
            for j in 0..n {
                cov[[i, j]] += qi * q[(j, k)];
            }
        }
    }
    cov
}
