//! nll_optimizer::finite_diff: finite-difference Hessian helper.
//!
//! Purpose
//! -------
//! Wrap the `finitediff` crate so the rest of the crate can ask for a
//! validated, symmetric Hessian without touching its API directly.
//!
//! Key behaviors
//! -------------
//! - [`compute_hessian`]: central-difference Jacobian of a gradient map,
//!   falling back to forward differences when the central result fails
//!   validation, then symmetrized. The inference layer feeds it the exact
//!   automatic-differentiation gradient of a growth model.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returned Hessians satisfy [`validate_hessian`] and are exactly
//!   symmetric.
//!
//! Testing notes
//! -------------
//! - Unit tests cover success and failure, including the central → forward
//!   fallback.
use crate::optimization::{
    errors::OptResult,
    nll_optimizer::{
        types::{Grad, Hessian, Theta},
        validation::validate_hessian,
    },
};
use finitediff::FiniteDiff;

/// Hessian of the objective whose gradient is `grad_fn`, evaluated at `theta`.
///
/// Central differences are tried first. If that matrix has the wrong shape
/// or a non-finite entry, forward differences are used and only their
/// validation error is surfaced.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`](crate::optimization::errors::OptError::HessianDimMismatch)
/// - [`OptError::InvalidHessian`](crate::optimization::errors::OptError::InvalidHessian)
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(grad_fn: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(grad_fn);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(grad_fn);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
