//! inference: uncertainty quantification for fitted growth models.
//!
//! Purpose
//! -------
//! Provide the post-fit linear algebra behind `GrowthModel::sdreport`:
//! covariance of `θ̂` from the observed information and delta-method
//! propagation to derived quantities such as natural-space parameters and
//! the predicted growth curve.
//!
//! Key behaviors
//! -------------
//! - [`calc_covariance`]: finite-difference Hessian of an exact gradient,
//!   inverted through a truncated symmetric eigendecomposition.
//! - [`standard_errors`]: square roots of a covariance diagonal.
//! - [`delta_method`] / [`delta_method_se`]: `G Σ Gᵀ` and its diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - Covariances are `n×n` in the model's `θ` ordering.
//! - Failures are [`InferenceError`]s; nothing here panics on bad input.
//!
//! Testing notes
//! -------------
//! - Unit tests use quadratics with closed-form information matrices;
//!   growth-model standard errors are checked in the model and integration
//!   tests.

pub mod delta;
pub mod errors;
pub mod hessian;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::delta::{delta_method, delta_method_se};
pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{calc_covariance, standard_errors};

pub mod prelude {
    pub use super::delta::{delta_method, delta_method_se};
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::{calc_covariance, standard_errors};
}
