//! optimization: negative log-likelihood minimizer, numerical helpers and
//! the optimizer error surface.
//!
//! Purpose
//! -------
//! Provide the fitting machinery behind `GrowthModel::fit`: an argmin-backed
//! L-BFGS minimizer for any bound objective, finite-difference derivative
//! helpers, and the tolerances/transforms shared with the inference layer.
//!
//! Key behaviors
//! -------------
//! - [`nll_optimizer`]: [`NegLogLikelihood`](nll_optimizer::NegLogLikelihood),
//!   [`minimize`](nll_optimizer::minimize), solver configuration and
//!   finite-difference Hessians.
//! - [`numerical_stability`]: log-space mapping for positive parameters and
//!   eigenvalue truncation threshold.
//! - [`errors`]: [`OptError`](errors::OptError) / `OptResult<T>`, with
//!   conversions from argmin errors and growth-model errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer works in unconstrained `θ`; positivity is the model's
//!   concern.
//! - Invalid states are reported as `OptError`, never as panics.
//!
//! Conventions
//! -----------
//! - The objective is minimized as-is; values and gradients are never
//!   sign-flipped.
//! - Progress output exists only behind the `obs_slog` feature and
//!   `MLEOptions::verbose`.
//!
//! Testing notes
//! -------------
//! - Submodule unit tests cover solver wiring, validation, finite
//!   differences and error conversions; the integration tests fit growth
//!   models end to end.

pub mod errors;
pub mod nll_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::nll_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
