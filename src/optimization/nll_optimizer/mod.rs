//! nll_optimizer: argmin-backed minimizer for negative log-likelihoods.
//!
//! Purpose
//! -------
//! Fit models by minimizing `nll(θ)` with L-BFGS. A model binds its data,
//! implements [`NegLogLikelihood`], and calls [`minimize`] with a starting
//! vector and [`MLEOptions`].
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] exposes the objective to argmin without any
//!   sign change. Non-finite trial points inside a run cost a finite
//!   penalty derived from `nll(θ₀)`.
//! - [`builders`] construct L-BFGS with a More–Thuente or Hager–Zhang line
//!   search; [`run::run_lbfgs`] executes it and builds an [`OptimOutcome`].
//! - [`finite_diff::compute_hessian`] differentiates a gradient map; the
//!   inference layer uses it on exact model gradients.
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ` is unconstrained. Positivity of growth parameters is obtained by
//!   the model through log-scale parameters, never by the optimizer.
//! - Configuration types validate on construction, so the solver layer
//!   treats them as consistent.
//! - Nothing here panics on bad input; all failures are [`OptError`]s. A
//!   solver that stops on an internal failure is an error
//!   (`OptError::SolverExit`), never a silent return of `θ₀`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; the integration tests fit
//!   growth models end to end through [`minimize`].
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{LineSearcher, MLEOptions, NegLogLikelihood, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{LineSearcher, MLEOptions, NegLogLikelihood, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
