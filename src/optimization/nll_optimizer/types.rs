//! nll_optimizer::types: numeric aliases and L-BFGS wiring.
//!
//! Purpose
//! -------
//! Keep the optimizer's numeric shapes in one place so the growth models,
//! the argmin adapter and the inference layer agree on what a parameter
//! vector, gradient and Hessian look like.
//!
//! Conventions
//! -----------
//! - `Theta` is the unconstrained parameter vector handed to the optimizer.
//!   For growth models it holds log-scale parameters, `tau`/`b` on their raw
//!   scale and any latent log-ages, in the order fixed by
//!   `growth::core::params::ParamLayout`.
//! - `Cost` is the negative log-likelihood; no sign flips happen anywhere in
//!   the optimizer.
//! - The line-search aliases use argmin's `(Param, Gradient, Float)` form.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient `∇nll(θ)`, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense `n × n` Hessian of the negative log-likelihood.
pub type Hessian = Array2<f64>;

/// Scalar objective value (negative log-likelihood).
pub type Cost = f64;

/// Function-evaluation counters as reported by argmin (e.g. `"cost_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
