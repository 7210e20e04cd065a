//! fishgrowth: fish growth curves fitted by maximum likelihood to otolith
//! and tag-recapture data.
//!
//! Purpose
//! -------
//! Serve as the crate root. The growth-model layer describes what is fitted;
//! the optimization and inference layers supply the generic machinery that
//! fits it and quantifies its uncertainty.
//!
//! Key behaviors
//! -------------
//! - [`growth`]: von Bertalanffy, Gompertz and Richards curves, the
//!   length-varying noise model, the likelihood over otolith and tag
//!   subsets, the bound `GrowthModel` and its reporting contract.
//! - [`optimization`]: argmin L-BFGS minimization of any
//!   `NegLogLikelihood`, finite-difference helpers and log-space transforms.
//! - [`inference`]: observed-information covariance and delta-method
//!   standard errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - The numerical core performs no I/O. Optimizer progress can be logged
//!   with the `obs_slog` feature and `MLEOptions::verbose`.
//! - Invalid input surfaces as typed errors (`GrowthError`, `OptError`,
//!   `InferenceError`), never as panics.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use fishgrowth::growth::prelude::*;
//! use ndarray::array;
//!
//! let params = GrowthParams::new(
//!     CurveParams::von_bertalanffy(20.0, 70.0, 0.5)?,
//!     NoiseParams::constant(2.0)?,
//! );
//! let data = GrowthData::new()
//!     .with_otoliths(array![1.0, 2.0, 3.0, 5.0], array![38.0, 50.0, 60.0, 71.0])
//!     .with_reference_ages(0.0, 4.0);
//! let model =
//!     GrowthModel::build(&params, data, ModelOptions::for_family(CurveFamily::VonBertalanffy))?;
//! let fit = model.fit()?;
//! let sd = model.sdreport(&fit.theta_hat)?;
//! println!("L1 = {:?}", sd.derived("L1"));
//! # Ok::<(), GrowthError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests sit in `#[cfg(test)]` modules next to the code; end-to-end
//!   fits live in `tests/integration_growth_pipeline.rs`.

pub mod growth;
pub mod inference;
pub mod optimization;
