//! growth::models: likelihood, bound model, reports and uncertainty.
//!
//! Purpose
//! -------
//! Turn validated growth-model inputs into the objects callers use: a
//! likelihood that evaluates on any scalar type, a bound [`GrowthModel`]
//! for evaluation and fitting, the named [`Report`], and the [`SdReport`]
//! uncertainty summary.
//!
//! Key behaviors
//! -------------
//! - [`likelihood`]: [`GrowthLikelihood`] sums Gaussian nll terms over the
//!   otolith and tag subsets present.
//! - [`growth_model`]: [`GrowthModel`] with `value`, `gradient`, `report`,
//!   `fit` and `sdreport`; implements `NegLogLikelihood` so it plugs into
//!   the optimizer directly.
//! - [`report`]: [`Report`] and [`build_report`].
//!
//! Downstream usage
//! ----------------
//! 1. Assemble [`GrowthParams`](crate::growth::core::GrowthParams) and
//!    [`GrowthData`](crate::growth::core::GrowthData).
//! 2. `GrowthModel::build(&params, data, ModelOptions::for_family(family))`.
//! 3. `model.fit()` for θ̂ and the report at θ̂.
//! 4. `model.sdreport(&fit.theta_hat)` for standard errors.
//!
//! Testing notes
//! -------------
//! - Unit tests cover subset additivity, gradients against central
//!   differences, report contents and fixed parameters; parameter recovery
//!   is tested end to end in the integration tests.

pub mod growth_model;
pub mod likelihood;
pub mod report;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::growth_model::{CurveEstimate, DerivedEstimate, GrowthFit, GrowthModel, SdReport};
pub use self::likelihood::{Contributions, GrowthLikelihood, ObservationTerms, gaussian_nll};
pub use self::report::{Report, ReportValue, build_report};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use fishgrowth::growth::models::prelude::*;
//
// to import the main model surface in a single line.

pub mod prelude {
    pub use super::growth_model::{GrowthFit, GrowthModel, SdReport};
    pub use super::report::{Report, ReportValue};
}
