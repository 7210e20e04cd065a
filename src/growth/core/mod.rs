//! growth::core: curves, noise, data, parameters and build validation.
//!
//! Purpose
//! -------
//! Hold the numerical and structural building blocks of a growth model:
//! what a curve predicts, how spread scales with predicted length, which
//! observations exist, how parameters are packed into θ, and whether a
//! parameter/data pair is a consistent model.
//!
//! Key behaviors
//! -------------
//! - [`curves`]: von Bertalanffy, Gompertz and Richards curves, generic
//!   over `DualNum<f64>`, plus vectorized `f64` helpers.
//! - [`noise`]: constant or length-varying observation σ.
//! - [`data`]: raw [`GrowthData`] and validated [`OtolithData`] /
//!   [`TagData`].
//! - [`params`]: [`GrowthParams`] in θ scale and the [`ParamLayout`].
//! - [`profile`]: build-time discriminants [`CurveFamily`],
//!   [`DataProfile`], [`NoiseProfile`].
//! - [`options`]: [`ModelOptions`], [`AgeGrid`], [`CurveGrid`].
//! - [`validation`]: ordered build checks producing [`ValidatedInputs`].
//! - [`autodiff`]: dual-number gradients and Jacobians.
//!
//! Invariants & assumptions
//! ------------------------
//! - Scale parameters live on the log scale in θ and are exponentiated
//!   before use, so any finite θ gives strictly positive lengths, rates,
//!   σ and ages.
//! - Nothing here branches on parameter values; only the profiles decided at
//!   build time select code paths.
//!
//! Conventions
//! -----------
//! - Ages are in years, lengths in the units of the data.
//! - Indexing is 0-based; θ order is fixed by [`ParamLayout`].
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its formulas and checks; the
//!   likelihood and model tests live in [`models`](super::models).

pub mod autodiff;
pub mod curves;
pub mod data;
pub mod noise;
pub mod options;
pub mod params;
pub mod profile;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::autodiff::{jacobian, value_and_gradient};
pub use self::curves::{Curve, gompertz_curve, richards_curve, vonbert_curve};
pub use self::data::{GrowthData, OtolithData, TagData};
pub use self::noise::NoiseModel;
pub use self::options::{AgeGrid, CurveGrid, DAYS_PER_YEAR, MAX_GRID_POINTS, ModelOptions};
pub use self::params::{CurveParams, GrowthParams, NoiseParams, ParamLayout};
pub use self::profile::{CurveFamily, DataProfile, NoiseProfile};
pub use self::validation::{ValidatedInputs, validate_inputs};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use fishgrowth::growth::core::prelude::*;
//
// to import the main growth core surface in a single line.

pub mod prelude {
    pub use super::curves::{Curve, gompertz_curve, richards_curve, vonbert_curve};
    pub use super::data::GrowthData;
    pub use super::options::{AgeGrid, CurveGrid, ModelOptions};
    pub use super::params::{CurveParams, GrowthParams, NoiseParams};
    pub use super::profile::{CurveFamily, DataProfile, NoiseProfile};
}
