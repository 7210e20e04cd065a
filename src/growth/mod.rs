//! growth: fish growth curves fitted to otolith and tag-recapture data.
//!
//! Purpose
//! -------
//! Fit von Bertalanffy, Gompertz or Richards growth curves by maximum
//! likelihood to direct age–length pairs, to release/recapture length pairs
//! with latent ages at release, or to both at once.
//!
//! Key behaviors
//! -------------
//! - [`core`]: curves, noise, data containers, θ layout, options and the
//!   ordered build validation.
//! - [`models`]: likelihood aggregator, [`GrowthModel`], [`Report`] and
//!   [`SdReport`].
//! - [`errors`]: [`GrowthError`] / [`GrowthResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration problems are reported once, at build time, in a fixed
//!   order. A built model never fails on evaluation except for a wrong
//!   θ length.
//! - Singular points (`k = 0`, `b = 0`, `t1 = t2`, `L_long = L_short`) are
//!   not guarded and evaluate to non-finite values.
//!
//! Conventions
//! -----------
//! - θ holds logs of every strictly positive quantity; reports and derived
//!   estimates are on the natural scale.
//! - The nll is minimized as-is, never sign-flipped.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; `tests/integration_growth_pipeline.rs`
//!   fits synthetic data end to end.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    AgeGrid, CurveFamily, CurveGrid, CurveParams, DataProfile, GrowthData, GrowthParams,
    ModelOptions, NoiseParams, NoiseProfile, ParamLayout,
};
pub use self::errors::{GrowthError, GrowthResult};
pub use self::models::{GrowthFit, GrowthModel, Report, ReportValue, SdReport};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use fishgrowth::growth::prelude::*;
//
// to import the main growth surface in a single line.

pub mod prelude {
    pub use super::{
        AgeGrid, CurveFamily, CurveGrid, CurveParams, DataProfile, GrowthData, GrowthError,
        GrowthFit, GrowthModel, GrowthParams, GrowthResult, ModelOptions, NoiseParams,
        NoiseProfile, Report, ReportValue, SdReport,
    };
}
