//! Parameter set and θ layout for growth models.
//!
//! Purpose
//! -------
//! Describe the estimable quantities of a growth model in the scale the
//! optimizer sees, and fix how they are packed into `θ`.
//!
//! Key behaviors
//! -------------
//! - [`CurveParams`]: one variant per family. Strictly positive quantities
//!   are stored as logs; `tau` (Gompertz) and `b` (Richards) are raw reals.
//!   Natural-space constructors take the logs and reject values without one.
//! - [`NoiseParams`]: `log_sigma_1` (required by the model builder, optional
//!   here so its absence can be reported) and optional `log_sigma_2`.
//! - [`GrowthParams`]: curve + noise + optional latent log-ages at release.
//! - [`ParamLayout`]: θ = curve block, `log_sigma_1`, [`log_sigma_2`],
//!   [`log_age[0..n)`], with a name for every entry.
//!
//! Invariants & assumptions
//! ------------------------
//! - Natural-space values recovered with `exp` are strictly positive for
//!   any finite θ.
//! - The layout is derived from the validated parameters, so
//!   `GrowthParams::to_theta().len() == ParamLayout::len()` for a built model.
use crate::{
    growth::{
        core::profile::CurveFamily,
        errors::{GrowthError, GrowthResult},
    },
    optimization::numerical_stability::{checked_log, checked_log_all},
};
use ndarray::Array1;
use std::ops::Range;

/// Curve parameters in θ scale.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveParams {
    VonBertalanffy { log_l1: f64, log_l2: f64, log_k: f64 },
    Gompertz { log_linf: f64, log_k: f64, tau: f64 },
    Richards { log_l1: f64, log_l2: f64, log_k: f64, b: f64 },
}

impl CurveParams {
    /// von Bertalanffy from natural `L1`, `L2`, `k` (all > 0).
    pub fn von_bertalanffy(l1: f64, l2: f64, k: f64) -> GrowthResult<Self> {
        Ok(CurveParams::VonBertalanffy {
            log_l1: positive_log("L1", l1)?,
            log_l2: positive_log("L2", l2)?,
            log_k: positive_log("k", k)?,
        })
    }

    /// Gompertz from natural `Linf`, `k` (> 0) and location `tau`.
    pub fn gompertz(linf: f64, k: f64, tau: f64) -> GrowthResult<Self> {
        Ok(CurveParams::Gompertz {
            log_linf: positive_log("Linf", linf)?,
            log_k: positive_log("k", k)?,
            tau,
        })
    }

    /// Richards from natural `L1`, `L2`, `k` (> 0) and shape `b`.
    pub fn richards(l1: f64, l2: f64, k: f64, b: f64) -> GrowthResult<Self> {
        Ok(CurveParams::Richards {
            log_l1: positive_log("L1", l1)?,
            log_l2: positive_log("L2", l2)?,
            log_k: positive_log("k", k)?,
            b,
        })
    }

    pub fn family(&self) -> CurveFamily {
        match self {
            CurveParams::VonBertalanffy { .. } => CurveFamily::VonBertalanffy,
            CurveParams::Gompertz { .. } => CurveFamily::Gompertz,
            CurveParams::Richards { .. } => CurveFamily::Richards,
        }
    }

    /// θ-scale values in [`CurveFamily::theta_names`] order.
    pub fn to_vec(&self) -> Vec<f64> {
        match *self {
            CurveParams::VonBertalanffy { log_l1, log_l2, log_k } => vec![log_l1, log_l2, log_k],
            CurveParams::Gompertz { log_linf, log_k, tau } => vec![log_linf, log_k, tau],
            CurveParams::Richards { log_l1, log_l2, log_k, b } => vec![log_l1, log_l2, log_k, b],
        }
    }
}

/// Noise parameters in θ scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoiseParams {
    pub log_sigma_1: Option<f64>,
    pub log_sigma_2: Option<f64>,
}

impl NoiseParams {
    /// Constant noise `σ1`.
    pub fn constant(sigma_1: f64) -> GrowthResult<Self> {
        Ok(Self { log_sigma_1: Some(positive_log("sigma_1", sigma_1)?), log_sigma_2: None })
    }

    /// Length-varying noise anchored at `σ1` (short) and `σ2` (long).
    pub fn length_varying(sigma_1: f64, sigma_2: f64) -> GrowthResult<Self> {
        Ok(Self {
            log_sigma_1: Some(positive_log("sigma_1", sigma_1)?),
            log_sigma_2: Some(positive_log("sigma_2", sigma_2)?),
        })
    }
}

/// Full parameter set: curve, noise and optional latent log-ages.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthParams {
    pub curve: CurveParams,
    pub noise: NoiseParams,
    pub log_age: Option<Array1<f64>>,
}

impl GrowthParams {
    pub fn new(curve: CurveParams, noise: NoiseParams) -> Self {
        Self { curve, noise, log_age: None }
    }

    /// Latent ages at release given on the log scale.
    pub fn with_log_ages(mut self, log_age: Array1<f64>) -> Self {
        self.log_age = Some(log_age);
        self
    }

    /// Latent ages at release given in years (all > 0).
    pub fn with_release_ages(self, ages: &Array1<f64>) -> GrowthResult<Self> {
        let logs = checked_log_all(ages.iter()).map_err(|i| GrowthError::NonPositiveParameter {
            name: "age_release",
            index: Some(i),
            value: ages[i],
        })?;
        Ok(self.with_log_ages(Array1::from(logs)))
    }

    pub fn family(&self) -> CurveFamily {
        self.curve.family()
    }

    /// Pack the supplied entries in [`ParamLayout`] order.
    pub fn to_theta(&self) -> Array1<f64> {
        let mut theta = self.curve.to_vec();
        theta.extend(self.noise.log_sigma_1);
        theta.extend(self.noise.log_sigma_2);
        if let Some(log_age) = &self.log_age {
            theta.extend(log_age.iter().copied());
        }
        Array1::from(theta)
    }
}

/// Position and name of every θ entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLayout {
    family: CurveFamily,
    has_sigma_2: bool,
    n_age: usize,
}

impl ParamLayout {
    pub fn new(family: CurveFamily, has_sigma_2: bool, n_age: usize) -> Self {
        Self { family, has_sigma_2, n_age }
    }

    pub fn family(&self) -> CurveFamily {
        self.family
    }

    pub fn len(&self) -> usize {
        self.family.n_curve_params() + 1 + usize::from(self.has_sigma_2) + self.n_age
    }

    /// Never true: the curve block and `log_sigma_1` are always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn curve_range(&self) -> Range<usize> {
        0..self.family.n_curve_params()
    }

    pub fn sigma_1_index(&self) -> usize {
        self.family.n_curve_params()
    }

    pub fn sigma_2_index(&self) -> Option<usize> {
        self.has_sigma_2.then(|| self.sigma_1_index() + 1)
    }

    pub fn n_age(&self) -> usize {
        self.n_age
    }

    pub fn age_range(&self) -> Range<usize> {
        let start = self.sigma_1_index() + 1 + usize::from(self.has_sigma_2);
        start..start + self.n_age
    }

    /// `"log_L1"`, …, `"log_sigma_1"`, [`"log_sigma_2"`], `"log_age[i]"`.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.family.theta_names().iter().map(|s| s.to_string()).collect();
        names.push("log_sigma_1".to_string());
        if self.has_sigma_2 {
            names.push("log_sigma_2".to_string());
        }
        names.extend((0..self.n_age).map(|i| format!("log_age[{i}]")));
        names
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names().iter().position(|n| n == name)
    }
}

// ---- Helper methods ----

fn positive_log(name: &'static str, value: f64) -> GrowthResult<f64> {
    checked_log(value).ok_or(GrowthError::NonPositiveParameter { name, index: None, value })
}
