//! Observation containers for growth models.
//!
//! Purpose
//! -------
//! Hold the raw inputs a caller assembles ([`GrowthData`]) and the validated
//! subsets a model binds ([`OtolithData`], [`TagData`]).
//!
//! Key behaviors
//! -------------
//! - [`GrowthData`] keeps every field optional so that presence decides
//!   which subsets and features a model uses. Builder helpers fill complete
//!   subsets in one call; the public fields allow partial input, and a
//!   subset missing any field is left out of the model.
//! - [`OtolithData`] / [`TagData`] exist only after validation and
//!   guarantee equal-length, finite, non-empty fields.
//!
//! Invariants & assumptions
//! ------------------------
//! - Otolith subset: `age_oto`, `len_oto` (one entry per fish).
//! - Tag subset: `len_release`, `len_recapture`, `liberty` (one entry per
//!   tagged fish, in the same order as the latent log-ages).
//! - Reference ages `t1`, `t2` and reference lengths `l_short`, `l_long` are
//!   scalars required only by the features that use them.
//!
//! Downstream usage
//! ----------------
//! - `GrowthModel::build` consumes a [`GrowthData`] and keeps the validated
//!   subsets for the lifetime of the model; nothing mutates them afterwards.
use ndarray::Array1;

/// Caller-assembled growth data; every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthData {
    pub age_oto: Option<Array1<f64>>,
    pub len_oto: Option<Array1<f64>>,
    pub len_release: Option<Array1<f64>>,
    pub len_recapture: Option<Array1<f64>>,
    pub liberty: Option<Array1<f64>>,
    pub t1: Option<f64>,
    pub t2: Option<f64>,
    pub l_short: Option<f64>,
    pub l_long: Option<f64>,
}

impl GrowthData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Otolith ages and lengths.
    pub fn with_otoliths(mut self, age: Array1<f64>, len: Array1<f64>) -> Self {
        self.age_oto = Some(age);
        self.len_oto = Some(len);
        self
    }

    /// Tag release lengths, recapture lengths and times at liberty.
    pub fn with_tags(
        mut self, len_release: Array1<f64>, len_recapture: Array1<f64>, liberty: Array1<f64>,
    ) -> Self {
        self.len_release = Some(len_release);
        self.len_recapture = Some(len_recapture);
        self.liberty = Some(liberty);
        self
    }

    /// Reference ages `t1`, `t2` for the Schnute parametrizations.
    pub fn with_reference_ages(mut self, t1: f64, t2: f64) -> Self {
        self.t1 = Some(t1);
        self.t2 = Some(t2);
        self
    }

    /// Reference lengths anchoring length-varying noise.
    pub fn with_reference_lengths(mut self, l_short: f64, l_long: f64) -> Self {
        self.l_short = Some(l_short);
        self.l_long = Some(l_long);
        self
    }
}

/// Validated otolith subset: paired `(age, length)` readings.
#[derive(Debug, Clone, PartialEq)]
pub struct OtolithData {
    pub age: Array1<f64>,
    pub len: Array1<f64>,
}

impl OtolithData {
    pub fn len(&self) -> usize {
        self.age.len()
    }

    pub fn is_empty(&self) -> bool {
        self.age.is_empty()
    }
}

/// Validated tag subset: release length, recapture length, time at liberty.
#[derive(Debug, Clone, PartialEq)]
pub struct TagData {
    pub len_release: Array1<f64>,
    pub len_recapture: Array1<f64>,
    pub liberty: Array1<f64>,
}

impl TagData {
    pub fn len(&self) -> usize {
        self.liberty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liberty.is_empty()
    }
}
