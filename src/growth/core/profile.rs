//! Discriminants fixed once at build time: which curve family, which data
//! subsets, and which noise structure a model uses.
//!
//! Evaluation branches only on these tags, never on parameter values, so
//! every path from θ to the nll stays differentiable.

/// Growth-curve parametrization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveFamily {
    /// von Bertalanffy in Schnute form: `L1`, `L2` at reference ages, `k`.
    VonBertalanffy,
    /// Traditional Gompertz: `Linf`, `k`, `tau`.
    Gompertz,
    /// Richards in Schnute form: `L1`, `L2`, `k`, shape `b`.
    Richards,
}

impl CurveFamily {
    /// Schnute forms need reference ages `t1`, `t2`.
    pub fn uses_reference_ages(self) -> bool {
        matches!(self, CurveFamily::VonBertalanffy | CurveFamily::Richards)
    }

    /// θ names of the curve block, in layout order.
    pub fn theta_names(self) -> &'static [&'static str] {
        match self {
            CurveFamily::VonBertalanffy => &["log_L1", "log_L2", "log_k"],
            CurveFamily::Gompertz => &["log_Linf", "log_k", "tau"],
            CurveFamily::Richards => &["log_L1", "log_L2", "log_k", "b"],
        }
    }

    /// Natural-space names of the curve block, in layout order.
    pub fn natural_names(self) -> &'static [&'static str] {
        match self {
            CurveFamily::VonBertalanffy => &["L1", "L2", "k"],
            CurveFamily::Gompertz => &["Linf", "k", "tau"],
            CurveFamily::Richards => &["L1", "L2", "k", "b"],
        }
    }

    /// Which curve-block entries are stored as logs (the rest are raw).
    pub fn log_scaled(self) -> &'static [bool] {
        match self {
            CurveFamily::VonBertalanffy => &[true, true, true],
            CurveFamily::Gompertz => &[true, true, false],
            CurveFamily::Richards => &[true, true, true, false],
        }
    }

    pub fn n_curve_params(self) -> usize {
        self.theta_names().len()
    }
}

/// Which data subsets contribute to the likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataProfile {
    OtolithOnly,
    TagOnly,
    Combined,
}

impl DataProfile {
    /// `None` when neither subset is present.
    pub fn from_presence(otoliths: bool, tags: bool) -> Option<Self> {
        match (otoliths, tags) {
            (true, true) => Some(DataProfile::Combined),
            (true, false) => Some(DataProfile::OtolithOnly),
            (false, true) => Some(DataProfile::TagOnly),
            (false, false) => None,
        }
    }

    pub fn has_otoliths(self) -> bool {
        !matches!(self, DataProfile::TagOnly)
    }

    pub fn has_tags(self) -> bool {
        !matches!(self, DataProfile::OtolithOnly)
    }
}

/// Observation-noise structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseProfile {
    /// `σ(L) = σ1`.
    Constant,
    /// `σ(L)` affine in `L`, equal to `σ1` at `l_short` and `σ2` at `l_long`.
    LengthVarying { l_short: f64, l_long: f64 },
}

impl NoiseProfile {
    pub fn is_length_varying(&self) -> bool {
        matches!(self, NoiseProfile::LengthVarying { .. })
    }
}
