//! Likelihood aggregator: Gaussian negative log-likelihood over whichever
//! data subsets a model carries.
//!
//! Purpose
//! -------
//! Evaluate `nll(θ)` for a validated configuration, generically over the
//! scalar type so the same code yields values (`f64`), exact gradients and
//! Jacobians (`Dual64`), and the per-observation terms for reports.
//!
//! Key behaviors
//! -------------
//! - θ → natural space: log-scaled curve entries, `σ1`, `σ2` and latent ages
//!   are exponentiated; `tau` and `b` are used as-is.
//! - Otolith subset: `L̂ = curve(age)`, `σ = noise(L̂)`, term
//!   `−log 𝒩(len; L̂, σ)` per fish.
//! - Tag subset: `a = exp(log_age)`, release `L̂ = curve(a)`, recapture
//!   `L̂ = curve(a + liberty)`, one term per length.
//! - Total = otolith terms + release terms + recapture terms; an absent
//!   subset contributes nothing.
//!
//! Invariants & assumptions
//! ------------------------
//! - Built from [`ValidatedInputs`], so subsets are complete and finite,
//!   Schnute families have reference ages, and θ length matches the layout.
//!   Callers check θ length before evaluating.
//! - No state is kept between evaluations.
use crate::growth::core::{
    curves::Curve,
    data::{OtolithData, TagData},
    noise::NoiseModel,
    params::ParamLayout,
    profile::{CurveFamily, NoiseProfile},
    validation::ValidatedInputs,
};
use ndarray::Array1;
use num_dual::DualNum;
use statrs::consts::LN_SQRT_2PI;

/// `−log 𝒩(x; mean, sd) = ln sd + ln √(2π) + ½((x − mean)/sd)²`.
pub fn gaussian_nll<T: DualNum<f64>>(x: f64, mean: &T, sd: &T) -> T {
    let z = (mean.clone() - x) / sd;
    sd.ln() + LN_SQRT_2PI + z.powi(2) * 0.5
}

/// Predictions, σ and nll terms for one set of observed lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTerms<T> {
    pub predicted: Vec<T>,
    pub sigma: Vec<T>,
    pub nll: Vec<T>,
}

impl<T: DualNum<f64>> ObservationTerms<T> {
    fn evaluate(
        curve: &Curve<T>, noise: &NoiseModel<T>, ages: impl Iterator<Item = T>,
        observed: &Array1<f64>,
    ) -> Self {
        let predicted: Vec<T> = ages.map(|age| curve.length_at(age)).collect();
        let sigma: Vec<T> = predicted.iter().map(|len| noise.sigma_at(len)).collect();
        let nll = observed
            .iter()
            .zip(predicted.iter().zip(sigma.iter()))
            .map(|(&x, (mean, sd))| gaussian_nll(x, mean, sd))
            .collect();
        Self { predicted, sigma, nll }
    }

    pub fn total(&self) -> T {
        self.nll.iter().fold(T::from(0.0_f64), |acc, term| acc + term)
    }
}

/// Per-subset terms at one θ.
#[derive(Debug, Clone, PartialEq)]
pub struct Contributions<T> {
    pub otolith: Option<ObservationTerms<T>>,
    /// Latent ages at release (natural scale); empty without tags.
    pub age_release: Vec<T>,
    pub release: Option<ObservationTerms<T>>,
    pub recapture: Option<ObservationTerms<T>>,
}

impl<T: DualNum<f64>> Contributions<T> {
    pub fn otolith_total(&self) -> T {
        subset_total(&self.otolith)
    }

    /// Release plus recapture terms.
    pub fn tag_total(&self) -> T {
        subset_total(&self.release) + subset_total(&self.recapture)
    }

    pub fn total(&self) -> T {
        self.otolith_total() + self.tag_total()
    }
}

/// Immutable, validated likelihood for one model configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthLikelihood {
    layout: ParamLayout,
    noise_profile: NoiseProfile,
    reference_ages: Option<(f64, f64)>,
    otoliths: Option<OtolithData>,
    tags: Option<TagData>,
}

impl GrowthLikelihood {
    pub fn new(inputs: ValidatedInputs) -> Self {
        Self {
            layout: inputs.layout,
            noise_profile: inputs.noise_profile,
            reference_ages: inputs.reference_ages,
            otoliths: inputs.otoliths,
            tags: inputs.tags,
        }
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn noise_profile(&self) -> NoiseProfile {
        self.noise_profile
    }

    pub fn reference_ages(&self) -> Option<(f64, f64)> {
        self.reference_ages
    }

    pub fn otoliths(&self) -> Option<&OtolithData> {
        self.otoliths.as_ref()
    }

    pub fn tags(&self) -> Option<&TagData> {
        self.tags.as_ref()
    }

    /// Natural-space curve encoded in `theta`.
    pub fn curve_from<T: DualNum<f64>>(&self, theta: &[T]) -> Curve<T> {
        let c = &theta[self.layout.curve_range()];
        // Present for every Schnute family after validation.
        let (t1, t2) = self.reference_ages.unwrap_or((f64::NAN, f64::NAN));
        match self.layout.family() {
            CurveFamily::VonBertalanffy => {
                Curve::VonBertalanffy { l1: c[0].exp(), l2: c[1].exp(), k: c[2].exp(), t1, t2 }
            }
            CurveFamily::Gompertz => {
                Curve::Gompertz { linf: c[0].exp(), k: c[1].exp(), tau: c[2].clone() }
            }
            CurveFamily::Richards => Curve::Richards {
                l1: c[0].exp(),
                l2: c[1].exp(),
                k: c[2].exp(),
                b: c[3].clone(),
                t1,
                t2,
            },
        }
    }

    /// Noise model encoded in `theta`.
    pub fn noise_from<T: DualNum<f64>>(&self, theta: &[T]) -> NoiseModel<T> {
        let sigma_1 = theta[self.layout.sigma_1_index()].exp();
        match (self.noise_profile, self.layout.sigma_2_index()) {
            (NoiseProfile::LengthVarying { l_short, l_long }, Some(i)) => {
                NoiseModel::LengthVarying { sigma_1, sigma_2: theta[i].exp(), l_short, l_long }
            }
            _ => NoiseModel::Constant { sigma_1 },
        }
    }

    /// Every subset's terms at `theta`.
    pub fn contributions<T: DualNum<f64>>(&self, theta: &[T]) -> Contributions<T> {
        let curve = self.curve_from(theta);
        let noise = self.noise_from(theta);

        let otolith = self.otoliths.as_ref().map(|oto| {
            ObservationTerms::evaluate(&curve, &noise, oto.age.iter().map(|&a| T::from(a)), &oto.len)
        });

        let age_release: Vec<T> =
            theta[self.layout.age_range()].iter().map(|log_age| log_age.exp()).collect();
        let (release, recapture) = match &self.tags {
            Some(tags) => {
                let release = ObservationTerms::evaluate(
                    &curve,
                    &noise,
                    age_release.iter().cloned(),
                    &tags.len_release,
                );
                let recapture = ObservationTerms::evaluate(
                    &curve,
                    &noise,
                    age_release.iter().zip(tags.liberty.iter()).map(|(a, &dt)| a.clone() + dt),
                    &tags.len_recapture,
                );
                (Some(release), Some(recapture))
            }
            None => (None, None),
        };

        Contributions { otolith, age_release, release, recapture }
    }

    /// Total negative log-likelihood at `theta`.
    pub fn nll<T: DualNum<f64>>(&self, theta: &[T]) -> T {
        self.contributions(theta).total()
    }
}

// ---- Helper methods ----

fn subset_total<T: DualNum<f64>>(terms: &Option<ObservationTerms<T>>) -> T {
    terms.as_ref().map_or_else(|| T::from(0.0_f64), ObservationTerms::total)
}
