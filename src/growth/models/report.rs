//! Reporting contract: named quantities retrievable at any θ.
//!
//! [`Report`] is an ordered name → value map. [`build_report`] fills it in
//! this order, skipping groups a model does not have:
//!
//! - natural curve parameters (`L1`,`L2`,`k` | `Linf`,`k`,`tau` |
//!   `L1`,`L2`,`k`,`b`), `sigma_1`, [`sigma_2`];
//! - reference constants: [`t1`,`t2`], [`L_short`,`L_long`,
//!   `sigma_intercept`,`sigma_slope`];
//! - otoliths: `age_oto`, `len_oto`, `len_oto_hat`, `sigma_oto`, `nll_oto`;
//! - tags: `age_release`, `liberty`, `len_release`, `len_release_hat`,
//!   `sigma_release`, `nll_release`, `len_recapture`, `len_recapture_hat`,
//!   `sigma_recapture`, `nll_recapture`;
//! - totals: `nll_oto_total`, `nll_tag_total`, `nll`;
//! - with an enabled curve grid: `age_grid`, `curve`.
//!
//! Absent subsets report a zero total.
use crate::growth::{
    core::{noise::NoiseModel, options::CurveGrid, profile::NoiseProfile},
    models::likelihood::{GrowthLikelihood, ObservationTerms},
};
use ndarray::Array1;

#[derive(Debug, Clone, PartialEq)]
pub enum ReportValue {
    Scalar(f64),
    Vector(Array1<f64>),
}

/// Ordered collection of named report values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<(String, ReportValue)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scalar(&mut self, name: &str, value: f64) {
        self.entries.push((name.to_string(), ReportValue::Scalar(value)));
    }

    pub fn push_vector(&mut self, name: &str, value: Array1<f64>) {
        self.entries.push((name.to_string(), ReportValue::Vector(value)));
    }

    pub fn get(&self, name: &str) -> Option<&ReportValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// `None` when absent or not a scalar.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            ReportValue::Scalar(v) => Some(*v),
            ReportValue::Vector(_) => None,
        }
    }

    /// `None` when absent or not a vector.
    pub fn vector(&self, name: &str) -> Option<&Array1<f64>> {
        match self.get(name)? {
            ReportValue::Vector(v) => Some(v),
            ReportValue::Scalar(_) => None,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Evaluate every reported quantity of `likelihood` at `theta`.
///
/// `theta` must match the likelihood's layout; the model checks this.
pub fn build_report(likelihood: &GrowthLikelihood, theta: &[f64], grid: &CurveGrid) -> Report {
    let mut report = Report::new();
    let curve = likelihood.curve_from(theta);
    let noise = likelihood.noise_from(theta);

    for (name, value) in curve.family().natural_names().iter().zip(curve.natural_params()) {
        report.push_scalar(name, value);
    }
    match &noise {
        NoiseModel::Constant { sigma_1 } => report.push_scalar("sigma_1", *sigma_1),
        NoiseModel::LengthVarying { sigma_1, sigma_2, .. } => {
            report.push_scalar("sigma_1", *sigma_1);
            report.push_scalar("sigma_2", *sigma_2);
        }
    }

    if let Some((t1, t2)) = likelihood.reference_ages() {
        report.push_scalar("t1", t1);
        report.push_scalar("t2", t2);
    }
    if let NoiseProfile::LengthVarying { l_short, l_long } = likelihood.noise_profile() {
        report.push_scalar("L_short", l_short);
        report.push_scalar("L_long", l_long);
        report.push_scalar("sigma_intercept", noise.intercept());
        report.push_scalar("sigma_slope", noise.slope());
    }

    let parts = likelihood.contributions(theta);
    if let (Some(oto), Some(terms)) = (likelihood.otoliths(), &parts.otolith) {
        report.push_vector("age_oto", oto.age.clone());
        report.push_vector("len_oto", oto.len.clone());
        push_terms(&mut report, "oto", terms);
    }
    if let (Some(tags), Some(release), Some(recapture)) =
        (likelihood.tags(), &parts.release, &parts.recapture)
    {
        report.push_vector("age_release", Array1::from(parts.age_release.clone()));
        report.push_vector("liberty", tags.liberty.clone());
        report.push_vector("len_release", tags.len_release.clone());
        push_terms(&mut report, "release", release);
        report.push_vector("len_recapture", tags.len_recapture.clone());
        push_terms(&mut report, "recapture", recapture);
    }

    report.push_scalar("nll_oto_total", parts.otolith_total());
    report.push_scalar("nll_tag_total", parts.tag_total());
    report.push_scalar("nll", parts.total());

    if let Some(grid) = grid.grid() {
        let ages = grid.ages();
        let lengths = ages.mapv(|age| curve.length_at(age));
        report.push_vector("age_grid", ages);
        report.push_vector("curve", lengths);
    }
    report
}

// ---- Helper methods ----

fn push_terms(report: &mut Report, suffix: &str, terms: &ObservationTerms<f64>) {
    report.push_vector(&format!("len_{suffix}_hat"), Array1::from(terms.predicted.clone()));
    report.push_vector(&format!("sigma_{suffix}"), Array1::from(terms.sigma.clone()));
    report.push_vector(&format!("nll_{suffix}"), Array1::from(terms.nll.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::core::{
        data::GrowthData,
        options::AgeGrid,
        params::{CurveParams, GrowthParams, NoiseParams},
        validation::validate_inputs,
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Entry names and order for otolith-only and combined models.
    // - Consistency of per-observation terms with the totals.
    // - The curve grid on and off.
    // -------------------------------------------------------------------------

    fn oto_likelihood(noise: NoiseParams) -> (GrowthLikelihood, Vec<f64>) {
        let params = GrowthParams::new(CurveParams::gompertz(80.0, 0.5, 1.0).unwrap(), noise);
        let data = GrowthData::new()
            .with_otoliths(array![1.0, 3.0, 5.0], array![30.0, 60.0, 72.0])
            .with_reference_lengths(30.0, 70.0);
        let lik = GrowthLikelihood::new(validate_inputs(&params, data).unwrap());
        (lik, params.to_theta().to_vec())
    }

    #[test]
    // Purpose
    // -------
    // A constant-noise Gompertz otolith model reports exactly its groups.
    //
    // Given
    // -----
    // - Gompertz, constant σ1 = 2, three otoliths, grid disabled.
    //
    // Expect
    // ------
    // - Names in contract order with no reference or tag entries; natural
    //   parameters recovered from θ.
    fn otolith_report_names_and_values() {
        let (lik, theta) = oto_likelihood(NoiseParams::constant(2.0).unwrap());

        let report = build_report(&lik, &theta, &CurveGrid::Disabled);

        assert_eq!(
            report.names(),
            vec![
                "Linf", "k", "tau", "sigma_1", "age_oto", "len_oto", "len_oto_hat", "sigma_oto",
                "nll_oto", "nll_oto_total", "nll_tag_total", "nll",
            ]
        );
        assert_relative_eq!(report.scalar("Linf").unwrap(), 80.0, epsilon = 1e-12);
        assert_relative_eq!(report.scalar("sigma_1").unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(report.scalar("nll_tag_total"), Some(0.0));
        assert!(report.vector("sigma_oto").unwrap().iter().all(|&s| (s - 2.0).abs() < 1e-12));
    }

    #[test]
    // Purpose
    // -------
    // Per-observation nll terms add up to the reported totals, and the
    // length-varying line is reported.
    //
    // Given
    // -----
    // - σ1 = 1 at 30 and σ2 = 3 at 70.
    //
    // Expect
    // ------
    // - `sum(nll_oto) == nll_oto_total == nll`; slope 0.05, intercept −0.5.
    fn report_terms_sum_to_totals() {
        let (lik, theta) = oto_likelihood(NoiseParams::length_varying(1.0, 3.0).unwrap());

        let report = build_report(&lik, &theta, &CurveGrid::Disabled);

        let terms = report.vector("nll_oto").unwrap().sum();
        assert_relative_eq!(terms, report.scalar("nll_oto_total").unwrap(), epsilon = 1e-12);
        assert_relative_eq!(terms, report.scalar("nll").unwrap(), epsilon = 1e-12);
        assert_relative_eq!(report.scalar("sigma_slope").unwrap(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(report.scalar("sigma_intercept").unwrap(), -0.5, epsilon = 1e-12);
        assert_eq!(report.vector("nll"), None);
    }

    #[test]
    // Purpose
    // -------
    // An enabled grid adds the age grid and the curve on it.
    //
    // Given
    // -----
    // - Daily grid over 10 years.
    //
    // Expect
    // ------
    // - 3651 ages and lengths; the first equals the curve at age 0.
    fn enabled_grid_reports_curve() {
        let (lik, theta) = oto_likelihood(NoiseParams::constant(2.0).unwrap());
        let grid = CurveGrid::Enabled(AgeGrid::daily(10.0).unwrap());

        let report = build_report(&lik, &theta, &grid);

        let curve = report.vector("curve").unwrap();
        assert_eq!(report.vector("age_grid").unwrap().len(), 3651);
        assert_eq!(curve.len(), 3651);
        assert_relative_eq!(curve[0], 80.0 * (-(0.5_f64).exp()).exp(), epsilon = 1e-10);
    }
}
