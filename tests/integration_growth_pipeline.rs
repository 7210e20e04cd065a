//! Integration tests for growth-model fitting and uncertainty.
//!
//! Purpose
//! -------
//! - Validate the end-to-end growth pipeline: from raw observations and
//!   starting parameters, through model construction and L-BFGS fitting,
//!   to reports and delta-method standard errors.
//! - Use synthetic data generated exactly from known curves so recovery can
//!   be asserted tightly.
//!
//! Coverage
//! --------
//! - `growth::core`: `GrowthData` / `GrowthParams` assembly, `ModelOptions`
//!   with fixed parameters and curve grids, free curve functions.
//! - `growth::models::GrowthModel`: `build`, `fit`, `report`, `sdreport`.
//! - `optimization::nll_optimizer`: default and explicit `MLEOptions` /
//!   `Tolerances`.
//!
//! Exclusions
//! ----------
//! - Formula-level checks of curves, noise and likelihood terms; these are
//!   covered by unit tests.
use approx::assert_relative_eq;
use fishgrowth::{
    growth::{
        core::{
            AgeGrid, CurveFamily, CurveGrid, CurveParams, DataProfile, GrowthData, GrowthParams,
            ModelOptions, NoiseParams, gompertz_curve, vonbert_curve,
        },
        errors::GrowthError,
        models::GrowthModel,
    },
    optimization::nll_optimizer::{LineSearcher, MLEOptions, Tolerances},
};
use ndarray::{Array1, array};
use statrs::consts::LN_SQRT_2PI;

const L1: f64 = 25.0;
const L2: f64 = 75.0;
const K: f64 = 0.8;
const T1: f64 = 0.0;
const T2: f64 = 4.0;

/// Otolith ages 0.5, 1.0, …, 8.0 with exact von Bertalanffy lengths.
fn exact_otoliths() -> (Array1<f64>, Array1<f64>) {
    let ages = Array1::from_iter((1..=16).map(|i| 0.5 * i as f64));
    let lengths = vonbert_curve(ages.view(), L1, L2, K, T1, T2);
    (ages, lengths)
}

/// Exact tag lengths for fish released at `ages` and at liberty for `liberty`.
fn exact_tags(ages: &Array1<f64>, liberty: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
    let release = vonbert_curve(ages.view(), L1, L2, K, T1, T2);
    let recapture_ages = ages + liberty;
    let recapture = vonbert_curve(recapture_ages.view(), L1, L2, K, T1, T2);
    (release, recapture)
}

/// von Bertalanffy start at (20, 70, 0.5), away from the truth.
fn vb_start(noise: NoiseParams) -> GrowthParams {
    GrowthParams::new(
        CurveParams::von_bertalanffy(20.0, 70.0, 0.5).expect("valid start"),
        noise,
    )
}

#[test]
// Purpose
// -------
// Recover von Bertalanffy parameters from noise-free otolith data.
//
// Given
// -----
// - 16 otoliths generated from L1 = 25, L2 = 75, k = 0.8, t1 = 0, t2 = 4.
// - σ1 = 1 held fixed, start at (20, 70, 0.5).
//
// Expect
// ------
// - The optimizer converges and moves away from the start (the first
//   unit step along −∇nll overflows `exp` and must be backed off from).
// - L1, L2, k within 1e-3 of the truth.
// - nll at θ̂ equals n · ln √(2π), the minimum for zero residuals at σ = 1.
fn vb_otolith_fit_recovers_exact_parameters() {
    // Arrange
    let (ages, lengths) = exact_otoliths();
    let n = ages.len() as f64;
    let data = GrowthData::new().with_otoliths(ages, lengths).with_reference_ages(T1, T2);
    let params = vb_start(NoiseParams::constant(1.0).expect("valid sigma"));
    let options =
        ModelOptions::for_family(CurveFamily::VonBertalanffy).with_fixed(&["log_sigma_1"]);
    let model = GrowthModel::build(&params, data, options).expect("valid configuration");

    // Act
    let fit = model.fit().expect("fit should succeed on exact data");

    // Assert
    assert!(fit.outcome.converged, "fit did not converge: {}", fit.outcome.status);
    assert!(fit.outcome.iterations > 1);
    assert!((fit.theta_hat[0] - model.theta0()[0]).abs() > 0.1);
    let report = &fit.report;
    assert_relative_eq!(report.scalar("L1").unwrap(), L1, epsilon = 1e-3);
    assert_relative_eq!(report.scalar("L2").unwrap(), L2, epsilon = 1e-3);
    assert_relative_eq!(report.scalar("k").unwrap(), K, epsilon = 1e-3);
    assert_relative_eq!(report.scalar("sigma_1").unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(report.scalar("nll").unwrap(), n * LN_SQRT_2PI, epsilon = 1e-6);
    assert_relative_eq!(fit.outcome.value, n * LN_SQRT_2PI, epsilon = 1e-6);
    assert_eq!(report.vector("curve").map(|c| c.len()), Some(3651));
}

#[test]
// Purpose
// -------
// Recover latent release ages jointly with the curve from combined data.
//
// Given
// -----
// - The exact otoliths plus four tagged fish released at ages
//   (1.2, 2.0, 2.7, 3.5) with liberties (0.8, 1.5, 1.0, 2.0).
// - Latent ages started 25% too old, σ1 = 1 fixed, tighter tolerances and
//   an L-BFGS memory of 10.
//
// Expect
// ------
// - `Combined` profile and a converged fit.
// - Release ages and curve parameters within 1e-3.
fn combined_fit_recovers_latent_ages() {
    // Arrange
    let true_ages = array![1.2, 2.0, 2.7, 3.5];
    let liberty = array![0.8, 1.5, 1.0, 2.0];
    let (release, recapture) = exact_tags(&true_ages, &liberty);
    let (ages, lengths) = exact_otoliths();
    let data = GrowthData::new()
        .with_otoliths(ages, lengths)
        .with_tags(release, recapture, liberty)
        .with_reference_ages(T1, T2);
    let params = vb_start(NoiseParams::constant(1.0).expect("valid sigma"))
        .with_release_ages(&(&true_ages * 1.25))
        .expect("positive ages");
    let tols = Tolerances::new(Some(1e-9), Some(1e-14), Some(2000)).expect("valid tolerances");
    let mle =
        MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(10)).expect("valid options");
    let options = ModelOptions::for_family(CurveFamily::VonBertalanffy)
        .with_mle(mle)
        .with_curve_grid(CurveGrid::Disabled)
        .with_fixed(&["log_sigma_1"]);
    let model = GrowthModel::build(&params, data, options).expect("valid configuration");

    // Act
    let fit = model.fit().expect("fit should succeed on exact data");

    // Assert
    assert_eq!(model.data_profile(), DataProfile::Combined);
    assert!(fit.outcome.converged, "fit did not converge: {}", fit.outcome.status);
    let recovered = fit.report.vector("age_release").expect("tag report");
    for (got, want) in recovered.iter().zip(true_ages.iter()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-3);
    }
    assert_relative_eq!(fit.report.scalar("L1").unwrap(), L1, epsilon = 1e-3);
    assert_relative_eq!(fit.report.scalar("k").unwrap(), K, epsilon = 1e-3);
    let oto = fit.report.scalar("nll_oto_total").unwrap();
    let tag = fit.report.scalar("nll_tag_total").unwrap();
    assert_relative_eq!(oto + tag, fit.report.scalar("nll").unwrap(), epsilon = 1e-10);
}

#[test]
// Purpose
// -------
// Fit with free noise on perturbed data and propagate uncertainty.
//
// Given
// -----
// - The exact otoliths with alternating ±1.5 residuals.
// - All parameters free, daily 0–10 year curve grid.
//
// Expect
// ------
// - Finite, positive θ standard errors and derived standard errors.
// - A 3651-point curve estimate whose standard error at age t1 equals the
//   standard error of L1.
// - σ̂1 no larger than the residual spread around the true curve (1.5).
fn sdreport_on_noisy_otoliths() {
    // Arrange
    let (ages, exact) = exact_otoliths();
    let noisy = Array1::from_iter(
        exact.iter().enumerate().map(|(i, &l)| if i % 2 == 0 { l + 1.5 } else { l - 1.5 }),
    );
    let data = GrowthData::new().with_otoliths(ages, noisy).with_reference_ages(T1, T2);
    let params = vb_start(NoiseParams::constant(2.0).expect("valid sigma"));
    let model = GrowthModel::build(
        &params,
        data,
        ModelOptions::for_family(CurveFamily::VonBertalanffy),
    )
    .expect("valid configuration");

    // Act
    let fit = model.fit().expect("fit should succeed");
    let sd = model.sdreport(&fit.theta_hat).expect("sdreport should succeed");

    // Assert
    assert_eq!(sd.names, vec!["log_L1", "log_L2", "log_k", "log_sigma_1"]);
    assert!(sd.std_errors.iter().all(|se| se.is_finite() && *se > 0.0));
    assert!(sd.derived.iter().all(|d| d.std_error.is_finite() && d.std_error > 0.0));
    let curve = sd.curve.as_ref().expect("curve grid enabled for von Bertalanffy");
    assert_eq!(curve.value.len(), 3651);
    assert!(curve.std_error.iter().all(|se| se.is_finite()));
    let l1 = sd.derived("L1").expect("L1 reported");
    assert_relative_eq!(curve.std_error[0], l1.std_error, max_relative = 1e-6);
    let sigma = sd.derived("sigma_1").unwrap().value;
    assert!(sigma > 1.3 && sigma <= 1.5 + 1e-6);
}

#[test]
// Purpose
// -------
// Gompertz with length-varying noise fits tag-only data and improves on
// its start.
//
// Given
// -----
// - Six tagged fish with Gompertz lengths (Linf 90, k 0.6, tau 1.0) and
//   known release ages, started at the true ages.
// - σ1 at L_short = 30, σ2 at L_long = 80, no curve grid by default.
//
// Expect
// ------
// - `TagOnly` profile; nll at θ̂ below nll at θ₀; no curve in the report.
fn gompertz_tag_only_fit_improves_start() {
    // Arrange
    let ages = array![0.8, 1.3, 2.0, 2.4, 3.1, 4.0];
    let liberty = array![1.0, 0.5, 1.2, 2.0, 0.7, 1.5];
    let release = gompertz_curve(ages.view(), 90.0, 0.6, 1.0);
    let recapture = gompertz_curve((&ages + &liberty).view(), 90.0, 0.6, 1.0);
    let data = GrowthData::new()
        .with_tags(release, recapture + 0.5, liberty)
        .with_reference_lengths(30.0, 80.0);
    let params = GrowthParams::new(
        CurveParams::gompertz(80.0, 0.5, 1.5).expect("valid start"),
        NoiseParams::length_varying(1.0, 2.0).expect("valid sigma"),
    )
    .with_release_ages(&ages)
    .expect("positive ages");
    let model =
        GrowthModel::build(&params, data, ModelOptions::for_family(CurveFamily::Gompertz))
            .expect("valid configuration");

    // Act
    let fit = model.fit().expect("fit should succeed");

    // Assert
    assert_eq!(model.data_profile(), DataProfile::TagOnly);
    assert_ne!(fit.theta_hat, *model.theta0());
    assert!(fit.outcome.value < model.value(model.theta0()).unwrap());
    assert!(fit.report.vector("curve").is_none());
    assert!(fit.report.scalar("sigma_2").is_some());
}

#[test]
// Purpose
// -------
// Configuration errors surface at build time with their messages.
//
// Given
// -----
// - σ2 without reference lengths; empty otolith and tag data; otoliths
//   with a stray `liberty`; an enabled curve grid for Richards (allowed).
//
// Expect
// ------
// - "reference lengths required …", "no usable data", an otolith-only
//   model, and a Richards model reporting its curve.
fn build_errors_and_per_family_curve_grid() {
    let lv = vb_start(NoiseParams::length_varying(1.0, 2.0).expect("valid sigma"));
    let (ages, lengths) = exact_otoliths();
    let oto = GrowthData::new().with_otoliths(ages, lengths).with_reference_ages(T1, T2);
    let options = ModelOptions::for_family(CurveFamily::VonBertalanffy);

    let err = GrowthModel::build(&lv, oto.clone(), options.clone()).unwrap_err();
    assert_eq!(err, GrowthError::MissingReferenceLengths);
    assert_eq!(
        err.to_string(),
        "reference lengths required when length-varying noise is requested"
    );

    let empty = GrowthData::new()
        .with_otoliths(array![], array![])
        .with_tags(array![], array![], array![])
        .with_reference_ages(T1, T2);
    let constant = vb_start(NoiseParams::constant(1.0).expect("valid sigma"));
    let err = GrowthModel::build(&constant, empty, options.clone()).unwrap_err();
    assert_eq!(err.to_string(), "no usable data");

    let mut stray = oto.clone();
    stray.liberty = Some(array![1.0, 2.0, 3.0]);
    let model = GrowthModel::build(&constant, stray, options).expect("tags left out");
    assert_eq!(model.data_profile(), DataProfile::OtolithOnly);

    let richards = GrowthParams::new(
        CurveParams::richards(L1, L2, K, 1.0).expect("valid params"),
        NoiseParams::constant(1.0).expect("valid sigma"),
    );
    let grid = CurveGrid::Enabled(AgeGrid::new(0.0, 8.0, 0.5).expect("valid grid"));
    let model = GrowthModel::build(
        &richards,
        oto,
        ModelOptions::for_family(CurveFamily::Richards).with_curve_grid(grid),
    )
    .expect("valid configuration");
    let report = model.report(model.theta0()).expect("matching theta");
    let (_, exact) = exact_otoliths();
    let curve = report.vector("curve").expect("grid enabled");
    assert_eq!(curve.len(), 17);
    assert_relative_eq!(curve[16], exact[15], epsilon = 1e-9);
}
