//! Bound growth model: validated data + likelihood + options.
//!
//! Purpose
//! -------
//! Provide the immutable value handed to the optimizer and queried after a
//! fit: nll value and exact gradient at any θ, the named report, maximum
//! likelihood fitting, and delta-method uncertainty.
//!
//! Key behaviors
//! -------------
//! - [`GrowthModel::build`] runs the ordered build checks, resolves fixed
//!   parameter names and freezes θ₀ from the supplied parameters.
//! - [`GrowthModel::value`], [`GrowthModel::gradient`],
//!   [`GrowthModel::value_and_gradient`] and [`GrowthModel::report`] take the
//!   full θ and only fail on a wrong length. Gradients come from `Dual64`
//!   forward passes over every entry, fixed ones included.
//! - [`GrowthModel::fit`] / [`GrowthModel::fit_from`] minimize over the free
//!   entries with L-BFGS and return a [`GrowthFit`].
//! - [`GrowthModel::sdreport`] returns θ covariance (observed information
//!   over the free entries, zero rows/columns for fixed ones) and standard
//!   errors of natural parameters and of the curve on the grid.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing is cached between evaluations; any call order gives the same
//!   results.
//! - Non-finite values are returned as-is from evaluation; the optimizer
//!   rejects them during `fit`.
use crate::{
    growth::{
        core::{
            autodiff::{jacobian, value_and_gradient},
            data::GrowthData,
            options::ModelOptions,
            params::{GrowthParams, ParamLayout},
            profile::{CurveFamily, DataProfile, NoiseProfile},
            validation::validate_inputs,
        },
        errors::{GrowthError, GrowthResult},
        models::{
            likelihood::GrowthLikelihood,
            report::{Report, build_report},
        },
    },
    inference::{calc_covariance, delta_method_se, standard_errors},
    optimization::{
        errors::OptResult,
        nll_optimizer::{Cost, Grad, NegLogLikelihood, OptimOutcome, Theta, minimize},
    },
};
use ndarray::{Array1, Array2};
use num_dual::DualNum;

/// A validated growth model ready for evaluation and fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthModel {
    likelihood: GrowthLikelihood,
    data_profile: DataProfile,
    options: ModelOptions,
    theta0: Theta,
    free: Vec<usize>,
}

/// Result of [`GrowthModel::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthFit {
    /// Optimizer outcome over the free θ entries.
    pub outcome: OptimOutcome,
    /// Full θ̂, fixed entries included.
    pub theta_hat: Theta,
    pub report: Report,
}

/// A derived quantity with its delta-method standard error.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedEstimate {
    pub name: String,
    pub value: f64,
    pub std_error: f64,
}

/// The predicted curve on the grid with pointwise standard errors.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveEstimate {
    pub ages: Array1<f64>,
    pub value: Array1<f64>,
    pub std_error: Array1<f64>,
}

/// Uncertainty summary at θ̂.
#[derive(Debug, Clone, PartialEq)]
pub struct SdReport {
    /// θ names in layout order.
    pub names: Vec<String>,
    pub theta_hat: Theta,
    pub covariance: Array2<f64>,
    pub std_errors: Array1<f64>,
    /// Natural curve parameters, `sigma_1` and [`sigma_2`].
    pub derived: Vec<DerivedEstimate>,
    /// Present when the model's curve grid is enabled.
    pub curve: Option<CurveEstimate>,
}

impl SdReport {
    pub fn derived(&self, name: &str) -> Option<&DerivedEstimate> {
        self.derived.iter().find(|d| d.name == name)
    }
}

impl GrowthModel {
    /// Validate `params` against `data` and bind them with `options`.
    ///
    /// # Errors
    /// - The ordered configuration errors of [`validate_inputs`].
    /// - [`GrowthError::UnknownParameter`] for a fixed name outside the layout.
    /// - [`GrowthError::InvalidThetaInput`] for a non-finite starting value.
    pub fn build(
        params: &GrowthParams, data: GrowthData, options: ModelOptions,
    ) -> GrowthResult<Self> {
        let inputs = validate_inputs(params, data)?;
        let layout = inputs.layout;
        let mut fixed = Vec::with_capacity(options.fixed.len());
        for name in &options.fixed {
            let index = layout
                .index_of(name)
                .ok_or_else(|| GrowthError::UnknownParameter { name: name.clone() })?;
            fixed.push(index);
        }
        let free = (0..layout.len()).filter(|i| !fixed.contains(i)).collect();
        let theta0 = params.to_theta();
        check_finite(&theta0)?;
        let data_profile = inputs.data_profile;
        Ok(Self { likelihood: GrowthLikelihood::new(inputs), data_profile, options, theta0, free })
    }

    pub fn family(&self) -> CurveFamily {
        self.layout().family()
    }

    pub fn data_profile(&self) -> DataProfile {
        self.data_profile
    }

    pub fn noise_profile(&self) -> NoiseProfile {
        self.likelihood.noise_profile()
    }

    pub fn layout(&self) -> &ParamLayout {
        self.likelihood.layout()
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// θ built from the parameters passed to [`GrowthModel::build`].
    pub fn theta0(&self) -> &Theta {
        &self.theta0
    }

    /// Indices of the θ entries estimated by `fit`.
    pub fn free_indices(&self) -> &[usize] {
        &self.free
    }

    pub fn likelihood(&self) -> &GrowthLikelihood {
        &self.likelihood
    }

    /// `nll(θ)`.
    pub fn value(&self, theta: &Theta) -> GrowthResult<f64> {
        self.check_len(theta)?;
        Ok(self.likelihood.nll(&theta.to_vec()))
    }

    /// `∇nll(θ)` over every θ entry.
    pub fn gradient(&self, theta: &Theta) -> GrowthResult<Grad> {
        Ok(self.value_and_gradient(theta)?.1)
    }

    pub fn value_and_gradient(&self, theta: &Theta) -> GrowthResult<(f64, Grad)> {
        self.check_len(theta)?;
        let dirs: Vec<usize> = (0..theta.len()).collect();
        Ok(self.dual_gradient(&theta.to_vec(), &dirs))
    }

    /// Named quantities at `θ`.
    pub fn report(&self, theta: &Theta) -> GrowthResult<Report> {
        self.check_len(theta)?;
        Ok(build_report(&self.likelihood, &theta.to_vec(), &self.options.curve_grid))
    }

    /// Fit from [`GrowthModel::theta0`].
    pub fn fit(&self) -> GrowthResult<GrowthFit> {
        self.fit_from(&self.theta0)
    }

    /// Fit from `theta0`; fixed entries keep their `theta0` values.
    ///
    /// # Errors
    /// - [`GrowthError::ThetaLengthMismatch`] / [`GrowthError::InvalidThetaInput`].
    /// - [`GrowthError::Optimization`] when the optimizer fails.
    pub fn fit_from(&self, theta0: &Theta) -> GrowthResult<GrowthFit> {
        self.check_len(theta0)?;
        check_finite(theta0)?;
        let objective = FreeObjective { model: self, base: theta0.clone() };
        let outcome = minimize(&objective, objective.restrict(theta0), &self.options.mle)?;
        let theta_hat = objective.expand(&outcome.theta_hat);
        let report = self.report(&theta_hat)?;
        Ok(GrowthFit { outcome, theta_hat, report })
    }

    /// Covariance of θ̂ and delta-method standard errors of derived
    /// quantities.
    ///
    /// # Errors
    /// - [`GrowthError::ThetaLengthMismatch`] / [`GrowthError::InvalidThetaInput`].
    /// - [`GrowthError::Inference`] when the Hessian or the Jacobian is not
    ///   finite.
    pub fn sdreport(&self, theta_hat: &Theta) -> GrowthResult<SdReport> {
        self.check_len(theta_hat)?;
        check_finite(theta_hat)?;
        let objective = FreeObjective { model: self, base: theta_hat.clone() };
        let grad_fn = |free: &Theta| objective.free_gradient(free).1;
        let cov_free = calc_covariance(&grad_fn, &objective.restrict(theta_hat))?;

        let n = theta_hat.len();
        let mut covariance = Array2::zeros((n, n));
        for (a, &i) in self.free.iter().enumerate() {
            for (b, &j) in self.free.iter().enumerate() {
                covariance[[i, j]] = cov_free[[a, b]];
            }
        }
        let std_errors = standard_errors(&covariance);

        let (values, jac) = jacobian(|t| self.derived_values(t), &theta_hat.to_vec(), &self.free);
        let derived_se = delta_method_se(&covariance, &jac)?;
        let names = self.derived_names();
        let derived = names
            .iter()
            .enumerate()
            .map(|(i, name)| DerivedEstimate {
                name: name.clone(),
                value: values[i],
                std_error: derived_se[i],
            })
            .collect();
        let curve = self.options.curve_grid.grid().map(|grid| {
            let k = names.len();
            CurveEstimate {
                ages: grid.ages(),
                value: values.slice(ndarray::s![k..]).to_owned(),
                std_error: derived_se.slice(ndarray::s![k..]).to_owned(),
            }
        });

        Ok(SdReport {
            names: self.layout().names(),
            theta_hat: theta_hat.clone(),
            covariance,
            std_errors,
            derived,
            curve,
        })
    }

    // ---- Helper methods ----

    fn check_len(&self, theta: &Theta) -> GrowthResult<()> {
        let expected = self.layout().len();
        if theta.len() != expected {
            return Err(GrowthError::ThetaLengthMismatch { expected, actual: theta.len() });
        }
        Ok(())
    }

    fn dual_gradient(&self, theta: &[f64], dirs: &[usize]) -> (f64, Grad) {
        value_and_gradient(|t| self.likelihood.nll(t), theta, dirs)
    }

    fn derived_names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.family().natural_names().iter().map(|s| s.to_string()).collect();
        names.push("sigma_1".to_string());
        if self.layout().sigma_2_index().is_some() {
            names.push("sigma_2".to_string());
        }
        names
    }

    /// Natural parameters, σ's, then the curve on the grid when enabled.
    fn derived_values<T: DualNum<f64>>(&self, theta: &[T]) -> Vec<T> {
        let layout = self.layout();
        let curve = self.likelihood.curve_from(theta);
        let mut values = curve.natural_params();
        values.push(theta[layout.sigma_1_index()].exp());
        if let Some(i) = layout.sigma_2_index() {
            values.push(theta[i].exp());
        }
        if let Some(grid) = self.options.curve_grid.grid() {
            values.extend(grid.ages().iter().map(|&age| curve.length_at(T::from(age))));
        }
        values
    }
}

impl NegLogLikelihood for GrowthModel {
    fn value(&self, theta: &Theta) -> OptResult<Cost> {
        Ok(GrowthModel::value(self, theta)?)
    }

    fn check(&self, theta: &Theta) -> OptResult<()> {
        self.check_len(theta)?;
        check_finite(theta)?;
        Ok(())
    }

    fn grad(&self, theta: &Theta) -> OptResult<Grad> {
        Ok(self.gradient(theta)?)
    }
}

/// The nll as a function of the free θ entries, others held at `base`.
struct FreeObjective<'a> {
    model: &'a GrowthModel,
    base: Theta,
}

impl FreeObjective<'_> {
    fn expand(&self, free: &Theta) -> Theta {
        let mut full = self.base.clone();
        for (&i, &v) in self.model.free.iter().zip(free.iter()) {
            full[i] = v;
        }
        full
    }

    fn restrict(&self, full: &Theta) -> Theta {
        self.model.free.iter().map(|&i| full[i]).collect()
    }

    fn free_gradient(&self, free: &Theta) -> (f64, Grad) {
        let full = self.expand(free);
        let (value, grad) = self.model.dual_gradient(&full.to_vec(), &self.model.free);
        (value, self.restrict(&grad))
    }

    fn check_free(&self, free: &Theta) -> GrowthResult<()> {
        let expected = self.model.free.len();
        if free.len() != expected {
            return Err(GrowthError::ThetaLengthMismatch { expected, actual: free.len() });
        }
        Ok(())
    }
}

impl NegLogLikelihood for FreeObjective<'_> {
    fn value(&self, theta: &Theta) -> OptResult<Cost> {
        self.check_free(theta)?;
        Ok(self.model.likelihood.nll(&self.expand(theta).to_vec()))
    }

    fn check(&self, theta: &Theta) -> OptResult<()> {
        self.check_free(theta)?;
        check_finite(theta)?;
        Ok(())
    }

    fn grad(&self, theta: &Theta) -> OptResult<Grad> {
        self.check_free(theta)?;
        Ok(self.free_gradient(theta).1)
    }
}

fn check_finite(theta: &Theta) -> GrowthResult<()> {
    match theta.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(GrowthError::InvalidThetaInput { index, value: theta[index] }),
        None => Ok(()),
    }
}
