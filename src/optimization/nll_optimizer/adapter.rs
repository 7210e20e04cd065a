//! Adapter that exposes a bound [`NegLogLikelihood`] as an `argmin` problem.
//!
//! The objective already is a cost, so `cost(θ) = nll(θ)` and the gradient is
//! passed through unchanged.
//!
//! Line-search trial points can leave the region where the objective is
//! finite (log-space parameters overflow `exp` on a long first step). With a
//! penalty configured, such a trial costs a large finite value and has a zero
//! gradient, so the line search backs off instead of aborting the run.
use crate::optimization::{
    errors::OptError,
    nll_optimizer::{
        traits::NegLogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Multiplier applied to `1 + |nll(θ₀)|` when building the penalty.
pub const NON_FINITE_PENALTY_SCALE: f64 = 1e3;

/// Cost substituted for non-finite trial values when starting from a point
/// with cost `start_cost`. Always strictly above `start_cost`.
pub fn non_finite_penalty(start_cost: Cost) -> Cost {
    start_cost + NON_FINITE_PENALTY_SCALE * (1.0 + start_cost.abs())
}

/// Bridges a [`NegLogLikelihood`] to argmin's `CostFunction` and `Gradient`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: NegLogLikelihood> {
    pub f: &'a F,
    /// Cost used for non-finite trial values; `None` turns them into errors.
    pub penalty: Option<Cost>,
}

impl<'a, F: NegLogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F) -> Self {
        Self { f, penalty: None }
    }

    /// Penalize non-finite trial values relative to the starting cost.
    pub fn with_penalty_from(mut self, start_cost: Cost) -> Self {
        self.penalty = Some(non_finite_penalty(start_cost));
        self
    }
}

impl<'a, F: NegLogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `nll(θ)`.
    ///
    /// A non-finite value becomes the penalty when one is set, and
    /// `OptError::NonFiniteCost` otherwise.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta)?;
        if output.is_finite() {
            return Ok(output);
        }
        match self.penalty {
            Some(penalty) => Ok(penalty),
            None => Err((OptError::NonFiniteCost { value: output }).into()),
        }
    }
}

impl<'a, F: NegLogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate `∇nll(θ)`, validated for shape and finiteness.
    ///
    /// With a penalty set, a non-finite gradient at a point whose cost is
    /// also non-finite is replaced by zeros.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        let g = self.f.grad(theta)?;
        if self.penalty.is_some()
            && g.iter().any(|v| !v.is_finite())
            && !self.f.value(theta)?.is_finite()
        {
            return Ok(Grad::zeros(dim));
        }
        validate_grad(&g, dim)?;
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pass-through of cost and exact gradient (no sign changes).
    // - Rejection of non-finite costs without a penalty.
    // - Penalty substitution for non-finite costs and gradients.
    // -------------------------------------------------------------------------

    struct Quadratic;

    impl NegLogLikelihood for Quadratic {
        fn value(&self, theta: &Theta) -> OptResult<Cost> {
            Ok(theta.dot(theta))
        }
        fn check(&self, _theta: &Theta) -> OptResult<()> {
            Ok(())
        }
        fn grad(&self, theta: &Theta) -> OptResult<Grad> {
            Ok(theta * 2.0)
        }
    }

    /// `exp(θ₀)`, overflowing for `θ₀ > ~709.8`.
    struct Exponential;

    impl NegLogLikelihood for Exponential {
        fn value(&self, theta: &Theta) -> OptResult<Cost> {
            Ok(theta[0].exp())
        }
        fn check(&self, _theta: &Theta) -> OptResult<()> {
            Ok(())
        }
        fn grad(&self, theta: &Theta) -> OptResult<Grad> {
            Ok(array![theta[0].exp()])
        }
    }

    #[test]
    // Purpose
    // -------
    // Cost and exact gradient reach argmin unchanged.
    //
    // Given
    // -----
    // - `nll(θ) = θᵀθ` with gradient `2θ` at `θ = (1, -2)`.
    //
    // Expect
    // ------
    // - cost 5 and gradient (2, -4), with or without a penalty.
    fn adapter_passes_cost_and_gradient_through() {
        let plain = ArgMinAdapter::new(&Quadratic);
        let penalized = ArgMinAdapter::new(&Quadratic).with_penalty_from(1.0);
        let theta = array![1.0, -2.0];

        for adapter in [plain, penalized] {
            assert_eq!(adapter.cost(&theta).unwrap(), 5.0);
            assert_eq!(adapter.gradient(&theta).unwrap(), array![2.0, -4.0]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Without a penalty a non-finite objective value is surfaced as
    // `NonFiniteCost`.
    //
    // Given
    // -----
    // - `exp(θ)` at `θ = 1000`.
    //
    // Expect
    // ------
    // - `cost` errors and the error converts back to `NonFiniteCost`.
    fn adapter_rejects_non_finite_cost_without_penalty() {
        let adapter = ArgMinAdapter::new(&Exponential);

        let err = adapter.cost(&array![1000.0]).unwrap_err();

        assert_eq!(OptError::from(err), OptError::NonFiniteCost { value: f64::INFINITY });
    }

    #[test]
    // Purpose
    // -------
    // With a penalty, an overflowing trial point gets a finite cost above
    // the start and a zero gradient, while finite points are untouched.
    //
    // Given
    // -----
    // - `exp(θ)` with a penalty built from a start cost of 2.
    //
    // Expect
    // ------
    // - At θ = 1000: cost `2 + 1e3·3` and gradient 0.
    // - At θ = 0: cost 1 and gradient 1.
    fn adapter_penalizes_overflowing_trial_points() {
        // Arrange
        let adapter = ArgMinAdapter::new(&Exponential).with_penalty_from(2.0);

        // Act
        let far_cost = adapter.cost(&array![1000.0]).unwrap();
        let far_grad = adapter.gradient(&array![1000.0]).unwrap();
        let near_cost = adapter.cost(&array![0.0]).unwrap();
        let near_grad = adapter.gradient(&array![0.0]).unwrap();

        // Assert
        assert_eq!(far_cost, 2.0 + NON_FINITE_PENALTY_SCALE * 3.0);
        assert_eq!(far_grad, array![0.0]);
        assert_eq!(near_cost, 1.0);
        assert_eq!(near_grad, array![1.0]);
    }

    #[test]
    // Purpose
    // -------
    // The penalty always sits above the starting cost, including negative
    // starting costs.
    //
    // Given
    // -----
    // - Start costs -50, 0 and 345.
    //
    // Expect
    // ------
    // - `non_finite_penalty(c) > c` for each.
    fn penalty_exceeds_start_cost() {
        for c in [-50.0, 0.0, 345.0] {
            assert!(non_finite_penalty(c) > c);
        }
    }
}
