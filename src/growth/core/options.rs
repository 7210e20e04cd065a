//! Model configuration: optimizer options, the reported curve grid, and
//! fixed parameters.
//!
//! Purpose
//! -------
//! Collect the knobs that change what a model reports or estimates without
//! changing its likelihood.
//!
//! Key behaviors
//! -------------
//! - [`AgeGrid`]: deterministic ages `from, from + step, …, ≤ to`. The
//!   daily grid `AgeGrid::daily(10.0)` has 3651 ages (0 to 10 inclusive).
//! - [`CurveGrid`]: whether the predicted curve is reported and propagated
//!   by `sdreport`, and on which grid.
//! - [`ModelOptions`]: `MLEOptions` for `fit`, a [`CurveGrid`], and names of
//!   θ entries held fixed at their starting values.
//!
//! Conventions
//! -----------
//! - [`ModelOptions::for_family`] enables the daily grid for von
//!   Bertalanffy only; any family may opt in with
//!   [`ModelOptions::with_curve_grid`].
//! - The grid endpoint is included when it lies within `GENERAL_TOL` of a
//!   grid point.
use crate::{
    growth::{
        core::profile::CurveFamily,
        errors::{GrowthError, GrowthResult},
    },
    optimization::{nll_optimizer::MLEOptions, numerical_stability::GENERAL_TOL},
};
use ndarray::Array1;

/// Days per year used by [`AgeGrid::daily`].
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Largest number of ages an [`AgeGrid`] may hold.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Evenly spaced ages from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeGrid {
    from: f64,
    to: f64,
    step: f64,
}

impl AgeGrid {
    /// # Errors
    /// [`GrowthError::InvalidAgeGrid`] for non-finite bounds, a non-positive
    /// or non-finite step, `to < from`, or more than [`MAX_GRID_POINTS`]
    /// ages.
    pub fn new(from: f64, to: f64, step: f64) -> GrowthResult<Self> {
        let invalid = |reason| GrowthError::InvalidAgeGrid { from, to, step, reason };
        if !from.is_finite() || !to.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(invalid("step must be finite and positive"));
        }
        if to < from {
            return Err(invalid("upper bound below lower bound"));
        }
        let intervals = Self::intervals(from, to, step);
        if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
            return Err(invalid("too many grid points"));
        }
        Ok(Self { from, to, step })
    }

    /// Daily resolution from age 0 to `years`.
    pub fn daily(years: f64) -> GrowthResult<Self> {
        Self::new(0.0, years, 1.0 / DAYS_PER_YEAR)
    }

    pub fn len(&self) -> usize {
        Self::intervals(self.from, self.to, self.step) as usize + 1
    }

    /// Never true: a valid grid holds at least `from`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Ages `from + i·step`, computed by multiplication to avoid drift.
    pub fn ages(&self) -> Array1<f64> {
        Array1::from_iter((0..self.len()).map(|i| self.from + i as f64 * self.step))
    }

    /// Whole steps between the bounds, tolerating endpoint rounding.
    fn intervals(from: f64, to: f64, step: f64) -> f64 {
        ((to - from) / step + GENERAL_TOL).floor()
    }
}

/// Reported/propagated curve setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveGrid {
    Disabled,
    Enabled(AgeGrid),
}

impl CurveGrid {
    pub fn grid(&self) -> Option<&AgeGrid> {
        match self {
            CurveGrid::Disabled => None,
            CurveGrid::Enabled(grid) => Some(grid),
        }
    }
}

/// Options bound into a `GrowthModel`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    pub mle: MLEOptions,
    pub curve_grid: CurveGrid,
    pub fixed: Vec<String>,
}

impl ModelOptions {
    pub fn new(mle: MLEOptions, curve_grid: CurveGrid) -> Self {
        Self { mle, curve_grid, fixed: Vec::new() }
    }

    /// Default optimizer options; daily 0–10 year curve for von Bertalanffy.
    pub fn for_family(family: CurveFamily) -> Self {
        let curve_grid = match (family, AgeGrid::daily(10.0)) {
            (CurveFamily::VonBertalanffy, Ok(grid)) => CurveGrid::Enabled(grid),
            _ => CurveGrid::Disabled,
        };
        Self::new(MLEOptions::default(), curve_grid)
    }

    pub fn with_mle(mut self, mle: MLEOptions) -> Self {
        self.mle = mle;
        self
    }

    pub fn with_curve_grid(mut self, curve_grid: CurveGrid) -> Self {
        self.curve_grid = curve_grid;
        self
    }

    /// Hold the named θ entries at their starting values during `fit`.
    pub fn with_fixed<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.fixed.extend(names.iter().map(|s| s.as_ref().to_string()));
        self
    }
}
