//! Growth curves: predicted length at age for each family.
//!
//! Purpose
//! -------
//! Evaluate the three curve families elementwise over ages, generically over
//! the scalar type so the same code runs on `f64` (values, reports) and on
//! dual numbers (exact gradients).
//!
//! Key behaviors
//! -------------
//! - [`Curve`] holds natural-space parameters for one family and evaluates
//!   `L̂(t)` with [`Curve::length_at`].
//! - von Bertalanffy (Schnute):
//!   `L1 + (L2 − L1)(1 − e^{−k(t−t1)}) / (1 − e^{−k(t2−t1)})`.
//! - Gompertz: `Linf · exp(−exp(−k(t − τ)))`.
//! - Richards (Schnute):
//!   `[L1^b + (L2^b − L1^b)(1 − e^{−k(t−t1)}) / (1 − e^{−k(t2−t1)})]^{1/b}`,
//!   with powers taken as `exp(b ln L)` so they stay differentiable in `b`.
//!   The outer root stays real on a negative bracket (ages before `t1`)
//!   when `1/b` is an integer, so `b = 1` matches von Bertalanffy everywhere.
//! - [`vonbert_curve`], [`gompertz_curve`], [`richards_curve`] evaluate a
//!   whole age vector for callers that only need predictions.
//!
//! Invariants & assumptions
//! ------------------------
//! - `k = 0`, `b = 0` and `t1 = t2` are singular and not special-cased;
//!   evaluating there yields non-finite lengths.
//! - Every age is valid input, including extrapolation outside the data.
//!
//! Conventions
//! -----------
//! - Parameters are natural-space values; the log transforms live in
//!   [`params`](super::params).
//! - Reference ages are data, so they stay `f64` in every instantiation.
use crate::growth::core::profile::CurveFamily;
use ndarray::{Array1, ArrayView1};
use num_dual::DualNum;

/// Natural-space curve parameters for one family.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve<T> {
    VonBertalanffy { l1: T, l2: T, k: T, t1: f64, t2: f64 },
    Gompertz { linf: T, k: T, tau: T },
    Richards { l1: T, l2: T, k: T, b: T, t1: f64, t2: f64 },
}

impl<T: DualNum<f64>> Curve<T> {
    pub fn family(&self) -> CurveFamily {
        match self {
            Curve::VonBertalanffy { .. } => CurveFamily::VonBertalanffy,
            Curve::Gompertz { .. } => CurveFamily::Gompertz,
            Curve::Richards { .. } => CurveFamily::Richards,
        }
    }

    /// Predicted length at `age`.
    pub fn length_at(&self, age: T) -> T {
        match self {
            Curve::VonBertalanffy { l1, l2, k, t1, t2 } => {
                l1.clone() + (l2.clone() - l1) * schnute_ratio(age, k, *t1, *t2)
            }
            Curve::Gompertz { linf, k, tau } => {
                let inner = (-k.clone() * (age - tau)).exp();
                linf.clone() * (-inner).exp()
            }
            Curve::Richards { l1, l2, k, b, t1, t2 } => {
                let l1b = (l1.ln() * b).exp();
                let l2b = (l2.ln() * b).exp();
                let ratio = schnute_ratio(age, k, *t1, *t2);
                inverse_power(l1b.clone() + (l2b - l1b) * ratio, b)
            }
        }
    }

    /// Natural parameters in [`CurveFamily::natural_names`] order.
    pub fn natural_params(&self) -> Vec<T> {
        match self {
            Curve::VonBertalanffy { l1, l2, k, .. } => vec![l1.clone(), l2.clone(), k.clone()],
            Curve::Gompertz { linf, k, tau } => vec![linf.clone(), k.clone(), tau.clone()],
            Curve::Richards { l1, l2, k, b, .. } => {
                vec![l1.clone(), l2.clone(), k.clone(), b.clone()]
            }
        }
    }
}

/// `(1 − e^{−k(t−t1)}) / (1 − e^{−k(t2−t1)})`; equals 0 at `t1` and 1 at `t2`.
fn schnute_ratio<T: DualNum<f64>>(age: T, k: &T, t1: f64, t2: f64) -> T {
    let num = -(-k.clone() * (age - t1)).exp() + 1.0;
    let den = -(-k.clone() * (t2 - t1)).exp() + 1.0;
    num / den
}

/// `x^{1/b}`. Negative `x` has a real value only when `1/b` is an integer
/// (e.g. `b = 1` before `t1`); otherwise the result is NaN.
fn inverse_power<T: DualNum<f64>>(x: T, b: &T) -> T {
    if x.re() < 0.0 {
        let n = b.re().recip();
        if n.fract() == 0.0 {
            let magnitude = (x.abs().ln() / b).exp();
            return if n % 2.0 == 0.0 { magnitude } else { -magnitude };
        }
    }
    (x.ln() / b).exp()
}

/// von Bertalanffy (Schnute) lengths at `ages`.
pub fn vonbert_curve(
    ages: ArrayView1<f64>, l1: f64, l2: f64, k: f64, t1: f64, t2: f64,
) -> Array1<f64> {
    let curve = Curve::VonBertalanffy { l1, l2, k, t1, t2 };
    ages.mapv(|age| curve.length_at(age))
}

/// Gompertz lengths at `ages`.
pub fn gompertz_curve(ages: ArrayView1<f64>, linf: f64, k: f64, tau: f64) -> Array1<f64> {
    let curve = Curve::Gompertz { linf, k, tau };
    ages.mapv(|age| curve.length_at(age))
}

/// Richards (Schnute) lengths at `ages`.
pub fn richards_curve(
    ages: ArrayView1<f64>, l1: f64, l2: f64, k: f64, b: f64, t1: f64, t2: f64,
) -> Array1<f64> {
    let curve = Curve::Richards { l1, l2, k, b, t1, t2 };
    ages.mapv(|age| curve.length_at(age))
}
