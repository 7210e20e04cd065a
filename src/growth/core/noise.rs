//! Observation noise: standard deviation as a function of predicted length.
//!
//! `σ(L)` is the line through `(L_short, σ1)` and `(L_long, σ2)`, evaluated
//! as `σ1 · (L_long − L)/d + σ2 · (L − L_short)/d` with
//! `d = L_long − L_short`. Both weights are formed before multiplying, so
//! `σ(L_short)` is exactly `σ1` and `σ(L_long)` is exactly `σ2`. The same
//! line is reported as `intercept + slope · L` with
//! `slope = (σ2 − σ1)/d` and `intercept = σ1 − slope · L_short`.
//! Without `σ2` the noise is the constant `σ1`.
//!
//! `L_long = L_short` gives an infinite or NaN slope; it is not guarded.
use num_dual::DualNum;

#[derive(Debug, Clone, PartialEq)]
pub enum NoiseModel<T> {
    Constant { sigma_1: T },
    LengthVarying { sigma_1: T, sigma_2: T, l_short: f64, l_long: f64 },
}

impl<T: DualNum<f64>> NoiseModel<T> {
    /// Change in σ per unit length; zero for constant noise.
    pub fn slope(&self) -> T {
        match self {
            NoiseModel::Constant { .. } => T::from(0.0_f64),
            NoiseModel::LengthVarying { sigma_1, sigma_2, l_short, l_long } => {
                (sigma_2.clone() - sigma_1) / (*l_long - *l_short)
            }
        }
    }

    /// σ at length zero; `σ1` for constant noise.
    pub fn intercept(&self) -> T {
        match self {
            NoiseModel::Constant { sigma_1 } => sigma_1.clone(),
            NoiseModel::LengthVarying { sigma_1, l_short, .. } => {
                sigma_1.clone() - self.slope() * *l_short
            }
        }
    }

    /// Standard deviation at predicted length `len`.
    pub fn sigma_at(&self, len: &T) -> T {
        match self {
            NoiseModel::Constant { sigma_1 } => sigma_1.clone(),
            NoiseModel::LengthVarying { sigma_1, sigma_2, l_short, l_long } => {
                let span = *l_long - *l_short;
                let w_long = (len.clone() - *l_short) / span;
                let w_short = (-len.clone() + *l_long) / span;
                sigma_1.clone() * w_short + sigma_2.clone() * w_long
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Anchoring of length-varying noise at both reference lengths.
    // - Constant noise for every length.
    // - Consistency of intercept/slope with the anchored evaluation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Length-varying noise equals σ1 at L_short and σ2 at L_long.
    //
    // Given
    // -----
    // - σ1 = 2, σ2 = 5, L_short = 30, L_long = 90.
    //
    // Expect
    // ------
    // - σ(30) == 2 and σ(90) == 5 exactly, σ(60) == 3.5.
    fn length_varying_noise_hits_anchors() {
        let noise = NoiseModel::LengthVarying { sigma_1: 2.0, sigma_2: 5.0, l_short: 30.0, l_long: 90.0 };

        assert_eq!(noise.sigma_at(&30.0), 2.0);
        assert_eq!(noise.sigma_at(&90.0), 5.0);
        assert_relative_eq!(noise.sigma_at(&60.0), 3.5, max_relative = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Both anchors are hit exactly for reference lengths and σ values that
    // are not exactly representable.
    //
    // Given
    // -----
    // - L_short = 3.3, L_long = 77.7 and a grid of σ1, σ2 in [0.01, 3].
    //
    // Expect
    // ------
    // - σ(L_short) == σ1 and σ(L_long) == σ2 bit for bit.
    fn anchors_are_exact_for_inexact_inputs() {
        let (l_short, l_long) = (3.3, 77.7);
        for i in 1..=60 {
            for j in 1..=60 {
                let (s1, s2) = (0.05 * i as f64 - 0.04, 0.01 + 0.049 * j as f64);
                let noise = NoiseModel::LengthVarying { sigma_1: s1, sigma_2: s2, l_short, l_long };

                assert_eq!(noise.sigma_at(&l_short), s1, "σ1 = {s1}, σ2 = {s2}");
                assert_eq!(noise.sigma_at(&l_long), s2, "σ1 = {s1}, σ2 = {s2}");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Constant noise ignores the predicted length.
    //
    // Given
    // -----
    // - σ1 = 1.7 and lengths spanning several orders of magnitude.
    //
    // Expect
    // ------
    // - σ == 1.7, slope 0, intercept 1.7.
    fn constant_noise_is_flat() {
        let noise = NoiseModel::Constant { sigma_1: 1.7 };

        for len in [0.0, 1.0, 55.5, 1e6] {
            assert_eq!(noise.sigma_at(&len), 1.7);
        }
        assert_eq!(noise.slope(), 0.0);
        assert_eq!(noise.intercept(), 1.7);
    }

    #[test]
    // Purpose
    // -------
    // The intercept/slope form describes the same line.
    //
    // Given
    // -----
    // - σ1 = 1, σ2 = 4, L_short = 20, L_long = 80.
    //
    // Expect
    // ------
    // - slope 0.05, intercept 0, and `intercept + slope·L == σ(L)`.
    fn intercept_and_slope_reproduce_sigma() {
        let noise = NoiseModel::LengthVarying { sigma_1: 1.0, sigma_2: 4.0, l_short: 20.0, l_long: 80.0 };

        assert_relative_eq!(noise.slope(), 0.05, max_relative = 1e-15);
        assert_relative_eq!(noise.intercept(), 0.0, epsilon = 1e-14);
        let len = 47.0;
        assert_relative_eq!(
            noise.intercept() + noise.slope() * len,
            noise.sigma_at(&len),
            max_relative = 1e-14
        );
    }
}
