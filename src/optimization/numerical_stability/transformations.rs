//! Numerical tolerances and the log-space mapping for positive parameters.
//!
//! Growth models keep every strictly positive quantity (lengths, growth
//! rates, noise scales, ages) as its logarithm in `θ`, so any real value the
//! optimizer proposes maps back to a positive number through `exp`. The
//! helpers here perform the forward mapping once, at construction time,
//! and reject values that have no logarithm.

/// Eigenvalues of the observed information at or below this threshold are
/// treated as zero when forming the pseudoinverse.
pub const EIGEN_EPS: f64 = 1e-12;

/// Absolute slack used when deciding whether a grid endpoint lands on the
/// grid.
pub const GENERAL_TOL: f64 = 1e-9;

/// Natural log of a strictly positive finite value.
///
/// Returns `None` for zero, negative, NaN or infinite input.
pub fn checked_log(x: f64) -> Option<f64> {
    if x.is_finite() && x > 0.0 { Some(x.ln()) } else { None }
}

/// Elementwise [`checked_log`]; `Err(index)` names the first offending entry.
pub fn checked_log_all<'a, I>(values: I) -> Result<Vec<f64>, usize>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, &v)| checked_log(v).ok_or(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Domain of `checked_log` and agreement with `ln` inside it.
    // - First-offender reporting in `checked_log_all`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Only strictly positive finite values have a logarithm.
    //
    // Given
    // -----
    // - 25.0, 0.0, -1.0, NaN and +∞.
    //
    // Expect
    // ------
    // - `Some(ln 25)` for the first, `None` for the rest.
    fn checked_log_accepts_only_positive_finite() {
        assert_relative_eq!(checked_log(25.0).unwrap(), 25.0_f64.ln());
        assert_eq!(checked_log(0.0), None);
        assert_eq!(checked_log(-1.0), None);
        assert_eq!(checked_log(f64::NAN), None);
        assert_eq!(checked_log(f64::INFINITY), None);
    }

    #[test]
    // Purpose
    // -------
    // The vector form maps every entry or names the first bad index.
    //
    // Given
    // -----
    // - `[1, e, 0, -2]` and `[1, e]`.
    //
    // Expect
    // ------
    // - `Err(2)` for the first and `[0, 1]` for the second.
    fn checked_log_all_reports_first_offender() {
        let e = std::f64::consts::E;
        assert_eq!(checked_log_all(&[1.0, e, 0.0, -2.0]), Err(2));

        let logs = checked_log_all(&[1.0, e]).unwrap();
        assert_relative_eq!(logs[0], 0.0);
        assert_relative_eq!(logs[1], 1.0, epsilon = 1e-15);
    }
}
