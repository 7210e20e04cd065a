//! Exact first derivatives with forward-mode dual numbers.
//!
//! Every model function is generic over `T: DualNum<f64>`. Evaluating it on
//! `Dual64` inputs whose ε-part is 1 in coordinate `j` and 0 elsewhere yields
//! the partial derivative along `θ_j` in the ε-part of each output. One pass
//! per differentiated coordinate gives the gradient of a scalar function or
//! the Jacobian of a vector function.
//!
//! Only the coordinates listed in `dirs` are differentiated; the remaining
//! gradient entries and Jacobian columns are zero. Fixed parameters use this
//! to skip work.
use ndarray::{Array1, Array2};
use num_dual::Dual64;

/// `f(θ)` and `∂f/∂θ_j` for each `j` in `dirs`.
pub fn value_and_gradient<F>(f: F, theta: &[f64], dirs: &[usize]) -> (f64, Array1<f64>)
where
    F: Fn(&[Dual64]) -> Dual64,
{
    let mut grad = Array1::zeros(theta.len());
    let mut value = if dirs.is_empty() { f(&seed(theta, None)).re } else { f64::NAN };
    for &j in dirs {
        let out = f(&seed(theta, Some(j)));
        value = out.re;
        grad[j] = out.eps;
    }
    (value, grad)
}

/// `g(θ)` and the `m × n` Jacobian `∂g_i/∂θ_j`, columns outside `dirs` zero.
pub fn jacobian<F>(g: F, theta: &[f64], dirs: &[usize]) -> (Array1<f64>, Array2<f64>)
where
    F: Fn(&[Dual64]) -> Vec<Dual64>,
{
    let base = g(&seed(theta, None));
    let values: Array1<f64> = base.iter().map(|v| v.re).collect();
    let mut jac = Array2::zeros((values.len(), theta.len()));
    for &j in dirs {
        for (i, out) in g(&seed(theta, Some(j))).iter().enumerate() {
            jac[[i, j]] = out.eps;
        }
    }
    (values, jac)
}

// ---- Helper methods ----

fn seed(theta: &[f64], dir: Option<usize>) -> Vec<Dual64> {
    theta
        .iter()
        .enumerate()
        .map(|(i, &re)| Dual64::new(re, if Some(i) == dir { 1.0 } else { 0.0 }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_dual::DualNum;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Gradients of a transcendental scalar function.
    // - Restriction to a subset of directions.
    // - Jacobians of a vector function.
    // -------------------------------------------------------------------------

    fn scalar<T: DualNum<f64>>(x: &[T]) -> T {
        x[0].exp() * &x[1] + x[1].ln()
    }

    #[test]
    // Purpose
    // -------
    // The dual-number gradient equals the analytic one.
    //
    // Given
    // -----
    // - `f(a, b) = e^a b + ln b` at `(0.5, 2)`.
    //
    // Expect
    // ------
    // - `∇f = (e^a b, e^a + 1/b)` and `f` itself.
    fn gradient_matches_analytic() {
        let (a, b) = (0.5_f64, 2.0_f64);

        let (value, grad) = value_and_gradient(|x| scalar(x), &[a, b], &[0, 1]);

        assert_relative_eq!(value, a.exp() * b + b.ln(), epsilon = 1e-14);
        assert_relative_eq!(grad[0], a.exp() * b, epsilon = 1e-14);
        assert_relative_eq!(grad[1], a.exp() + 1.0 / b, epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Coordinates outside `dirs` are left at zero, and an empty `dirs`
    // still returns the value.
    //
    // Given
    // -----
    // - The same `f`, differentiated along `θ₁` only, then along nothing.
    //
    // Expect
    // ------
    // - `grad[0] == 0`, `grad[1]` analytic; then an all-zero gradient.
    fn gradient_respects_directions() {
        let theta = [0.5, 2.0];

        let (_, partial) = value_and_gradient(|x| scalar(x), &theta, &[1]);
        let (value, none) = value_and_gradient(|x| scalar(x), &theta, &[]);

        assert_eq!(partial[0], 0.0);
        assert_relative_eq!(partial[1], 0.5_f64.exp() + 0.5, epsilon = 1e-14);
        assert_relative_eq!(value, 0.5_f64.exp() * 2.0 + 2.0_f64.ln(), epsilon = 1e-14);
        assert!(none.iter().all(|&g| g == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // The Jacobian of a vector function has one row per output.
    //
    // Given
    // -----
    // - `g(a, b) = (a b, e^a)` at `(1, 3)`.
    //
    // Expect
    // ------
    // - `[[3, 1], [e, 0]]`.
    fn jacobian_of_vector_function() {
        let g = |x: &[Dual64]| vec![x[0].clone() * &x[1], x[0].exp()];

        let (values, jac) = jacobian(g, &[1.0, 3.0], &[0, 1]);

        assert_relative_eq!(values[0], 3.0);
        assert_relative_eq!(jac[[0, 0]], 3.0);
        assert_relative_eq!(jac[[0, 1]], 1.0);
        assert_relative_eq!(jac[[1, 0]], 1.0_f64.exp(), epsilon = 1e-14);
        assert_eq!(jac[[1, 1]], 0.0);
    }
}
