//! Entry point for minimizing a bound [`NegLogLikelihood`].
//!
//! Picks the L-BFGS variant named by `opts.line_searcher`, wraps the
//! objective in an [`ArgMinAdapter`] and hands both to
//! [`run_lbfgs`](super::run::run_lbfgs).
use crate::optimization::{
    errors::OptResult,
    nll_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, MLEOptions, NegLogLikelihood},
        validation::validate_value,
    },
};

/// Minimize `nll(θ)` starting from `theta0`.
///
/// `f.check(&theta0)` runs first, so a wrong-length or non-finite start is
/// rejected before any solver is built. `nll(θ₀)` must be finite; it sets
/// the penalty charged for non-finite trial points during the run.
///
/// # Errors
/// - Errors from `f.check`.
/// - [`OptError::NonFiniteCost`](crate::optimization::errors::OptError::NonFiniteCost)
///   when `nll(θ₀)` is not finite.
/// - [`OptError::SolverExit`](crate::optimization::errors::OptError::SolverExit)
///   when the solver stops on an internal failure.
/// - Solver construction errors (invalid tolerances).
/// - Runtime errors from argmin and outcome validation.
///
/// # Example
/// ```no_run
/// use fishgrowth::optimization::errors::OptResult;
/// use fishgrowth::optimization::nll_optimizer::{minimize, MLEOptions, NegLogLikelihood, Theta};
/// use ndarray::array;
///
/// struct Bowl;
/// impl NegLogLikelihood for Bowl {
///     fn value(&self, theta: &Theta) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Theta) -> OptResult<()> {
///         Ok(())
///     }
///     fn grad(&self, theta: &Theta) -> OptResult<Theta> {
///         Ok(theta * 2.0)
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.1, -0.2, 0.3], &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), fishgrowth::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: NegLogLikelihood>(
    f: &F, theta0: Theta, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0)?;
    let start_cost = f.value(&theta0)?;
    validate_value(start_cost)?;
    let problem = ArgMinAdapter::new(f).with_penalty_from(start_cost);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
