//! Shared executor wiring: run an argmin L-BFGS solver on an
//! [`ArgMinAdapter`] and turn the final state into an [`OptimOutcome`].
use crate::optimization::{
    errors::{OptError, OptResult},
    nll_optimizer::{
        MLEOptions, NegLogLikelihood, OptimOutcome,
        adapter::ArgMinAdapter,
        types::{Cost, Grad, Theta},
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, Solver, State, TerminationReason, TerminationStatus};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Execute `solver` from `theta0` and collect the outcome.
///
/// - `opts.tols.max_iter`, when set, caps the iteration count.
/// - With the `obs_slog` feature and `opts.verbose`, the initial
///   `nll(θ₀)` and `‖∇nll(θ₀)‖` are printed once and a terminal slog
///   observer logs every iteration.
///
/// The reported value is the best cost seen, i.e. `nll(θ̂)`.
///
/// # Errors
/// - Runtime errors from argmin (objective errors), converted through
///   `From<argmin::core::Error>`.
/// - [`OptError::SolverExit`] when L-BFGS stops on an internal failure,
///   typically a line search that could not produce a step.
/// - Outcome validation errors (missing or non-finite `θ̂`, non-finite cost).
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: NegLogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), (), (), Cost>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver).configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut state = optimizer.run()?.state().clone();
    let iterations = state.get_iter();
    let fn_evals = state.get_func_counts().clone();
    let termination = state.get_termination_status().clone();
    if let TerminationStatus::Terminated(TerminationReason::SolverExit(reason)) = &termination {
        return Err(OptError::SolverExit { reason: reason.clone() });
    }
    let grad = state.take_gradient();
    OptimOutcome::new(
        state.take_best_param(),
        state.get_best_cost(),
        termination,
        iterations,
        fn_evals,
        grad,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F: NegLogLikelihood>(
    theta0: &Theta, problem: &ArgMinAdapter<'_, F>,
) -> OptResult<()> {
    let nll0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: nll(theta0) = {:.6}{}",
        nll0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
