//! numerical_stability: shared tolerances and positive-parameter transforms.
//!
//! Purpose
//! -------
//! Keep the small numeric constants and the log-space mapping in one place
//! so the growth models and the inference layer agree on them.
//!
//! Key behaviors
//! -------------
//! - [`checked_log`] / [`checked_log_all`] map natural-space positive values
//!   into `θ` and refuse values without a logarithm.
//! - [`EIGEN_EPS`] truncates the spectrum of the observed information when
//!   forming covariance pseudoinverses.
//! - [`GENERAL_TOL`] is the slack for grid-endpoint inclusion.
//!
//! Conventions
//! -----------
//! - The inverse mapping (`exp`) happens inside the differentiable model
//!   code, never here.
//! - No I/O, no logging, no global state.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{EIGEN_EPS, GENERAL_TOL, checked_log, checked_log_all};

pub mod prelude {
    pub use super::transformations::{EIGEN_EPS, checked_log, checked_log_all};
}
