//! Errors for growth models: build-time configuration checks, parameter
//! construction, θ shape checks, and wrapped fit/uncertainty failures.
//!
//! ## Conventions
//! - Indices are 0-based and refer to the offending field's own vector.
//! - Build-time checks run in a fixed order (noise intercept, reference
//!   lengths, reference ages, usable data, latent ages), so a configuration
//!   with several problems always reports the first one in that order.
//! - Once a model is built, evaluation only fails on a wrong-length θ;
//!   numerical trouble shows up as non-finite values, not as errors.
use crate::{inference::errors::InferenceError, optimization::errors::OptError};

/// Result alias for growth-model operations.
pub type GrowthResult<T> = Result<T, GrowthError>;

#[derive(Debug, Clone, PartialEq)]
pub enum GrowthError {
    // ---- Build-time configuration (checked in this order) ----
    /// `log_sigma_1` was not supplied.
    MissingNoiseIntercept,

    /// `log_sigma_2` was supplied without both `l_short` and `l_long`.
    MissingReferenceLengths,

    /// A Schnute-parametrized family was requested without `t1` and `t2`.
    MissingReferenceAges,

    /// Neither a complete otolith subset nor a complete tag subset is present.
    NoUsableData,

    /// Fields of one data subset disagree in length.
    SubsetLengthMismatch { subset: &'static str, field: &'static str, expected: usize, found: usize },

    /// An observation or reference value is NaN/±inf.
    NonFiniteData { field: &'static str, index: usize, value: f64 },

    /// Latent log-ages do not match the number of tagged individuals.
    LatentAgeLengthMismatch { expected: usize, found: usize },

    // ---- Parameter construction ----
    /// A natural-space scale parameter must be finite and > 0.
    NonPositiveParameter { name: &'static str, index: Option<usize>, value: f64 },

    /// A fixed-parameter name that is not part of the θ layout.
    UnknownParameter { name: String },

    /// Age grid bounds/step are unusable.
    InvalidAgeGrid { from: f64, to: f64, step: f64, reason: &'static str },

    // ---- θ shape ----
    /// θ length does not match the model layout.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// A θ entry is NaN/±inf where a finite start is required.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Fitting and uncertainty ----
    /// The optimizer failed.
    Optimization { source: OptError },

    /// Covariance or delta-method propagation failed.
    Inference { source: InferenceError },
}

impl std::error::Error for GrowthError {}

impl std::fmt::Display for GrowthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Build-time configuration ----
            GrowthError::MissingNoiseIntercept => {
                write!(f, "noise intercept parameter required")
            }
            GrowthError::MissingReferenceLengths => write!(
                f,
                "reference lengths required when length-varying noise is requested"
            ),
            GrowthError::MissingReferenceAges => write!(f, "reference ages required"),
            GrowthError::NoUsableData => write!(f, "no usable data"),
            GrowthError::SubsetLengthMismatch { subset, field, expected, found } => write!(
                f,
                "{subset} data length mismatch: '{field}' has {found} entries, expected {expected}"
            ),
            GrowthError::NonFiniteData { field, index, value } => {
                write!(f, "non-finite value {value} in '{field}' at index {index}")
            }
            GrowthError::LatentAgeLengthMismatch { expected, found } => write!(
                f,
                "latent age vector length mismatch: expected {expected}, found {found}"
            ),

            // ---- Parameter construction ----
            GrowthError::NonPositiveParameter { name, index: Some(i), value } => {
                write!(f, "parameter '{name}[{i}]' must be finite and positive, got {value}")
            }
            GrowthError::NonPositiveParameter { name, index: None, value } => {
                write!(f, "parameter '{name}' must be finite and positive, got {value}")
            }
            GrowthError::UnknownParameter { name } => {
                write!(f, "unknown parameter '{name}'")
            }
            GrowthError::InvalidAgeGrid { from, to, step, reason } => {
                write!(f, "invalid age grid [{from}, {to}] step {step}: {reason}")
            }

            // ---- θ shape ----
            GrowthError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "theta length mismatch: expected {expected}, actual {actual}")
            }
            GrowthError::InvalidThetaInput { index, value } => {
                write!(f, "invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Fitting and uncertainty ----
            GrowthError::Optimization { source } => write!(f, "optimization failed: {source}"),
            GrowthError::Inference { source } => write!(f, "uncertainty failed: {source}"),
        }
    }
}

impl From<OptError> for GrowthError {
    fn from(source: OptError) -> Self {
        GrowthError::Optimization { source }
    }
}

impl From<InferenceError> for GrowthError {
    fn from(source: InferenceError) -> Self {
        GrowthError::Inference { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The user-facing messages of the build-time configuration errors.
    // - Wrapping of optimizer errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Each configuration failure carries its identifying message.
    //
    // Given
    // -----
    // - The five ordered build-time errors.
    //
    // Expect
    // ------
    // - Their `Display` output matches the documented messages.
    fn build_errors_have_identifying_messages() {
        assert_eq!(
            GrowthError::MissingNoiseIntercept.to_string(),
            "noise intercept parameter required"
        );
        assert_eq!(
            GrowthError::MissingReferenceLengths.to_string(),
            "reference lengths required when length-varying noise is requested"
        );
        assert_eq!(GrowthError::MissingReferenceAges.to_string(), "reference ages required");
        assert_eq!(GrowthError::NoUsableData.to_string(), "no usable data");
        assert!(
            GrowthError::LatentAgeLengthMismatch { expected: 3, found: 2 }
                .to_string()
                .starts_with("latent age vector length mismatch")
        );
    }

    #[test]
    // Purpose
    // -------
    // Optimizer failures are wrapped without losing the source.
    //
    // Given
    // -----
    // - `OptError::MissingThetaHat`.
    //
    // Expect
    // ------
    // - `GrowthError::Optimization` holding it.
    fn optimizer_errors_are_wrapped() {
        let err: GrowthError = OptError::MissingThetaHat.into();

        assert_eq!(err, GrowthError::Optimization { source: OptError::MissingThetaHat });
    }
}
