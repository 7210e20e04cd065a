//! Build-time validation of a parameter set against its data.
//!
//! Purpose
//! -------
//! Decide once, before any evaluation, whether a `(GrowthParams,
//! GrowthData)` pair describes a usable model, and derive the profiles and θ
//! layout the model will branch on.
//!
//! Key behaviors
//! -------------
//! [`validate_inputs`] checks, in this order, and stops at the first failure:
//! 1. `log_sigma_1` present, else `MissingNoiseIntercept`.
//! 2. `log_sigma_2` present ⇒ `l_short` and `l_long` present, else
//!    `MissingReferenceLengths`.
//! 3. Schnute family ⇒ `t1` and `t2` present, else `MissingReferenceAges`.
//! 4. At least one complete subset, else `NoUsableData`. A subset with any
//!    field missing, or with every field empty, counts as absent. Complete
//!    subsets are checked for unequal field lengths (`SubsetLengthMismatch`)
//!    and non-finite observations (`NonFiniteData`).
//! 5. Latent log-ages, when tags are present, match the tag count; latent
//!    ages without tags must be empty. Else `LatentAgeLengthMismatch`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Reference values are only checked for finiteness when their feature
//!   uses them. `l_long == l_short` and `t1 == t2` pass: those singular
//!   configurations yield non-finite values at evaluation time instead.
use crate::growth::{
    core::{
        data::{GrowthData, OtolithData, TagData},
        params::{GrowthParams, ParamLayout},
        profile::{DataProfile, NoiseProfile},
    },
    errors::{GrowthError, GrowthResult},
};
use ndarray::Array1;

/// Everything a model needs after a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInputs {
    pub otoliths: Option<OtolithData>,
    pub tags: Option<TagData>,
    pub data_profile: DataProfile,
    pub noise_profile: NoiseProfile,
    pub reference_ages: Option<(f64, f64)>,
    pub layout: ParamLayout,
}

/// Validate `params` against `data`; see the module docs for the check order.
pub fn validate_inputs(params: &GrowthParams, data: GrowthData) -> GrowthResult<ValidatedInputs> {
    let family = params.family();

    if params.noise.log_sigma_1.is_none() {
        return Err(GrowthError::MissingNoiseIntercept);
    }

    let noise_profile = match params.noise.log_sigma_2 {
        None => NoiseProfile::Constant,
        Some(_) => match (data.l_short, data.l_long) {
            (Some(l_short), Some(l_long)) => {
                finite_scalar("l_short", l_short)?;
                finite_scalar("l_long", l_long)?;
                NoiseProfile::LengthVarying { l_short, l_long }
            }
            _ => return Err(GrowthError::MissingReferenceLengths),
        },
    };

    let reference_ages = if family.uses_reference_ages() {
        match (data.t1, data.t2) {
            (Some(t1), Some(t2)) => {
                finite_scalar("t1", t1)?;
                finite_scalar("t2", t2)?;
                Some((t1, t2))
            }
            _ => return Err(GrowthError::MissingReferenceAges),
        }
    } else {
        None
    };

    let has_otoliths = check_subset(
        "otolith",
        &[("age_oto", data.age_oto.as_ref()), ("len_oto", data.len_oto.as_ref())],
    )?;
    let has_tags = check_subset(
        "tag",
        &[
            ("len_release", data.len_release.as_ref()),
            ("len_recapture", data.len_recapture.as_ref()),
            ("liberty", data.liberty.as_ref()),
        ],
    )?;
    let data_profile =
        DataProfile::from_presence(has_otoliths, has_tags).ok_or(GrowthError::NoUsableData)?;

    let GrowthData { age_oto, len_oto, len_release, len_recapture, liberty, .. } = data;
    let otoliths = match (has_otoliths, age_oto, len_oto) {
        (true, Some(age), Some(len)) => Some(OtolithData { age, len }),
        _ => None,
    };
    let tags = match (has_tags, len_release, len_recapture, liberty) {
        (true, Some(len_release), Some(len_recapture), Some(liberty)) => {
            Some(TagData { len_release, len_recapture, liberty })
        }
        _ => None,
    };

    let n_tags = tags.as_ref().map_or(0, TagData::len);
    let n_ages = params.log_age.as_ref().map_or(0, Array1::len);
    if n_ages != n_tags {
        return Err(GrowthError::LatentAgeLengthMismatch { expected: n_tags, found: n_ages });
    }

    let layout = ParamLayout::new(family, params.noise.log_sigma_2.is_some(), n_tags);
    Ok(ValidatedInputs { otoliths, tags, data_profile, noise_profile, reference_ages, layout })
}

// ---- Helper methods ----

/// `Ok(true)` for a complete, consistent subset; `Ok(false)` when absent
/// (a field missing, or every field empty).
fn check_subset(
    subset: &'static str, fields: &[(&'static str, Option<&Array1<f64>>)],
) -> GrowthResult<bool> {
    let supplied: Vec<(&'static str, &Array1<f64>)> =
        fields.iter().filter_map(|&(name, field)| field.map(|a| (name, a))).collect();
    if supplied.len() < fields.len() || supplied.iter().all(|(_, a)| a.is_empty()) {
        return Ok(false);
    }
    let expected = supplied[0].1.len();
    for &(field, values) in &supplied {
        if values.len() != expected {
            return Err(GrowthError::SubsetLengthMismatch {
                subset,
                field,
                expected,
                found: values.len(),
            });
        }
    }
    for &(field, values) in &supplied {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(GrowthError::NonFiniteData { field, index, value: values[index] });
        }
    }
    Ok(true)
}

fn finite_scalar(field: &'static str, value: f64) -> GrowthResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GrowthError::NonFiniteData { field, index: 0, value })
    }
}
