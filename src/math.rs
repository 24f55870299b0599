//! Numeric primitives shared by the speaker and listener models.
//!
//! Both primitives operate lane-wise along an explicit [`Axis`]: every
//! one-dimensional lane running along that axis is mapped onto the
//! probability simplex independently. The axis is always spelled out at the
//! call site; there are no implicit defaults.

use crate::{ModelError, Result};
use ndarray::{Array, Axis, Dimension};

/// Numerically stable softmax along `axis`.
///
/// The per-lane maximum is subtracted before exponentiating so that large
/// logits cannot overflow. Entries of `-inf` map to probability zero, which
/// is how semantically impossible pairs are silenced downstream. A lane
/// consisting entirely of `-inf` yields NaN; model entry points catch that
/// through [`ensure_finite`].
pub fn softmax<D>(logits: &Array<f64, D>, axis: Axis) -> Array<f64, D>
where
    D: Dimension,
{
    let mut out = logits.to_owned();
    for mut lane in out.lanes_mut(axis) {
        let max = lane.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        lane.mapv_inplace(|v| (v - max).exp());
        let total = lane.sum();
        lane.mapv_inplace(|v| v / total);
    }
    out
}

/// Divide by the sum along `axis`.
///
/// Callers must guarantee positive lane sums; a zero-sum lane divides to
/// NaN, which the model entry points reject via [`ensure_finite`].
pub fn normalize<D>(weights: &Array<f64, D>, axis: Axis) -> Array<f64, D>
where
    D: Dimension,
{
    let mut out = weights.to_owned();
    for mut lane in out.lanes_mut(axis) {
        let total = lane.sum();
        lane.mapv_inplace(|v| v / total);
    }
    out
}

/// Rejects arrays holding NaN or infinite entries.
///
/// Guards the crate boundary: any numerical degeneracy that slipped past
/// configuration validation surfaces here as an error instead of a silent
/// NaN matrix.
pub fn ensure_finite<D>(label: &'static str, values: &Array<f64, D>) -> Result<()>
where
    D: Dimension,
{
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(ModelError::NonFiniteValue { label, value }),
        None => Ok(()),
    }
}
