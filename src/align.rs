//! Series alignment: reconcile trajectories of different lengths or scales
//!
//! Two explicit policies, never combined silently:
//!
//! - **Pad-to-match** extends the shorter trajectory by repeating its final
//!   value, modeling "held at last achieved value after termination".
//! - **Truncate-and-rescale** slices a baseline sampled at a different
//!   resolution to the target length and divides it by a caller-supplied
//!   scale constant.
//!
//! A constant bias may be subtracted from a series to zero it against a known
//! baseline value; do that *before* aligning, since it changes the padded
//! value too.

use crate::error::{Error, Result};

/// The policy used to bring two series to equal length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignPolicy {
    /// The shorter series was extended by repeating its final value.
    PadWithLast,
    /// The baseline was sliced to the target length and divided by `scale`.
    TruncateRescale {
        /// Scale constant the baseline was divided by.
        scale: f64,
    },
}

/// Two equal-length series ready for point-wise comparison, plus the policy
/// that produced them. Transient; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeriesPair {
    /// First series, usually the strategy under evaluation.
    pub a: Vec<f64>,
    /// Second series, usually the baseline.
    pub b: Vec<f64>,
    /// Policy used for the alignment.
    pub policy: AlignPolicy,
}

/// Extend a series to `target_len` by repeating its final value.
///
/// A series already at or beyond the target length is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::EmptySeries`] when an empty series would need padding:
/// there is no last value to repeat.
pub fn pad_with_last(series: &[f64], target_len: usize) -> Result<Vec<f64>> {
    if series.len() >= target_len {
        return Ok(series.to_vec());
    }
    let Some(&last) = series.last() else {
        return Err(Error::EmptySeries);
    };
    let mut padded = series.to_vec();
    padded.resize(target_len, last);
    Ok(padded)
}

/// Pad the shorter of two series so both have equal length.
///
/// # Errors
///
/// Returns [`Error::EmptySeries`] if one series is empty while the other is
/// not.
pub fn pad_to_match(a: &[f64], b: &[f64]) -> Result<AlignedSeriesPair> {
    let target = a.len().max(b.len());
    Ok(AlignedSeriesPair {
        a: pad_with_last(a, target)?,
        b: pad_with_last(b, target)?,
        policy: AlignPolicy::PadWithLast,
    })
}

/// Slice a baseline to `target_len` elements and divide each by `scale`.
///
/// # Errors
///
/// Returns [`Error::ZeroScale`] when the scale constant is zero.
pub fn truncate_and_rescale(baseline: &[f64], target_len: usize, scale: f64) -> Result<Vec<f64>> {
    if scale == 0.0 {
        return Err(Error::ZeroScale);
    }
    Ok(baseline
        .iter()
        .take(target_len)
        .map(|value| value / scale)
        .collect())
}

/// Align a baseline of different resolution against a target series.
///
/// The target is left untouched; the baseline is truncated to the target's
/// length and rescaled.
///
/// # Errors
///
/// Returns [`Error::ZeroScale`] when the scale constant is zero.
pub fn align_to_baseline(a: &[f64], baseline: &[f64], scale: f64) -> Result<AlignedSeriesPair> {
    Ok(AlignedSeriesPair {
        a: a.to_vec(),
        b: truncate_and_rescale(baseline, a.len(), scale)?,
        policy: AlignPolicy::TruncateRescale { scale },
    })
}

/// Subtract a constant bias from every element, zeroing a trajectory against
/// a known baseline value.
#[must_use]
pub fn subtract_bias(series: &[f64], bias: f64) -> Vec<f64> {
    series.iter().map(|value| value - bias).collect()
}

/// Normalize a trajectory by its final value and scale it to a ceiling, so
/// that the series ends exactly at `ceiling`.
///
/// # Errors
///
/// Returns [`Error::EmptySeries`] for an empty series and
/// [`Error::ZeroScale`] when the final value is zero.
pub fn rescale_to_ceiling(series: &[f64], ceiling: f64) -> Result<Vec<f64>> {
    let Some(&last) = series.last() else {
        return Err(Error::EmptySeries);
    };
    if last == 0.0 {
        return Err(Error::ZeroScale);
    }
    Ok(series.iter().map(|value| value / last * ceiling).collect())
}
