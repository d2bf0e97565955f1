//! Comparing a device result against the serial reference.

use crate::{DeviceError, Result};

/// Largest absolute difference a pixel may have from the reference.
pub const CORRECTNESS_THRESHOLD: f64 = 0.0002;

/// The outcome of [`compare`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Passed {
        max_err: f64,
    },
    /// The first pixel off by more than the threshold.
    Failed {
        index: usize,
        got: f32,
        expected: f32,
        max_err: f64,
    },
}

impl Verdict {
    #[inline]
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Passed { .. })
    }

    /// Largest error seen up to the end of the scan.
    #[inline]
    pub fn max_err(&self) -> f64 {
        match self {
            Verdict::Passed { max_err } | Verdict::Failed { max_err, .. } => *max_err,
        }
    }
}

impl core::fmt::Display for Verdict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Verdict::Passed { max_err } => {
                write!(f, "Passed! Max error:{}", general(*max_err))
            }
            Verdict::Failed {
                index,
                got,
                expected,
                ..
            } => write!(
                f,
                "Correctness test failed on {index}th value.\nWas {}, should be {}",
                general(*got as f64),
                general(*expected as f64)
            ),
        }
    }
}

/// Formats `value` like C's `%g`: six significant digits, trailing zeros removed,
/// scientific notation below `1e-4` and from `1e6` on.
pub fn general(value: f64) -> String {
    if value == 0. || !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{value:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..6).contains(&exp) {
        let decimals = (5 - exp) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    }
}

fn trim_fraction(num: &str) -> &str {
    if num.contains('.') {
        num.trim_end_matches('0').trim_end_matches('.')
    } else {
        num
    }
}

/// Scans `result` against `gold` and stops at the first pixel whose error exceeds `threshold`.
/// A NaN in either input fails at that pixel.
///
/// # Example
/// ```
/// use noise_bench::check::{compare, Verdict, CORRECTNESS_THRESHOLD};
///
/// let verdict = compare(&[0.5, 0.25], &[0.5, 0.25], CORRECTNESS_THRESHOLD).unwrap();
/// assert_eq!(verdict, Verdict::Passed { max_err: 0. });
/// ```
pub fn compare(result: &[f32], gold: &[f32], threshold: f64) -> Result<Verdict> {
    if result.len() != gold.len() {
        return Err(DeviceError::LengthMismatch.into());
    }

    let mut max_err = 0f64;
    for (index, (&got, &expected)) in result.iter().zip(gold).enumerate() {
        let err = (got as f64 - expected as f64).abs();
        if err.is_nan() || err > threshold {
            tracing::debug!(index, got, expected, "pixel exceeds the threshold");
            return Ok(Verdict::Failed {
                index,
                got,
                expected,
                max_err: if err.is_nan() { max_err } else { max_err.max(err) },
            });
        }
        max_err = max_err.max(err);
    }
    Ok(Verdict::Passed { max_err })
}
