//! Taguchi sum-of-squares decomposition.
//!
//! The total sum of squares about the ideal value of a characteristic splits
//! into a variation part (SSe, spread about the sample mean) and a bias part
//! (SSm, offset of the mean from the ideal):
//!
//! | Characteristic | SST | SSe | SSm |
//! |----------------|-----|-----|-----|
//! | Nominal-is-best | Σ(y - y₀)² | Σ(y - ȳ)² | (Σ(y - y₀))² / n |
//! | Smaller-is-better | Σy² | Σ(y - ȳ)² | (Σy)² / n |
//! | Larger-is-better | Σ(1/y)² | Σ(1/y - mean(1/y))² | (Σ1/y)² / n |
//!
//! ## Quick Start
//!
//! ```rust
//! use taguchi_loss::sums::{compute_sums_of_squares, CharacteristicType};
//!
//! let ss = compute_sums_of_squares(
//!     CharacteristicType::SmallerIsBetter,
//!     &[0.1, 0.05, 0.15, 0.08],
//!     None,
//! )?;
//!
//! assert!((ss.sst - 0.0414).abs() < 1e-9);
//! assert!((ss.sse - 0.0053).abs() < 1e-9);
//! assert!((ss.ssm - 0.0361).abs() < 1e-9);
//! # Ok::<(), taguchi_loss::Error>(())
//! ```
//!
//! ## Zero observations under larger-is-better
//!
//! A zero observation has no reciprocal and is skipped by every sum. The mean
//! of the reciprocals used for SSe is always taken over the nonzero count, so
//! zeros never shift SSe. This departs from the classic page, which divides
//! that mean by the total count. By default SSm still divides by the total
//! `n`, so SST ≠ SSe + SSm once a zero is present.
//! [`DecompositionOptions::corrected`] divides SSm by the nonzero count too.

mod types;

pub use types::{
    CharacteristicType, DecompositionOptions, ObservationSet, ReciprocalDivisor, SumsOfSquares,
};

use crate::error::{Error, Result};

/// Compute the sum-of-squares decomposition with default options.
///
/// # Arguments
/// * `kind` - Characteristic type of the observations
/// * `data` - Observations `yᵢ`
/// * `target` - Target `y₀`, required for nominal-is-best and ignored otherwise
///
/// # Returns
/// * `SumsOfSquares` with SST, SSe and SSm; all zero for empty `data`
///
/// # Errors
/// * [`Error::MissingTarget`] for nominal-is-best without a target
/// * [`Error::InvalidParameters`] if an observation or the target is NaN or infinite
pub fn compute_sums_of_squares(
    kind: CharacteristicType,
    data: &[f64],
    target: Option<f64>,
) -> Result<SumsOfSquares> {
    compute_sums_of_squares_with(kind, data, target, &DecompositionOptions::default())
}

/// Compute the sum-of-squares decomposition with explicit options.
///
/// # Errors
///
/// Same as [`compute_sums_of_squares`].
pub fn compute_sums_of_squares_with(
    kind: CharacteristicType,
    data: &[f64],
    target: Option<f64>,
    options: &DecompositionOptions,
) -> Result<SumsOfSquares> {
    if data.is_empty() {
        return Ok(SumsOfSquares::zero());
    }

    if let Some((index, value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(Error::invalid_parameters(format!(
            "observation {index} must be a finite number, got {value}"
        )));
    }

    let result = match kind {
        CharacteristicType::NominalIsBest => {
            let target = target.ok_or(Error::MissingTarget)?;
            if !target.is_finite() {
                return Err(Error::invalid_parameters(format!(
                    "target must be a finite number, got {target}"
                )));
            }
            nominal_is_best(data, target)
        }
        CharacteristicType::SmallerIsBetter => smaller_is_better(data),
        CharacteristicType::LargerIsBetter => larger_is_better(data, options.reciprocal_divisor),
    };

    tracing::debug!(%kind, n = data.len(), %result, "decomposed sum of squares");
    Ok(result)
}

/// Decompose for a selector string such as `"nominal"`.
///
/// # Errors
///
/// [`Error::UnknownCharacteristicType`] if the selector is not recognized,
/// otherwise the errors of [`compute_sums_of_squares`].
pub fn compute_sums_of_squares_for(
    selector: &str,
    data: &[f64],
    target: Option<f64>,
) -> Result<SumsOfSquares> {
    let kind: CharacteristicType = selector.parse()?;
    compute_sums_of_squares(kind, data, target)
}

#[allow(clippy::cast_precision_loss)]
fn nominal_is_best(data: &[f64], target: f64) -> SumsOfSquares {
    let n = data.len();
    let sst: f64 = data.iter().map(|y| (y - target).powi(2)).sum();
    let sum_deviation: f64 = data.iter().map(|y| y - target).sum();
    let mean = data.iter().sum::<f64>() / n as f64;
    let sse: f64 = data.iter().map(|y| (y - mean).powi(2)).sum();
    let ssm = sum_deviation.powi(2) / n as f64;

    SumsOfSquares { sst, sse, ssm, n }
}

#[allow(clippy::cast_precision_loss)]
fn smaller_is_better(data: &[f64]) -> SumsOfSquares {
    let n = data.len();
    let sst: f64 = data.iter().map(|y| y * y).sum();
    let sum: f64 = data.iter().sum();
    let mean = sum / n as f64;
    let sse: f64 = data.iter().map(|y| (y - mean).powi(2)).sum();
    let ssm = sum.powi(2) / n as f64;

    SumsOfSquares { sst, sse, ssm, n }
}

#[allow(clippy::cast_precision_loss)]
fn larger_is_better(data: &[f64], divisor: ReciprocalDivisor) -> SumsOfSquares {
    let reciprocals: Vec<f64> = data
        .iter()
        .filter(|&&y| y != 0.0)
        .map(|y| 1.0 / y)
        .collect();

    let skipped = data.len() - reciprocals.len();
    if skipped > 0 {
        tracing::trace!(skipped, "skipped zero observations without a reciprocal");
    }

    let n = match divisor {
        ReciprocalDivisor::TotalCount => data.len(),
        ReciprocalDivisor::NonZeroCount => reciprocals.len(),
    };

    if reciprocals.is_empty() {
        return SumsOfSquares {
            n,
            ..SumsOfSquares::zero()
        };
    }

    let sst: f64 = reciprocals.iter().map(|r| r * r).sum();
    let sum: f64 = reciprocals.iter().sum();
    let mean = sum / reciprocals.len() as f64;
    let sse: f64 = reciprocals.iter().map(|r| (r - mean).powi(2)).sum();
    let ssm = sum.powi(2) / n as f64;

    SumsOfSquares { sst, sse, ssm, n }
}
