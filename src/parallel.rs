//! Parallel batch evaluation using Rayon.
//!
//! Enable with the `parallel` feature flag. Results are identical to the
//! sequential functions; only the work distribution differs.
//!
//! # Usage
//!
//! ```ignore
//! use taguchi_loss::parallel::par_sums_of_squares;
//! use taguchi_loss::sums::{CharacteristicType, DecompositionOptions, ObservationSet};
//!
//! let batches: Vec<ObservationSet> = (1..=1000)
//!     .map(|i| ObservationSet::new(vec![f64::from(i), f64::from(i) + 1.0]))
//!     .collect();
//! let results = par_sums_of_squares(
//!     CharacteristicType::LargerIsBetter,
//!     &batches,
//!     &DecompositionOptions::default(),
//! );
//! assert_eq!(results.len(), 1000);
//! ```
//!
//! # Performance
//!
//! Parallel evaluation pays off for many observation sets or very dense
//! curves. A 50-point curve is faster sequentially.

use ndarray::Array1;
use rayon::prelude::*;

use crate::error::Result;
use crate::loss::{LossCurve, LossParameters, SamplingPolicy};
use crate::sums::{
    compute_sums_of_squares_with, CharacteristicType, DecompositionOptions, ObservationSet,
    SumsOfSquares,
};

/// Decompose many observation sets in parallel.
///
/// The result at index `i` belongs to `sets[i]`.
pub fn par_sums_of_squares(
    kind: CharacteristicType,
    sets: &[ObservationSet],
    options: &DecompositionOptions,
) -> Vec<Result<SumsOfSquares>> {
    sets.par_iter()
        .map(|set| compute_sums_of_squares_with(kind, set.values(), set.target(), options))
        .collect()
}

/// Sample a loss curve, evaluating the points in parallel.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`](crate::Error::InvalidParameters) if
/// the sampling policy is invalid.
pub fn par_loss_curve(params: &LossParameters, policy: SamplingPolicy) -> Result<LossCurve> {
    let (left, right) = params.window();
    let xs = policy.positions(left, right)?;
    let losses: Vec<f64> = xs
        .to_vec()
        .into_par_iter()
        .map(|x| params.loss(x))
        .collect();
    Ok(LossCurve::from_parts(xs, Array1::from(losses)))
}

/// Loss at each observed value, in parallel.
#[must_use]
pub fn par_losses(params: &LossParameters, observed: &[f64]) -> Vec<f64> {
    observed.par_iter().map(|&x| params.loss(x)).collect()
}
