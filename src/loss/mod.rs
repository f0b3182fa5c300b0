//! Taguchi quadratic quality loss.
//!
//! The quality loss function models the economic loss of a unit whose
//! measured characteristic `x` deviates from the target `N`:
//!
//! ```text
//! L(x) = k · (x - N)²        k = C / Δ₀²        Δ₀ = LES - N
//! ```
//!
//! `C` is the cost incurred when the characteristic sits exactly at the
//! specification limit `LES`, which calibrates the proportionality constant `k`.
//!
//! ## Quick Start
//!
//! ```rust
//! use taguchi_loss::loss::LossParameters;
//!
//! // Target 10.0, specification limit 10.5, $20 lost at the limit.
//! let params = LossParameters::try_new(10.0, 10.5, 20.0)?;
//!
//! assert_eq!(params.loss(10.0), 0.0);
//! assert!((params.loss(10.5) - 20.0).abs() < 1e-9);
//! assert!((params.loss(10.25) - 5.0).abs() < 1e-9);
//! # Ok::<(), taguchi_loss::Error>(())
//! ```

mod curve;

pub use curve::{
    compute_loss_curve, LossCurve, SamplingPolicy, DEFAULT_SAMPLE_COUNT, DEFAULT_STEP,
    MAX_CURVE_SAMPLES,
};

use crate::error::{Error, Result};

/// Validated parameters of a quadratic loss function.
///
/// The specification limit may lie on either side of the target; only its
/// distance matters. Construction rejects non-finite values and a limit equal
/// to the target, so every accessor and [`loss`](Self::loss) is total.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLossParameters"))]
pub struct LossParameters {
    target: f64,
    spec_limit: f64,
    cost_at_limit: f64,
}

impl LossParameters {
    /// Create loss parameters from known-good values.
    ///
    /// # Panics
    ///
    /// Panics if any value is non-finite or `spec_limit == target`.
    /// Use [`try_new`](Self::try_new) for values coming from user input.
    #[must_use]
    pub fn new(target: f64, spec_limit: f64, cost_at_limit: f64) -> Self {
        Self::try_new(target, spec_limit, cost_at_limit)
            .expect("loss parameters must be finite with spec_limit != target")
    }

    /// Create loss parameters, returning an error if they are invalid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if any value is NaN or infinite,
    /// or if `spec_limit` equals `target` (the constant `k` would be undefined).
    pub fn try_new(target: f64, spec_limit: f64, cost_at_limit: f64) -> Result<Self> {
        for (name, value) in [
            ("target", target),
            ("spec_limit", spec_limit),
            ("cost_at_limit", cost_at_limit),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid_parameters(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }

        if spec_limit == target {
            return Err(Error::invalid_parameters(format!(
                "spec_limit must differ from target (both are {target})"
            )));
        }

        let delta0 = spec_limit - target;
        if !(cost_at_limit / (delta0 * delta0)).is_finite() {
            return Err(Error::invalid_parameters(format!(
                "spec_limit {spec_limit} is too close to target {target}"
            )));
        }

        Ok(Self {
            target,
            spec_limit,
            cost_at_limit,
        })
    }

    /// Target value `N`.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Specification limit `LES`.
    #[must_use]
    pub fn spec_limit(&self) -> f64 {
        self.spec_limit
    }

    /// Cost `C` incurred at the specification limit.
    #[must_use]
    pub fn cost_at_limit(&self) -> f64 {
        self.cost_at_limit
    }

    /// Signed tolerance `Δ₀ = LES - N`.
    #[must_use]
    pub fn delta0(&self) -> f64 {
        self.spec_limit - self.target
    }

    /// Proportionality constant `k = C / Δ₀²`.
    #[must_use]
    pub fn k(&self) -> f64 {
        let delta0 = self.delta0();
        self.cost_at_limit / (delta0 * delta0)
    }

    /// Symmetric window `[N - |Δ₀|, N + |Δ₀|]` used for curve sampling.
    ///
    /// This is also the natural range of an observed-value control.
    #[must_use]
    pub fn window(&self) -> (f64, f64) {
        let half_width = self.delta0().abs();
        (self.target - half_width, self.target + half_width)
    }

    /// Quality loss `k · (x - N)²` for an observed value.
    ///
    /// `x` is not required to lie inside [`window`](Self::window). Far from
    /// the target the result can overflow to infinity; use
    /// [`try_loss`](Self::try_loss) when `x` is unchecked input.
    #[must_use]
    pub fn loss(&self, x: f64) -> f64 {
        let deviation = x - self.target;
        self.k() * deviation * deviation
    }

    /// Quality loss for an observed value, rejecting non-finite input and
    /// results that overflow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `x` is not finite or the loss
    /// is not representable as a finite `f64`.
    pub fn try_loss(&self, x: f64) -> Result<f64> {
        if !x.is_finite() {
            return Err(Error::invalid_parameters(format!(
                "observed value must be a finite number, got {x}"
            )));
        }
        let loss = self.loss(x);
        if !loss.is_finite() {
            return Err(Error::invalid_parameters(format!(
                "loss at {x} overflows for target {} and limit {}",
                self.target, self.spec_limit
            )));
        }
        Ok(loss)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLossParameters {
    target: f64,
    spec_limit: f64,
    cost_at_limit: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLossParameters> for LossParameters {
    type Error = Error;

    fn try_from(raw: RawLossParameters) -> Result<Self> {
        Self::try_new(raw.target, raw.spec_limit, raw.cost_at_limit)
    }
}

/// Compute the quality loss for an observed value.
///
/// # Arguments
/// * `target` - Target value `N`
/// * `spec_limit` - Specification limit `LES`
/// * `cost_at_limit` - Cost `C` at the specification limit
/// * `x` - Observed value
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] when `spec_limit == target`, any
/// input is non-finite, or the loss overflows. NaN and infinity are never
/// returned as a loss.
///
/// # Example
///
/// ```rust
/// use taguchi_loss::loss::compute_loss;
///
/// let loss = compute_loss(10.0, 12.0, 100.0, 11.0).unwrap();
/// assert!((loss - 25.0).abs() < 1e-12);
///
/// assert!(compute_loss(10.0, 10.0, 100.0, 11.0).is_err());
/// ```
pub fn compute_loss(target: f64, spec_limit: f64, cost_at_limit: f64, x: f64) -> Result<f64> {
    LossParameters::try_new(target, spec_limit, cost_at_limit)?.try_loss(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_constants() {
        let params = LossParameters::new(10.0, 12.0, 100.0);
        assert_eq!(params.delta0(), 2.0);
        assert_eq!(params.k(), 25.0);
        assert_eq!(params.window(), (8.0, 12.0));
    }

    #[test]
    fn test_limit_below_target() {
        let params = LossParameters::new(10.0, 8.0, 100.0);
        assert_eq!(params.delta0(), -2.0);
        assert_eq!(params.k(), 25.0);
        assert_eq!(params.window(), (8.0, 12.0));
        assert!((params.loss(8.0) - 100.0).abs() < 1e-12);
        assert!((params.loss(12.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_loss_at_target_is_zero() {
        let params = LossParameters::new(-3.5, 1.25, 42.0);
        assert_eq!(params.loss(-3.5), 0.0);
    }

    #[test]
    fn test_loss_at_limit_equals_cost() {
        let params = LossParameters::new(0.3, 0.7, 15.75);
        assert!((params.loss(0.7) - 15.75).abs() < 1e-9);
    }

    #[test]
    fn test_loss_outside_window() {
        let params = LossParameters::new(10.0, 12.0, 100.0);
        // Twice the tolerance costs four times as much.
        assert!((params.loss(14.0) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_equal_limit() {
        let err = LossParameters::try_new(5.0, 5.0, 10.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters { .. }));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(LossParameters::try_new(f64::NAN, 1.0, 1.0).is_err());
        assert!(LossParameters::try_new(0.0, f64::INFINITY, 1.0).is_err());
        assert!(LossParameters::try_new(0.0, 1.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_rejects_overflowing_loss() {
        let err = compute_loss(0.0, 1.0, 1.0, 1e200).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters { .. }), "{err}");

        let params = LossParameters::new(0.0, 1.0, 1.0);
        assert!(params.loss(1e200).is_infinite());
        assert!(params.try_loss(1e200).is_err());
        assert!(params.try_loss(f64::NAN).is_err());
        assert!(params.try_loss(1e100).unwrap().is_finite());
    }

    #[test]
    fn test_rejects_degenerate_k() {
        // Δ₀² underflows to zero even though the limit differs from the target.
        assert!(LossParameters::try_new(0.0, 1e-200, 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "spec_limit != target")]
    fn test_new_panics_on_invalid() {
        let _ = LossParameters::new(1.0, 1.0, 1.0);
    }

    #[test]
    fn test_compute_loss() {
        assert_eq!(compute_loss(10.0, 12.0, 100.0, 10.0), Ok(0.0));
        assert!((compute_loss(10.0, 12.0, 100.0, 11.0).unwrap() - 25.0).abs() < 1e-12);
        assert!(compute_loss(10.0, 10.0, 100.0, 11.0).is_err());
        assert!(compute_loss(10.0, 12.0, 100.0, f64::NAN).is_err());
    }

    #[test]
    fn test_idempotent() {
        let a = compute_loss(9.81, 10.4, 33.3, 10.123).unwrap();
        let b = compute_loss(9.81, 10.4, 33.3, 10.123).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> impl Strategy<Value = LossParameters> {
        (-1e3_f64..1e3, 1e-3_f64..1e3, any::<bool>(), 0.0_f64..1e4).prop_map(
            |(target, width, below, cost)| {
                let spec_limit = if below { target - width } else { target + width };
                LossParameters::new(target, spec_limit, cost)
            },
        )
    }

    proptest! {
        #[test]
        fn loss_is_zero_at_target(p in params()) {
            prop_assert_eq!(p.loss(p.target()), 0.0);
        }

        #[test]
        fn loss_at_limit_is_cost(p in params()) {
            let loss = p.loss(p.spec_limit());
            let tolerance = 1e-6 * p.cost_at_limit().max(1.0);
            prop_assert!((loss - p.cost_at_limit()).abs() <= tolerance,
                "loss {} vs cost {}", loss, p.cost_at_limit());
        }

        #[test]
        fn loss_is_symmetric(p in params(), d in -1e3_f64..1e3) {
            let left = p.loss(p.target() - d);
            let right = p.loss(p.target() + d);
            let tolerance = 1e-6 * left.abs().max(1.0);
            prop_assert!((left - right).abs() <= tolerance, "{} vs {}", left, right);
        }

        #[test]
        fn loss_is_non_negative_for_non_negative_cost(p in params(), x in -1e4_f64..1e4) {
            prop_assert!(p.loss(x) >= 0.0);
        }
    }
}
