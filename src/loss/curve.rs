//! Loss curve sampling over the symmetric tolerance window.

use ndarray::Array1;

use super::LossParameters;
use crate::error::{Error, Result};

/// Number of samples used by the default [`SamplingPolicy`].
pub const DEFAULT_SAMPLE_COUNT: usize = 50;

/// Absolute step of the classic explorer page.
pub const DEFAULT_STEP: f64 = 0.1;

/// Upper bound on the number of samples a single curve may contain.
pub const MAX_CURVE_SAMPLES: usize = 1_000_000;

/// Relative slack when deciding whether the right bound lies on a step grid.
const GRID_EPSILON: f64 = 1e-9;

/// How the sampling window is divided into curve points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamplingPolicy {
    /// Absolute step between consecutive points.
    ///
    /// Resolution depends on the magnitude of the tolerance: a narrow window
    /// yields few points, a wide one yields many.
    FixedStep(f64),
    /// Fixed number of evenly spaced points including both window bounds.
    FixedCount(usize),
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::FixedCount(DEFAULT_SAMPLE_COUNT)
    }
}

impl SamplingPolicy {
    /// Check that the policy can produce a curve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for a step that is not finite and
    /// positive, or a count outside `2..=MAX_CURVE_SAMPLES`.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::FixedStep(step) => {
                if !step.is_finite() || step <= 0.0 {
                    return Err(Error::invalid_parameters(format!(
                        "sampling step must be finite and positive, got {step}"
                    )));
                }
            }
            Self::FixedCount(count) => {
                if !(2..=MAX_CURVE_SAMPLES).contains(&count) {
                    return Err(Error::invalid_parameters(format!(
                        "sample count must be in 2..={MAX_CURVE_SAMPLES}, got {count}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Sample positions covering `[left, right]` in strictly increasing order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if the policy is invalid, the
    /// window is empty or inverted, the step would exceed
    /// [`MAX_CURVE_SAMPLES`], or the window is too narrow for its magnitude
    /// to hold distinct sample positions.
    pub fn positions(&self, left: f64, right: f64) -> Result<Array1<f64>> {
        let xs = self.raw_positions(left, right)?;
        ensure_increasing(&xs).map_err(|_| {
            Error::invalid_parameters(format!(
                "sampling window [{left}, {right}] is too narrow for {self:?}"
            ))
        })?;
        Ok(xs)
    }

    fn raw_positions(&self, left: f64, right: f64) -> Result<Array1<f64>> {
        self.validate()?;
        if !(left.is_finite() && right.is_finite()) || left >= right {
            return Err(Error::invalid_parameters(format!(
                "sampling window [{left}, {right}] is empty"
            )));
        }

        match *self {
            Self::FixedCount(count) => {
                let mut xs = Array1::linspace(left, right, count);
                // linspace accumulates rounding in the last point
                xs[count - 1] = right;
                Ok(xs)
            }
            Self::FixedStep(step) => {
                let span = (right - left) / step;
                let intervals = (span + GRID_EPSILON).floor();
                if intervals >= MAX_CURVE_SAMPLES as f64 {
                    return Err(Error::invalid_parameters(format!(
                        "step {step} yields more than {MAX_CURVE_SAMPLES} samples"
                    )));
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let count = intervals as usize + 1;
                let on_grid = (span - intervals).abs() <= GRID_EPSILON;

                #[allow(clippy::cast_precision_loss)]
                let mut xs = Array1::from_shape_fn(count, |i| left + i as f64 * step);
                if on_grid {
                    xs[count - 1] = right;
                }
                Ok(xs)
            }
        }
    }
}

/// Check that positions strictly increase.
fn ensure_increasing(xs: &Array1<f64>) -> Result<()> {
    match xs
        .iter()
        .zip(xs.iter().skip(1))
        .position(|(a, b)| a >= b || a.is_nan() || b.is_nan())
    {
        Some(i) => Err(Error::invalid_parameters(format!(
            "sample positions must strictly increase: x[{i}] = {} >= x[{}] = {}",
            xs[i],
            i + 1,
            xs[i + 1]
        ))),
        None => Ok(()),
    }
}

/// Sampled quality loss curve.
///
/// `xs` strictly increases from the left window bound; `losses[i]` is the loss
/// at `xs[i]`. A curve is recomputed from its parameters on every call and
/// never cached.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLossCurve"))]
pub struct LossCurve {
    xs: Array1<f64>,
    losses: Array1<f64>,
}

impl LossCurve {
    /// Sample the loss function of `params` with the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if the policy is unusable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use taguchi_loss::loss::{LossCurve, LossParameters, SamplingPolicy};
    ///
    /// let params = LossParameters::new(10.0, 11.0, 50.0);
    /// let curve = LossCurve::sample(&params, SamplingPolicy::FixedCount(5))?;
    ///
    /// assert_eq!(curve.xs().to_vec(), vec![9.0, 9.5, 10.0, 10.5, 11.0]);
    /// assert_eq!(curve.losses()[2], 0.0);
    /// # Ok::<(), taguchi_loss::Error>(())
    /// ```
    pub fn sample(params: &LossParameters, policy: SamplingPolicy) -> Result<Self> {
        let (left, right) = params.window();
        let xs = policy.positions(left, right)?;
        let losses = xs.mapv(|x| params.loss(x));
        Ok(Self { xs, losses })
    }

    pub(crate) fn from_parts(xs: Array1<f64>, losses: Array1<f64>) -> Self {
        debug_assert_eq!(xs.len(), losses.len());
        Self { xs, losses }
    }

    /// Build a curve from precomputed positions and losses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if the arrays differ in length or
    /// the positions do not strictly increase.
    pub fn try_from_parts(xs: Array1<f64>, losses: Array1<f64>) -> Result<Self> {
        if xs.len() != losses.len() {
            return Err(Error::invalid_parameters(format!(
                "curve has {} positions but {} losses",
                xs.len(),
                losses.len()
            )));
        }
        ensure_increasing(&xs)?;
        Ok(Self { xs, losses })
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sample positions.
    #[must_use]
    pub fn xs(&self) -> &Array1<f64> {
        &self.xs
    }

    /// Loss at each sample position.
    #[must_use]
    pub fn losses(&self) -> &Array1<f64> {
        &self.losses
    }

    /// Iterate over `(x, loss)` pairs from left to right.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.losses.iter().copied())
    }

    /// Collect the `(x, loss)` pairs.
    #[must_use]
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.iter().collect()
    }

    /// Axis labels for the sample positions with a fixed number of decimals.
    #[must_use]
    pub fn labels(&self, decimals: usize) -> Vec<String> {
        self.xs.iter().map(|x| format!("{x:.decimals$}")).collect()
    }

    /// Largest loss on the curve, `None` if the curve is empty.
    #[must_use]
    pub fn max_loss(&self) -> Option<f64> {
        self.losses.iter().copied().reduce(f64::max)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLossCurve {
    xs: Array1<f64>,
    losses: Array1<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLossCurve> for LossCurve {
    type Error = Error;

    fn try_from(raw: RawLossCurve) -> Result<Self> {
        Self::try_from_parts(raw.xs, raw.losses)
    }
}

/// Sample the quality loss curve for raw parameters.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] if the parameters or the sampling
/// policy are invalid.
///
/// # Example
///
/// ```rust
/// use taguchi_loss::loss::{compute_loss_curve, SamplingPolicy};
///
/// let curve = compute_loss_curve(10.0, 11.0, 50.0, SamplingPolicy::FixedStep(0.1))?;
/// assert_eq!(curve.len(), 21);
/// assert_eq!(curve.xs()[0], 9.0);
/// assert_eq!(curve.xs()[20], 11.0);
/// # Ok::<(), taguchi_loss::Error>(())
/// ```
pub fn compute_loss_curve(
    target: f64,
    spec_limit: f64,
    cost_at_limit: f64,
    policy: SamplingPolicy,
) -> Result<LossCurve> {
    let params = LossParameters::try_new(target, spec_limit, cost_at_limit)?;
    LossCurve::sample(&params, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_strictly_increasing(xs: &Array1<f64>) {
        for pair in xs.as_slice().unwrap().windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(SamplingPolicy::default(), SamplingPolicy::FixedCount(50));
    }

    #[test]
    fn test_fixed_count_covers_window() {
        let params = LossParameters::new(10.0, 12.0, 100.0);
        let curve = LossCurve::sample(&params, SamplingPolicy::default()).unwrap();

        assert_eq!(curve.len(), DEFAULT_SAMPLE_COUNT);
        assert_eq!(curve.xs()[0], 8.0);
        assert_eq!(curve.xs()[DEFAULT_SAMPLE_COUNT - 1], 12.0);
        assert_strictly_increasing(curve.xs());
        assert!((curve.losses()[0] - 100.0).abs() < 1e-9);
        assert!((curve.max_loss().unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_step_includes_right_bound() {
        // 0.1 does not divide 2.0 exactly in binary; the right bound must
        // still be the last sample.
        let params = LossParameters::new(5.0, 6.0, 10.0);
        let curve = LossCurve::sample(&params, SamplingPolicy::FixedStep(0.1)).unwrap();

        assert_eq!(curve.len(), 21);
        assert_eq!(curve.xs()[0], 4.0);
        assert_eq!(curve.xs()[20], 6.0);
        assert_strictly_increasing(curve.xs());
    }

    #[test]
    fn test_fixed_step_off_grid() {
        let params = LossParameters::new(0.0, 1.0, 1.0);
        let curve = LossCurve::sample(&params, SamplingPolicy::FixedStep(0.3)).unwrap();

        // -1.0, -0.7, -0.4, -0.1, 0.2, 0.5, 0.8
        assert_eq!(curve.len(), 7);
        assert!(curve.xs()[6] < 1.0);
        assert_strictly_increasing(curve.xs());
    }

    #[test]
    fn test_step_wider_than_window() {
        let params = LossParameters::new(0.0, 1.0, 1.0);
        let curve = LossCurve::sample(&params, SamplingPolicy::FixedStep(5.0)).unwrap();
        assert_eq!(curve.points(), vec![(-1.0, 1.0)]);
    }

    #[test]
    fn test_policy_validation() {
        assert!(SamplingPolicy::FixedStep(0.0).validate().is_err());
        assert!(SamplingPolicy::FixedStep(-0.1).validate().is_err());
        assert!(SamplingPolicy::FixedStep(f64::NAN).validate().is_err());
        assert!(SamplingPolicy::FixedCount(1).validate().is_err());
        assert!(SamplingPolicy::FixedCount(MAX_CURVE_SAMPLES + 1).validate().is_err());
        assert!(SamplingPolicy::FixedCount(2).validate().is_ok());
    }

    #[test]
    fn test_step_too_fine() {
        let params = LossParameters::new(0.0, 1000.0, 1.0);
        let err = LossCurve::sample(&params, SamplingPolicy::FixedStep(1e-6)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters { .. }));
    }

    #[test]
    fn test_symmetric_losses() {
        let params = LossParameters::new(3.0, 2.0, 8.0);
        let curve = LossCurve::sample(&params, SamplingPolicy::FixedCount(11)).unwrap();
        let losses = curve.losses();
        for i in 0..curve.len() {
            let mirrored = losses[curve.len() - 1 - i];
            assert!((losses[i] - mirrored).abs() < 1e-9);
        }
        assert_eq!(losses[5], 0.0);
    }

    #[test]
    fn test_labels() {
        let params = LossParameters::new(10.0, 11.0, 50.0);
        let curve = LossCurve::sample(&params, SamplingPolicy::FixedCount(3)).unwrap();
        assert_eq!(curve.labels(1), vec!["9.0", "10.0", "11.0"]);
    }

    #[test]
    fn test_restartable() {
        let params = LossParameters::new(1.5, 2.25, 12.0);
        let first = LossCurve::sample(&params, SamplingPolicy::FixedStep(0.05)).unwrap();
        let second = LossCurve::sample(&params, SamplingPolicy::FixedStep(0.05)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.iter().count(), first.len());
        assert_eq!(first.iter().count(), first.iter().count());
    }

    #[test]
    fn test_narrow_window_at_large_magnitude() {
        // Spacing of 0.08 is below the float resolution at 1e16.
        let params = LossParameters::new(1e16, 1e16 + 2.0, 10.0);
        for policy in [SamplingPolicy::default(), SamplingPolicy::FixedStep(0.1)] {
            let err = LossCurve::sample(&params, policy).unwrap_err();
            assert!(matches!(err, Error::InvalidParameters { .. }), "{err}");
        }

        // A coarse grid still fits.
        let curve = LossCurve::sample(&params, SamplingPolicy::FixedCount(2)).unwrap();
        assert_strictly_increasing(curve.xs());
    }

    #[test]
    fn test_try_from_parts() {
        let xs = Array1::from(vec![0.0, 1.0, 2.0]);
        let losses = Array1::from(vec![4.0, 0.0, 4.0]);
        let curve = LossCurve::try_from_parts(xs.clone(), losses.clone()).unwrap();
        assert_eq!(curve.points(), vec![(0.0, 4.0), (1.0, 0.0), (2.0, 4.0)]);

        let short = Array1::from(vec![4.0, 0.0]);
        assert!(LossCurve::try_from_parts(xs, short).is_err());

        let repeated = Array1::from(vec![0.0, 1.0, 1.0]);
        assert!(LossCurve::try_from_parts(repeated, losses).is_err());
    }

    #[test]
    fn test_compute_loss_curve_rejects_invalid() {
        assert!(compute_loss_curve(1.0, 1.0, 1.0, SamplingPolicy::default()).is_err());
        assert!(compute_loss_curve(1.0, 2.0, 1.0, SamplingPolicy::FixedCount(0)).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn policy() -> impl Strategy<Value = SamplingPolicy> {
        prop_oneof![
            (2usize..=500).prop_map(SamplingPolicy::FixedCount),
            (1u32..=500).prop_map(|steps| SamplingPolicy::FixedStep(1.0 / f64::from(steps))),
        ]
    }

    fn check_shape(curve: &LossCurve, params: &LossParameters, policy: SamplingPolicy) {
        let (left, right) = params.window();
        let xs = curve.xs();
        assert!(!curve.is_empty());
        assert_eq!(xs[0], left);
        for i in 1..xs.len() {
            assert!(xs[i - 1] < xs[i], "x[{}] = {} !< {}", i - 1, xs[i - 1], xs[i]);
        }
        assert!(xs[xs.len() - 1] <= right);
        if let SamplingPolicy::FixedCount(count) = policy {
            assert_eq!(xs.len(), count);
            assert_eq!(xs[count - 1], right);
        }
    }

    proptest! {
        #[test]
        fn curve_is_monotone(
            target in -1e6_f64..1e6,
            width in 1e-2_f64..1e3,
            below in any::<bool>(),
            policy in policy(),
        ) {
            // Scale the step with the width so the sample count stays bounded.
            let policy = match policy {
                SamplingPolicy::FixedStep(fraction) => SamplingPolicy::FixedStep(width * fraction),
                other => other,
            };
            let spec_limit = if below { target - width } else { target + width };
            let params = LossParameters::new(target, spec_limit, 1.0);
            let curve = LossCurve::sample(&params, policy).unwrap();
            check_shape(&curve, &params, policy);
        }

        #[test]
        fn large_magnitude_is_monotone_or_rejected(
            exponent in 10i32..=300,
            mantissa in 1.0_f64..10.0,
            width in 1e-3_f64..1e6,
            count in 2usize..=200,
        ) {
            let target = mantissa * 10f64.powi(exponent);
            if let Ok(params) = LossParameters::try_new(target, target + width, 1.0) {
                let policy = SamplingPolicy::FixedCount(count);
                match LossCurve::sample(&params, policy) {
                    Ok(curve) => check_shape(&curve, &params, policy),
                    Err(err) => prop_assert!(matches!(err, Error::InvalidParameters { .. }), "unexpected error: {:?}", err),
                }
            }
        }
    }
}
