//! Sum-of-squares decomposition types.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Category of a quality characteristic.
///
/// Each category has its own ideal value and therefore its own
/// decomposition of the total sum of squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacteristicType {
    /// The ideal value is a finite target `y₀`.
    /// SST = Σ(y - y₀)²
    NominalIsBest,
    /// The ideal value is zero.
    /// SST = Σy²
    SmallerIsBetter,
    /// The ideal value is infinite; analysed through `1/y`.
    /// SST = Σ(1/y)²
    LargerIsBetter,
}

impl CharacteristicType {
    /// All characteristic types in presentation order.
    pub const ALL: [Self; 3] = [
        Self::NominalIsBest,
        Self::SmallerIsBetter,
        Self::LargerIsBetter,
    ];

    /// Short selector used by tab controls: `nominal`, `smaller` or `larger`.
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::NominalIsBest => "nominal",
            Self::SmallerIsBetter => "smaller",
            Self::LargerIsBetter => "larger",
        }
    }

    /// Whether the decomposition needs a target value.
    #[must_use]
    pub fn requires_target(self) -> bool {
        matches!(self, Self::NominalIsBest)
    }
}

impl fmt::Display for CharacteristicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NominalIsBest => "nominal-is-best",
            Self::SmallerIsBetter => "smaller-is-better",
            Self::LargerIsBetter => "larger-is-better",
        };
        f.write_str(name)
    }
}

impl FromStr for CharacteristicType {
    type Err = Error;

    /// Parse a selector (`nominal`) or a full name (`nominal-is-best`),
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "nominal" | "nominal-is-best" => Ok(Self::NominalIsBest),
            "smaller" | "smaller-is-better" => Ok(Self::SmallerIsBetter),
            "larger" | "larger-is-better" => Ok(Self::LargerIsBetter),
            _ => Err(Error::unknown_characteristic(s)),
        }
    }
}

/// Divisor of the mean component under larger-is-better.
///
/// Zero observations have no reciprocal and are skipped by every sum, and the
/// reciprocal mean behind SSe always uses the nonzero count. This only picks
/// the SSm divisor: the total number of observations, or the number actually
/// summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReciprocalDivisor {
    /// Divide by all observations, zeros included.
    #[default]
    TotalCount,
    /// Divide by the nonzero observations only.
    NonZeroCount,
}

/// Options for the sum-of-squares decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompositionOptions {
    /// SSm divisor under larger-is-better (default: total count).
    pub reciprocal_divisor: ReciprocalDivisor,
}

impl DecompositionOptions {
    /// Options that divide larger-is-better SSm by the nonzero count.
    #[must_use]
    pub fn corrected() -> Self {
        Self {
            reciprocal_divisor: ReciprocalDivisor::NonZeroCount,
        }
    }

    /// Set the larger-is-better SSm divisor.
    #[must_use]
    pub fn with_reciprocal_divisor(mut self, divisor: ReciprocalDivisor) -> Self {
        self.reciprocal_divisor = divisor;
        self
    }
}

/// Result of a sum-of-squares decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumsOfSquares {
    /// Total sum of squares about the ideal value.
    pub sst: f64,
    /// Error (variation) sum of squares about the sample mean.
    pub sse: f64,
    /// Mean (bias) sum of squares.
    pub ssm: f64,
    /// Observation count used as the SSm divisor.
    pub n: usize,
}

impl SumsOfSquares {
    /// The all-zero result of an empty observation set.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Error variance `Ve = SSe / (n - 1)`, `None` for fewer than two
    /// observations.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn variance_estimate(&self) -> Option<f64> {
        (self.n >= 2).then(|| self.sse / (self.n - 1) as f64)
    }

    /// Part of SST not explained by `SSe + SSm`.
    ///
    /// Zero up to rounding for nominal-is-best and smaller-is-better with
    /// nonzero data; larger-is-better leaves a residual whenever zero
    /// observations are skipped.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.sst - self.sse - self.ssm
    }
}

impl fmt::Display for SumsOfSquares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SST = {:.6}, SSe = {:.6}, SSm = {:.6} (n = {})",
            self.sst, self.sse, self.ssm, self.n
        )
    }
}

/// Ordered observations of a quality characteristic with an optional target.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationSet {
    values: Vec<f64>,
    target: Option<f64>,
}

impl ObservationSet {
    /// Create an observation set without a target.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            target: None,
        }
    }

    /// Attach a target value (used by nominal-is-best).
    #[must_use]
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// The observations.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The target value, if any.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Decompose with default options.
    ///
    /// # Errors
    ///
    /// See [`compute_sums_of_squares`](super::compute_sums_of_squares).
    pub fn decompose(&self, kind: CharacteristicType) -> Result<SumsOfSquares> {
        super::compute_sums_of_squares(kind, &self.values, self.target)
    }

    /// Decompose with explicit options.
    ///
    /// # Errors
    ///
    /// See [`compute_sums_of_squares`](super::compute_sums_of_squares).
    pub fn decompose_with(
        &self,
        kind: CharacteristicType,
        options: &DecompositionOptions,
    ) -> Result<SumsOfSquares> {
        super::compute_sums_of_squares_with(kind, &self.values, self.target, options)
    }
}

impl From<Vec<f64>> for ObservationSet {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
