//! Configured entry point combining loss evaluation, curve sampling,
//! formatting and sum-of-squares decomposition.
//!
//! # Example
//!
//! ```
//! use taguchi_loss::{EngineConfig, LossParameters, QualityLossEngine, SamplingPolicy};
//!
//! let engine = QualityLossEngine::new(
//!     EngineConfig::default().with_sampling(SamplingPolicy::FixedCount(21)),
//! );
//! let params = LossParameters::try_new(10.0, 12.0, 100.0)?;
//! let report = engine.evaluate(&params, 11.0)?;
//!
//! assert_eq!(report.loss, 25.0);
//! assert_eq!(report.formatted_loss, "$25.00");
//! assert_eq!(report.curve.len(), 21);
//! # Ok::<(), taguchi_loss::Error>(())
//! ```

use crate::error::Result;
use crate::format::CurrencyFormat;
use crate::loss::{LossCurve, LossParameters, SamplingPolicy, DEFAULT_STEP};
use crate::sums::{
    compute_sums_of_squares_with, CharacteristicType, DecompositionOptions, ObservationSet,
    SumsOfSquares,
};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Curve sampling policy (default: 50 evenly spaced samples).
    pub sampling: SamplingPolicy,
    /// Currency format for loss values; `None` prints the bare number.
    pub currency: Option<CurrencyFormat>,
    /// Sum-of-squares options (default: total-count divisor).
    pub decomposition: DecompositionOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingPolicy::default(),
            currency: Some(CurrencyFormat::default()),
            decomposition: DecompositionOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Fixed 0.1 step sampling, as on the classic explorer page.
    #[must_use]
    pub fn classic() -> Self {
        Self::default().with_sampling(SamplingPolicy::FixedStep(DEFAULT_STEP))
    }

    /// Set the sampling policy.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingPolicy) -> Self {
        self.sampling = sampling;
        self
    }

    /// Set the currency format.
    #[must_use]
    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Print loss values without a currency.
    #[must_use]
    pub fn without_currency(mut self) -> Self {
        self.currency = None;
        self
    }

    /// Set the decomposition options.
    #[must_use]
    pub fn with_decomposition(mut self, decomposition: DecompositionOptions) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Check that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`](crate::Error::InvalidParameters) if
    /// the sampling policy is invalid.
    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()
    }
}

/// Everything a view needs after one evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LossReport {
    /// Parameters the report was computed from.
    pub params: LossParameters,
    /// Observed value.
    pub observed: f64,
    /// Loss at the observed value.
    pub loss: f64,
    /// Loss formatted with the configured currency.
    pub formatted_loss: String,
    /// Sampled loss curve.
    pub curve: LossCurve,
}

impl LossReport {
    /// The observed point `(x, loss)` for a scatter marker on the curve.
    #[must_use]
    pub fn marker(&self) -> (f64, f64) {
        (self.observed, self.loss)
    }

    /// Whether the observed value lies inside the sampling window.
    #[must_use]
    pub fn within_window(&self) -> bool {
        let (left, right) = self.params.window();
        (left..=right).contains(&self.observed)
    }
}

/// Quality loss engine.
///
/// Holds only configuration; every method is a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct QualityLossEngine {
    config: EngineConfig,
}

impl QualityLossEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sample the loss curve with the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`](crate::Error::InvalidParameters) if
    /// the sampling policy is invalid.
    pub fn curve(&self, params: &LossParameters) -> Result<LossCurve> {
        LossCurve::sample(params, self.config.sampling)
    }

    /// Format a loss value with the configured currency.
    #[must_use]
    pub fn format_loss(&self, loss: f64) -> String {
        match &self.config.currency {
            Some(currency) => currency.format(loss),
            None => loss.to_string(),
        }
    }

    /// Evaluate the loss at `observed` and sample the curve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`](crate::Error::InvalidParameters) if
    /// `observed` is not finite, the loss at `observed` overflows, or the
    /// sampling policy is invalid.
    pub fn evaluate(&self, params: &LossParameters, observed: f64) -> Result<LossReport> {
        let loss = params.try_loss(observed)?;
        let curve = self.curve(params)?;
        tracing::debug!(
            target_value = params.target(),
            spec_limit = params.spec_limit(),
            observed,
            loss,
            samples = curve.len(),
            "evaluated quality loss"
        );

        Ok(LossReport {
            params: *params,
            observed,
            loss,
            formatted_loss: self.format_loss(loss),
            curve,
        })
    }

    /// Validate raw values and evaluate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`](crate::Error::InvalidParameters)
    /// for unusable parameters.
    pub fn evaluate_raw(
        &self,
        target: f64,
        spec_limit: f64,
        cost_at_limit: f64,
        observed: f64,
    ) -> Result<LossReport> {
        let params = LossParameters::try_new(target, spec_limit, cost_at_limit)?;
        self.evaluate(&params, observed)
    }

    /// Decompose an observation set with the configured options.
    ///
    /// # Errors
    ///
    /// See [`compute_sums_of_squares`](crate::sums::compute_sums_of_squares).
    pub fn decompose(
        &self,
        kind: CharacteristicType,
        observations: &ObservationSet,
    ) -> Result<SumsOfSquares> {
        compute_sums_of_squares_with(
            kind,
            observations.values(),
            observations.target(),
            &self.config.decomposition,
        )
    }
}
