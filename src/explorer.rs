//! UI adapter for an interactive loss explorer.
//!
//! The numeric engine knows nothing about the page. [`LossExplorer`] reads
//! raw control values from a [`ParameterSource`], runs the engine and pushes
//! results to a [`LossView`]. Both collaborators are handed in at
//! construction, so an explorer can be driven by a browser binding, a
//! terminal front end or a test double alike.
//!
//! # Example
//!
//! ```
//! use taguchi_loss::explorer::{Field, LossExplorer, LossView, ParameterSource};
//! use taguchi_loss::{Error, LossCurve, QualityLossEngine};
//!
//! struct Fixed;
//!
//! impl ParameterSource for Fixed {
//!     fn read(&self, field: Field) -> String {
//!         match field {
//!             Field::Target => "10",
//!             Field::SpecLimit => "12",
//!             Field::CostAtLimit => "100",
//!             Field::Observed => "11",
//!         }
//!         .to_string()
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Label(String);
//!
//! impl LossView for Label {
//!     fn show_loss(&mut self, text: &str) {
//!         self.0 = text.to_string();
//!     }
//!     fn show_observed(&mut self, _x: f64) {}
//!     fn render_curve(&mut self, _curve: &LossCurve, _marker: (f64, f64)) {}
//!     fn show_error(&mut self, error: &Error) {
//!         self.0 = error.to_string();
//!     }
//! }
//!
//! let mut explorer = LossExplorer::new(QualityLossEngine::default(), Fixed, Label::default());
//! explorer.refresh()?;
//! assert_eq!(explorer.view().0, "$25.00");
//! # Ok::<(), taguchi_loss::Error>(())
//! ```

use std::fmt;

use crate::engine::{LossReport, QualityLossEngine};
use crate::error::{Error, Result};
use crate::loss::{LossCurve, LossParameters};
use crate::sums::CharacteristicType;

/// Input controls of the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Target value `N`.
    Target,
    /// Specification limit `LES`.
    SpecLimit,
    /// Cost at the specification limit `C`.
    CostAtLimit,
    /// Observed value `x`, usually a slider.
    Observed,
}

impl Field {
    /// All fields in reading order.
    pub const ALL: [Self; 4] = [
        Self::Target,
        Self::SpecLimit,
        Self::CostAtLimit,
        Self::Observed,
    ];

    /// Control identifier.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::SpecLimit => "spec_limit",
            Self::CostAtLimit => "cost_at_limit",
            Self::Observed => "observed",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supplies the current raw text of each input control.
///
/// Values are read fresh on every refresh.
pub trait ParameterSource {
    /// Raw text of `field`.
    fn read(&self, field: Field) -> String;
}

/// Receives explorer output.
pub trait LossView {
    /// Display the formatted loss at the observed value.
    fn show_loss(&mut self, text: &str);
    /// Mirror the observed value next to its control.
    fn show_observed(&mut self, x: f64);
    /// Draw the loss curve with the observed point as a marker.
    fn render_curve(&mut self, curve: &LossCurve, marker: (f64, f64));
    /// Display an input error. The previous curve must stay as it is.
    fn show_error(&mut self, error: &Error);
}

/// Parse one control value.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] for empty, non-numeric or non-finite text.
pub fn parse_field(field: Field, raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        Error::invalid_parameters(format!("{field} is not a number: {raw:?}"))
    })?;
    if !value.is_finite() {
        return Err(Error::invalid_parameters(format!(
            "{field} must be a finite number, got {raw:?}"
        )));
    }
    Ok(value)
}

/// Interactive loss explorer.
pub struct LossExplorer<S, V> {
    engine: QualityLossEngine,
    source: S,
    view: V,
    last_report: Option<LossReport>,
}

impl<S: ParameterSource, V: LossView> LossExplorer<S, V> {
    /// Create an explorer from an engine and its collaborators.
    pub fn new(engine: QualityLossEngine, source: S, view: V) -> Self {
        Self {
            engine,
            source,
            view,
            last_report: None,
        }
    }

    /// Recompute from the current inputs and update the view.
    ///
    /// On failure the error is shown on the view and returned; the view's
    /// curve and the last report are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for unparseable or invalid input.
    pub fn refresh(&mut self) -> Result<&LossReport> {
        match self.compute() {
            Ok(report) => {
                self.view.show_loss(&report.formatted_loss);
                self.view.show_observed(report.observed);
                self.view.render_curve(&report.curve, report.marker());
                Ok(&*self.last_report.insert(report))
            }
            Err(err) => {
                tracing::warn!(error = %err, "rejected explorer input");
                self.view.show_error(&err);
                Err(err)
            }
        }
    }

    fn compute(&self) -> Result<LossReport> {
        let read = |field: Field| parse_field(field, &self.source.read(field));

        let target = read(Field::Target)?;
        let spec_limit = read(Field::SpecLimit)?;
        let cost_at_limit = read(Field::CostAtLimit)?;
        let observed = read(Field::Observed)?;

        let params = LossParameters::try_new(target, spec_limit, cost_at_limit)?;
        tracing::debug!(
            target_value = target,
            spec_limit,
            cost_at_limit,
            observed,
            "refreshing explorer"
        );
        self.engine.evaluate(&params, observed)
    }

    /// Range for the observed-value control from the last valid parameters.
    #[must_use]
    pub fn observed_range(&self) -> Option<(f64, f64)> {
        self.last_report.as_ref().map(|r| r.params.window())
    }

    /// Last successfully computed report.
    #[must_use]
    pub fn last_report(&self) -> Option<&LossReport> {
        self.last_report.as_ref()
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &QualityLossEngine {
        &self.engine
    }

    /// The parameter source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the parameter source, e.g. to simulate input.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

/// Tab group selecting the characteristic type; exactly one tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicTabs {
    active: CharacteristicType,
}

impl Default for CharacteristicTabs {
    fn default() -> Self {
        Self {
            active: CharacteristicType::ALL[0],
        }
    }
}

impl CharacteristicTabs {
    /// Tabs with the first type (nominal-is-best) active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active characteristic type.
    #[must_use]
    pub fn active(&self) -> CharacteristicType {
        self.active
    }

    /// Whether `kind` is the active tab.
    #[must_use]
    pub fn is_active(&self, kind: CharacteristicType) -> bool {
        self.active() == kind
    }

    /// Activate the tab with the given identifier, e.g. `"smaller"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCharacteristicType`] for an unknown identifier;
    /// the active tab does not change.
    pub fn activate(&mut self, id: &str) -> Result<CharacteristicType> {
        let kind: CharacteristicType = id.parse()?;
        self.select(kind);
        Ok(kind)
    }

    /// Activate a tab by type.
    pub fn select(&mut self, kind: CharacteristicType) {
        self.active = kind;
    }

    /// Every tab with its active state, in presentation order.
    pub fn tabs(&self) -> impl Iterator<Item = (CharacteristicType, bool)> + '_ {
        CharacteristicType::ALL
            .into_iter()
            .map(move |kind| (kind, self.is_active(kind)))
    }
}
