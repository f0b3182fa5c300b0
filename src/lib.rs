//! # taguchi-loss
//!
//! Taguchi's quality loss function and the sum-of-squares decomposition used
//! in quality engineering.
//!
//! ## Overview
//!
//! The quality loss function prices deviation from a target value as a
//! quadratic, calibrated so that a unit at the specification limit costs `C`.
//! The sum-of-squares decomposition splits the total squared deviation of a
//! sample into a variation part (SSe) and a bias part (SSm), for each of the
//! three standard characteristic types:
//! - **Nominal-is-best**: hit a finite target
//! - **Smaller-is-better**: the ideal is zero
//! - **Larger-is-better**: the ideal is infinite, analysed through `1/y`
//!
//! This library provides:
//! - Validated loss parameters and pure loss evaluation
//! - Loss curve sampling with fixed-step or fixed-count policies
//! - SST / SSe / SSm decomposition with explicit error results
//! - A configurable engine and a UI adapter with injected collaborators
//!
//! ## Quick Start
//!
//! ```rust
//! use taguchi_loss::{compute_loss, compute_sums_of_squares, CharacteristicType};
//!
//! // $100 lost at the limit 12.0 of a 10.0 target
//! let loss = compute_loss(10.0, 12.0, 100.0, 11.0)?;
//! assert_eq!(loss, 25.0);
//!
//! let ss = compute_sums_of_squares(
//!     CharacteristicType::NominalIsBest,
//!     &[10.2, 9.8, 10.1, 9.9],
//!     Some(10.0),
//! )?;
//! assert!((ss.sst - 0.10).abs() < 1e-9);
//! # Ok::<(), taguchi_loss::Error>(())
//! ```
//!
//! Or use the configured engine:
//!
//! ```rust
//! use taguchi_loss::{EngineConfig, QualityLossEngine};
//!
//! let engine = QualityLossEngine::new(EngineConfig::classic());
//! let report = engine.evaluate_raw(10.0, 11.0, 50.0, 10.5)?;
//!
//! assert_eq!(report.formatted_loss, "$12.50");
//! assert_eq!(report.curve.len(), 21);
//! # Ok::<(), taguchi_loss::Error>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of value types
//! - `parallel`: Enable parallel batch evaluation using rayon
//! - `python`: Enable Python bindings via PyO3

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod datasets;
pub mod engine;
pub mod error;
pub mod explorer;
pub mod format;
pub mod loss;
#[cfg(feature = "python")]
pub mod python;
pub mod sums;

#[cfg(feature = "parallel")]
pub mod parallel;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::datasets::{get_by_name as get_dataset, list_datasets, reference_set};
    pub use crate::engine::{EngineConfig, LossReport, QualityLossEngine};
    pub use crate::error::{Error, Result};
    pub use crate::explorer::{CharacteristicTabs, Field, LossExplorer, LossView, ParameterSource};
    pub use crate::format::{CurrencyFormat, SymbolPosition};
    pub use crate::loss::{
        compute_loss, compute_loss_curve, LossCurve, LossParameters, SamplingPolicy,
    };
    pub use crate::sums::{
        compute_sums_of_squares, compute_sums_of_squares_with, CharacteristicType,
        DecompositionOptions, ObservationSet, ReciprocalDivisor, SumsOfSquares,
    };

    #[cfg(feature = "parallel")]
    pub use crate::parallel::{par_loss_curve, par_losses, par_sums_of_squares};
}

// Re-export commonly used items at crate root
pub use engine::{EngineConfig, LossReport, QualityLossEngine};
pub use error::{Error, Result};
pub use format::CurrencyFormat;
pub use loss::{compute_loss, compute_loss_curve, LossCurve, LossParameters, SamplingPolicy};
pub use sums::{
    compute_sums_of_squares, CharacteristicType, DecompositionOptions, ObservationSet,
    SumsOfSquares,
};

#[cfg(feature = "parallel")]
pub use parallel::{par_loss_curve, par_sums_of_squares};
