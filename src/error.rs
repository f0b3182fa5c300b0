//! Error types for the taguchi-loss library.
//!
//! Every fallible operation returns [`Result`]. Conditions that the loss model
//! treats as defined outcomes (an empty observation set, a zero entry under
//! larger-is-better) are not errors and never reach this module.

use thiserror::Error;

/// The main error type for the taguchi-loss library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input values cannot be used for a computation.
    ///
    /// Raised for non-numeric or non-finite input, for a specification limit
    /// equal to the target, and for an unusable sampling policy.
    #[error("invalid parameters: {message}")]
    InvalidParameters {
        /// Description of what is invalid.
        message: String,
    },

    /// A nominal-is-best decomposition was requested without a target value.
    #[error("nominal-is-best decomposition requires a target value")]
    MissingTarget,

    /// The characteristic type selector was not recognized.
    #[error("unknown quality characteristic type: {0:?}")]
    UnknownCharacteristicType(String),
}

/// A specialized `Result` type for taguchi-loss operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `InvalidParameters` error.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create a new `UnknownCharacteristicType` error.
    #[must_use]
    pub fn unknown_characteristic(selector: impl Into<String>) -> Self {
        Self::UnknownCharacteristicType(selector.into())
    }
}
