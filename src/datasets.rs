//! Reference observation sets for each characteristic type.
//!
//! These are the worked examples of the quality loss explorer. They are handy
//! for demos and for checking a decomposition against known values.

use crate::error::{Error, Result};
use crate::sums::{CharacteristicType, ObservationSet};

/// Retrieve a reference observation set by its selector.
///
/// Supported sets:
/// - **nominal**: `[10.2, 9.8, 10.1, 9.9]` with target `10`
/// - **smaller**: `[0.1, 0.05, 0.15, 0.08]`
/// - **larger**: `[50, 55, 48, 52]`
///
/// # Example
///
/// ```
/// use taguchi_loss::datasets::get_by_name;
///
/// let (kind, set) = get_by_name("nominal").unwrap();
/// assert_eq!(set.len(), 4);
/// assert_eq!(set.target(), Some(10.0));
/// assert!(kind.requires_target());
/// ```
pub fn get_by_name(name: &str) -> Result<(CharacteristicType, ObservationSet)> {
    let kind: CharacteristicType = name
        .parse()
        .map_err(|_| Error::invalid_parameters(format!("Unknown reference dataset: {name}")))?;
    Ok((kind, reference_set(kind)))
}

/// Reference observation set for a characteristic type.
#[must_use]
pub fn reference_set(kind: CharacteristicType) -> ObservationSet {
    match kind {
        CharacteristicType::NominalIsBest => {
            ObservationSet::new(vec![10.2, 9.8, 10.1, 9.9]).with_target(10.0)
        }
        CharacteristicType::SmallerIsBetter => ObservationSet::new(vec![0.1, 0.05, 0.15, 0.08]),
        CharacteristicType::LargerIsBetter => ObservationSet::new(vec![50.0, 55.0, 48.0, 52.0]),
    }
}

/// List all available reference sets.
#[must_use]
pub fn list_datasets() -> Vec<&'static str> {
    CharacteristicType::ALL
        .iter()
        .map(|kind| kind.selector())
        .collect()
}
