//! The read-only, string-keyed bundle of dimensioned parameters.
//!
//! A [`Constants`] bundle is assembled once from the input deck via
//! [`Constants::builder`] and then shared immutably by every species
//! group. There is no mutation API after [`ConstantsBuilder::build`].

use indexmap::IndexMap;

use crate::dimension::Dimensions;
use crate::error::ConstantsError;

/// A named scalar with physical dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionedScalar {
    /// Key under which the scalar is registered.
    pub name: String,
    /// Physical dimensions of `value`.
    pub dimensions: Dimensions,
    /// Numeric value in SI units.
    pub value: f64,
}

impl DimensionedScalar {
    /// Create a new dimensioned scalar.
    pub fn new(name: impl Into<String>, dimensions: Dimensions, value: f64) -> Self {
        Self {
            name: name.into(),
            dimensions,
            value,
        }
    }
}

/// Immutable lookup table of kinetic and physical parameters.
///
/// Entries keep their insertion order, which is the order they appeared in
/// the input deck.
///
/// # Examples
///
/// ```
/// use clot_core::{Constants, Dimensions};
///
/// let constants = Constants::builder()
///     .scalar("k_coh", Dimensions::RATE, 1.0e2)
///     .label("M_rxn", 10)
///     .build();
///
/// assert_eq!(constants.require("k_coh", Dimensions::RATE).unwrap(), 1.0e2);
/// assert_eq!(constants.label("M_rxn").unwrap(), 10);
/// assert!(constants.require("k_adh", Dimensions::RATE).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Constants {
    entries: IndexMap<String, DimensionedScalar>,
}

/// Builder for [`Constants`]. Later entries overwrite earlier ones with the
/// same key.
#[derive(Debug, Default)]
pub struct ConstantsBuilder {
    entries: IndexMap<String, DimensionedScalar>,
}

impl ConstantsBuilder {
    /// Add a dimensioned scalar.
    pub fn scalar(mut self, key: impl Into<String>, dimensions: Dimensions, value: f64) -> Self {
        let key = key.into();
        self.entries.insert(
            key.clone(),
            DimensionedScalar::new(key, dimensions, value),
        );
        self
    }

    /// Add a dimensionless integer count (e.g. `M_rxn`).
    pub fn label(self, key: impl Into<String>, value: u32) -> Self {
        self.scalar(key, Dimensions::DIMLESS, f64::from(value))
    }

    /// Freeze the bundle.
    pub fn build(self) -> Constants {
        Constants {
            entries: self.entries,
        }
    }
}

impl Constants {
    /// Start assembling a new bundle.
    pub fn builder() -> ConstantsBuilder {
        ConstantsBuilder::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw access to an entry.
    pub fn get(&self, key: &str) -> Option<&DimensionedScalar> {
        self.entries.get(key)
    }

    /// Iterate over all entries in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &DimensionedScalar> {
        self.entries.values()
    }

    /// Look up a required scalar and check its dimensions.
    ///
    /// # Errors
    ///
    /// [`ConstantsError::Missing`] if the key is absent,
    /// [`ConstantsError::DimensionMismatch`] if the dimensions differ, and
    /// [`ConstantsError::NonFinite`] for NaN or infinite values.
    pub fn require(&self, key: &str, dimensions: Dimensions) -> Result<f64, ConstantsError> {
        match self.optional(key, dimensions)? {
            Some(v) => Ok(v),
            None => Err(ConstantsError::Missing { key: key.to_string() }),
        }
    }

    /// Look up an optional scalar. Absent keys yield `Ok(None)`; present
    /// keys are validated exactly like [`require`](Self::require).
    pub fn optional(
        &self,
        key: &str,
        dimensions: Dimensions,
    ) -> Result<Option<f64>, ConstantsError> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };
        if entry.dimensions != dimensions {
            return Err(ConstantsError::DimensionMismatch {
                key: key.to_string(),
                expected: dimensions,
                found: entry.dimensions,
            });
        }
        if !entry.value.is_finite() {
            return Err(ConstantsError::NonFinite {
                key: key.to_string(),
                value: entry.value,
            });
        }
        Ok(Some(entry.value))
    }

    /// Look up a required scalar that must be strictly positive.
    ///
    /// # Errors
    ///
    /// As [`require`](Self::require), plus [`ConstantsError::NonPositive`]
    /// for zero or negative values.
    pub fn require_positive(
        &self,
        key: &str,
        dimensions: Dimensions,
    ) -> Result<f64, ConstantsError> {
        let value = self.require(key, dimensions)?;
        positive(key, value)
    }

    /// [`optional`](Self::optional) for a key that must be strictly
    /// positive when present.
    pub fn optional_positive(
        &self,
        key: &str,
        dimensions: Dimensions,
    ) -> Result<Option<f64>, ConstantsError> {
        self.optional(key, dimensions)?
            .map(|v| positive(key, v))
            .transpose()
    }

    /// Look up an optional scalar, falling back to `default` when absent.
    pub fn get_or(
        &self,
        key: &str,
        dimensions: Dimensions,
        default: f64,
    ) -> Result<f64, ConstantsError> {
        Ok(self.optional(key, dimensions)?.unwrap_or(default))
    }

    /// Look up a required dimensionless positive integer.
    pub fn label(&self, key: &str) -> Result<u32, ConstantsError> {
        let value = self.require(key, Dimensions::DIMLESS)?;
        if value < 1.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(ConstantsError::NotALabel {
                key: key.to_string(),
                value,
            });
        }
        Ok(value as u32)
    }
}

fn positive(key: &str, value: f64) -> Result<f64, ConstantsError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConstantsError::NonPositive {
            key: key.to_string(),
            value,
        })
    }
}

impl FromIterator<DimensionedScalar> for Constants {
    fn from_iter<I: IntoIterator<Item = DimensionedScalar>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect();
        Self { entries }
    }
}
