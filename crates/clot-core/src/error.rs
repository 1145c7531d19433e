//! Error types for the constants bundle.
//!
//! Everything here is a configuration error: it is detected while the
//! input deck is being loaded and always names the offending key so the
//! caller can abort with a useful diagnostic.

use crate::dimension::Dimensions;
use std::error::Error;
use std::fmt;

/// Errors from looking up or validating entries of a [`Constants`](crate::Constants) bundle.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantsError {
    /// A required key is absent from the input deck.
    Missing {
        /// The missing key.
        key: String,
    },
    /// A key is present but carries the wrong physical dimension.
    DimensionMismatch {
        /// The offending key.
        key: String,
        /// Dimensions the consumer expected.
        expected: Dimensions,
        /// Dimensions found in the deck.
        found: Dimensions,
    },
    /// A value is NaN or infinite.
    NonFinite {
        /// The offending key.
        key: String,
        /// The rejected value.
        value: f64,
    },
    /// A key used as a divisor is zero or negative.
    NonPositive {
        /// The offending key.
        key: String,
        /// The rejected value.
        value: f64,
    },
    /// A key used as an integer count does not hold a positive whole number.
    NotALabel {
        /// The offending key.
        key: String,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConstantsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { key } => write!(f, "required constant '{key}' not found"),
            Self::DimensionMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "constant '{key}' has dimensions {found}, expected {expected}"
            ),
            Self::NonFinite { key, value } => {
                write!(f, "constant '{key}' must be finite, got {value}")
            }
            Self::NonPositive { key, value } => {
                write!(f, "constant '{key}' must be positive, got {value}")
            }
            Self::NotALabel { key, value } => {
                write!(f, "constant '{key}' must be a positive integer, got {value}")
            }
        }
    }
}

impl Error for ConstantsError {}
