//! Wiring errors.

use std::error::Error;
use std::fmt;

/// A rate law referenced something the network cannot provide.
///
/// Unlike ordering violations (which panic), these depend on the input
/// deck and toggles, so setup reports them to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WiringError {
    /// A required sibling group is not registered.
    MissingGroup {
        /// Group doing the wiring.
        group: String,
        /// Name it asked for.
        requires: String,
    },
    /// A required environment field is absent.
    MissingEnvironmentField {
        /// Group doing the wiring.
        group: String,
        /// Field name it asked for.
        field: String,
    },
}

impl fmt::Display for WiringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGroup { group, requires } => {
                write!(f, "group '{group}' requires group '{requires}', which is not registered")
            }
            Self::MissingEnvironmentField { group, field } => {
                write!(f, "group '{group}' requires environment field '{field}'")
            }
        }
    }
}

impl Error for WiringError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_sides() {
        let e = WiringError::MissingGroup {
            group: "platelet_bound".into(),
            requires: "platelet".into(),
        };
        let s = e.to_string();
        assert!(s.contains("platelet_bound") && s.contains("'platelet'"));
    }
}
