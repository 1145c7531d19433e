//! Reaction configuration, validation, and error types.
//!
//! [`ReactionConfig`] is read once at setup and threaded immutably through
//! the driver. [`validate()`](ReactionConfig::validate) checks its
//! invariants before any field is allocated.

use std::error::Error;
use std::fmt;

use clot_core::{Constants, ConstantsError, Dimensions};
use clot_mesh::SolverSettings;

/// Constants key for the number of reaction sub-steps per flow step.
pub const M_RXN: &str = "M_rxn";
/// Constants key for the coagulation toggle (`0` or `1`).
pub const COAG_REACTIONS_ON: &str = "coagReactionsOn";
/// Constants key for the `Hadh` smoothing toggle (`0` or `1`).
pub const SMOOTH_HADH: &str = "smoothHadh";

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`ReactionConfig::validate()`] or while reading a
/// config from the constants bundle.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A constants lookup failed.
    Constants(ConstantsError),
    /// `reaction_substeps` is zero.
    ZeroSubsteps,
    /// A boolean toggle holds something other than `0` or `1`.
    InvalidToggle {
        /// The offending key.
        key: String,
        /// The rejected value.
        value: f64,
    },
    /// Eta solver settings are unusable.
    InvalidSolver {
        /// Description of which setting is invalid.
        reason: String,
    },
    /// `output_interval` is `Some(0)`.
    ZeroOutputInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constants(e) => write!(f, "constants: {e}"),
            Self::ZeroSubsteps => write!(f, "{M_RXN} must be at least 1"),
            Self::InvalidToggle { key, value } => {
                write!(f, "toggle '{key}' must be 0 or 1, got {value}")
            }
            Self::InvalidSolver { reason } => write!(f, "invalid eta solver settings: {reason}"),
            Self::ZeroOutputInterval => write!(f, "output_interval must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Constants(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConstantsError> for ConfigError {
    fn from(e: ConstantsError) -> Self {
        Self::Constants(e)
    }
}

// ── ReactionConfig ─────────────────────────────────────────────────

/// Toggles and numerical controls for the reaction core.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionConfig {
    /// Build and wire the coagulation-pathway groups. Default: true.
    pub coag_reactions_on: bool,
    /// Pre-smooth `Hadh` once at setup. Default: false.
    pub smooth_adhesion: bool,
    /// RK4 sub-steps per flow step (`M_rxn`). Default: 1. Minimum: 1.
    pub reaction_substeps: u32,
    /// Convergence controls for the implicit `eta` solve.
    pub eta_solver: SolverSettings,
    /// Write fields every this many flow steps. `None` never writes.
    pub output_interval: Option<u64>,
    /// Track ADP release and publish `sigma_release`. Default: true.
    pub track_release: bool,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            coag_reactions_on: true,
            smooth_adhesion: false,
            reaction_substeps: 1,
            eta_solver: SolverSettings::default(),
            output_interval: None,
            track_release: true,
        }
    }
}

impl ReactionConfig {
    /// Read `M_rxn` and the two toggles from the constants bundle.
    ///
    /// `M_rxn` is required; the toggles fall back to their defaults when
    /// absent. Fields not stored in the bundle keep their defaults.
    ///
    /// # Errors
    ///
    /// A missing or non-integral `M_rxn`, a toggle other than `0`/`1`,
    /// or any [`validate()`](Self::validate) failure.
    pub fn from_constants(c: &Constants) -> Result<Self, ConfigError> {
        let config = Self {
            coag_reactions_on: toggle(c, COAG_REACTIONS_ON, true)?,
            smooth_adhesion: toggle(c, SMOOTH_HADH, false)?,
            reaction_substeps: c.label(M_RXN)?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reaction_substeps == 0 {
            return Err(ConfigError::ZeroSubsteps);
        }
        let s = &self.eta_solver;
        if !s.tolerance.is_finite() || s.tolerance <= 0.0 {
            return Err(ConfigError::InvalidSolver {
                reason: format!("tolerance must be finite and positive, got {}", s.tolerance),
            });
        }
        if s.max_iterations == 0 {
            return Err(ConfigError::InvalidSolver {
                reason: "max_iterations must be at least 1".to_string(),
            });
        }
        if self.output_interval == Some(0) {
            return Err(ConfigError::ZeroOutputInterval);
        }
        Ok(())
    }

    /// Whether fields are due for output after flow step `step` (1-based).
    pub fn writes_at(&self, step: u64) -> bool {
        self.output_interval.is_some_and(|n| step % n == 0)
    }
}

fn toggle(c: &Constants, key: &str, default: bool) -> Result<bool, ConfigError> {
    match c.optional(key, Dimensions::DIMLESS)? {
        None => Ok(default),
        Some(v) if v == 0.0 => Ok(false),
        Some(v) if v == 1.0 => Ok(true),
        Some(value) => Err(ConfigError::InvalidToggle {
            key: key.to_string(),
            value,
        }),
    }
}
