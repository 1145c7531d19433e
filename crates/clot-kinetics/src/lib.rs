//! Platelet and coagulation kinetics.
//!
//! Four concrete [`SpeciesGroup`](clot_species::SpeciesGroup)s and the ADP
//! release subsystem:
//!
//! - [`PlateletGroup`]: activation, adhesion and cohesion of platelets
//! - [`SeBoundGroup`]: subendothelial enzyme (coagulation only)
//! - [`FluidPhaseGroup`]: plasma zymogens and enzymes
//! - [`PlateletBoundGroup`]: platelet-surface chemistry (coagulation only)
//! - [`ReleaseTracker`]: `sigma_release` from recent activations
//!
//! # Wiring
//!
//! | group            | reads                                  |
//! |------------------|----------------------------------------|
//! | `platelet`       | `fluid_phase`                          |
//! | `se_bound`       | `fluid_phase`                          |
//! | `fluid_phase`    | `platelet`, `se_bound`?, `platelet_bound`? |
//! | `platelet_bound` | `platelet`, `fluid_phase`              |

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fluid_phase;
pub mod names;
pub mod params;
pub mod platelet;
pub mod platelet_bound;
pub mod release;
pub mod se_bound;

pub use fluid_phase::FluidPhaseGroup;
pub use params::{Binding, ChemParams, PlateletParams};
pub use platelet::PlateletGroup;
pub use platelet_bound::PlateletBoundGroup;
pub use release::{ReleaseProfile, ReleaseTracker};
pub use se_bound::SeBoundGroup;
