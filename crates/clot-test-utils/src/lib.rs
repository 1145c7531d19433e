//! Test utilities and mock types for clot development.
//!
//! [`fixtures`] supplies a complete constants bundle, small meshes and a
//! seeded [`MemoryStore`](clot_engine::MemoryStore); [`mocks`] supplies
//! minimal [`SpeciesGroup`](clot_species::SpeciesGroup)s with known
//! behaviour for exercising the integrator and driver.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::{
    build_system, channel, conservative_constants, line, standard_constants, StoreSeed, DX,
};
pub use mocks::{AdpPool, ConstantRate, LinearDecay, Oscillator, ShearActivated};
