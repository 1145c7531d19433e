//! Species groups, reaction-network wiring and the RK4 integrator.
//!
//! A [`SpeciesGroup`] owns a fixed list of concentration fields inside a
//! [`GroupFields`]. Groups are registered in a [`Network`], wired once
//! through a [`Linker`] into a directed dependency graph of [`GroupId`]
//! handles, and then advanced together by [`Rk4`].
//!
//! [`GroupId`]: clot_core::GroupId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod environment;
pub mod error;
pub mod fields;
pub mod group;
pub mod network;
pub mod rk4;
pub mod scratch;
pub mod stage;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RateContext;
pub use environment::{EnvHandle, Environment};
pub use error::WiringError;
pub use fields::GroupFields;
pub use group::SpeciesGroup;
pub use network::{Linker, Network};
pub use rk4::Rk4;
pub use scratch::{RkScratch, StageBuffer};
pub use stage::Stage;
