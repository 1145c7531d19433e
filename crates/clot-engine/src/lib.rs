//! Setup and operator-split driver for the clot reaction core.
//!
//! [`ReactionSystem::build`] turns a constants bundle, a
//! [`ReactionConfig`] and a [`FieldStore`] into a wired network of species
//! groups. [`ReactionSystem::step`] then advances it one flow step at a
//! time: the `eta` half-step, `M_rxn` RK4 sub-steps, and boundary
//! reapplication, publishing `eta`, `Theta_T`, `Theta_B` and
//! `sigma_release` for the flow solver.
//!
//! ```no_run
//! # use clot_core::Constants;
//! # use clot_engine::{MemoryStore, ReactionConfig, ReactionSystem};
//! # use clot_mesh::Grid2D;
//! # fn run(constants: &Constants, store: &mut MemoryStore) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReactionConfig::from_constants(constants)?;
//! let mesh = Box::new(Grid2D::with_injury(20, 80, 1e-5, 30..50)?);
//! let mut system = ReactionSystem::build(mesh, constants, config, &*store, 0.0)?;
//! for _ in 0..100 {
//!     system.step_with_output(1e-3, store);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adhesion;
pub mod config;
pub mod metrics;
pub mod setup;
pub mod split;
pub mod store;

pub use adhesion::{AdhesionParams, HalfStepReport};
pub use config::{ConfigError, ReactionConfig};
pub use metrics::StepMetrics;
pub use setup::{ReactionSystem, SetupError};
pub use store::{FieldStore, MemoryStore, StoredField};
