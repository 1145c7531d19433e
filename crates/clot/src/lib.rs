//! Clot: platelet deposition and coagulation kinetics for operator-split
//! flow solvers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all clot sub-crates. For most users, adding `clot` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use clot::prelude::*;
//!
//! // A user-defined group: one species decaying at first order.
//! struct Decay {
//!     fields: GroupFields,
//! }
//!
//! impl SpeciesGroup for Decay {
//!     fn name(&self) -> &str { "decay" }
//!     fn fields(&self) -> &GroupFields { &self.fields }
//!     fn fields_mut(&mut self) -> &mut GroupFields { &mut self.fields }
//!     fn wire(&mut self, _: &mut Linker<'_>) -> Result<(), WiringError> { Ok(()) }
//!     fn rates(&self, _: &RateContext<'_>, cell: usize, out: &mut [f64]) {
//!         out[0] = -2.0 * self.fields.value(0, cell);
//!     }
//! }
//!
//! let mesh = Line1D::new(8, 1e-6).unwrap();
//! let mut fields = GroupFields::sized(
//!     "decay",
//!     vec![FieldSpec::concentration("x", Dimensions::CONCENTRATION)],
//! );
//! fields.fill(0, ScalarField::zero_gradient(&mesh, "x", Dimensions::CONCENTRATION, 1.0));
//!
//! let mut network = Network::new();
//! network.add(Box::new(Decay { fields }));
//!
//! let mut system = ReactionSystem::from_parts(
//!     Box::new(mesh),
//!     ReactionConfig { reaction_substeps: 10, ..ReactionConfig::default() },
//!     network,
//!     Environment::new(),
//!     0.0,
//! )
//! .unwrap();
//! system.step(0.1);
//! let x = system.field("x").unwrap().get(0);
//! assert!((x - (-0.2f64).exp()).abs() < 1e-8);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `clot-core` | Dimensions, constants, field specs, group IDs |
//! | [`mesh`] | `clot-mesh` | Mesh contract, scalar fields, FVM kernels |
//! | [`species`] | `clot-species` | Species groups, wiring, RK4 |
//! | [`kinetics`] | `clot-kinetics` | Platelet and coagulation groups, ADP release |
//! | [`engine`] | `clot-engine` | Setup, operator-split driver, persistence |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`clot-core`).
///
/// Contains [`types::Dimensions`], the read-only [`types::Constants`]
/// bundle, [`types::FieldSpec`] and the constants error type.
pub use clot_core as types;

/// Meshes and fields (`clot-mesh`).
///
/// Provides the [`mesh::Mesh`] trait, the [`mesh::Line1D`] and
/// [`mesh::Grid2D`] reference meshes, and the implicit diffusion solve.
pub use clot_mesh as mesh;

/// Species groups and the integrator (`clot-species`).
///
/// The [`species::SpeciesGroup`] trait is the main extension point for
/// user-defined kinetics.
pub use clot_species as species;

/// The platelet and coagulation model (`clot-kinetics`).
///
/// Includes [`kinetics::PlateletGroup`], [`kinetics::SeBoundGroup`],
/// [`kinetics::FluidPhaseGroup`], [`kinetics::PlateletBoundGroup`] and
/// the [`kinetics::ReleaseTracker`].
pub use clot_kinetics as kinetics;

/// The reaction driver (`clot-engine`).
///
/// [`engine::ReactionSystem`] builds the model from constants and stored
/// fields and advances it once per flow step.
pub use clot_engine as engine;

/// Common imports for typical clot usage.
///
/// ```rust
/// use clot::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use clot_core::{Constants, Dimensions, FieldKind, FieldSpec, GroupId, ReadPolicy};

    // Mesh
    pub use clot_mesh::{BoundaryCondition, Grid2D, Line1D, Mesh, ScalarField};

    // Species
    pub use clot_species::{
        EnvHandle, Environment, GroupFields, Linker, Network, RateContext, Rk4, SpeciesGroup,
    };

    // Errors
    pub use clot_core::ConstantsError;
    pub use clot_engine::{ConfigError, SetupError};
    pub use clot_mesh::MeshError;
    pub use clot_species::WiringError;

    // Kinetics
    pub use clot_kinetics::{ReleaseProfile, ReleaseTracker};

    // Engine
    pub use clot_engine::{
        FieldStore, MemoryStore, ReactionConfig, ReactionSystem, StepMetrics, StoredField,
    };
}
