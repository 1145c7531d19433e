//! Mesh-partition collaborators for the clot reaction core.
//!
//! The reaction kinetics are purely cell-local, but the adhesion half-step
//! needs a Laplacian and boundary-condition reapplication. This crate
//! defines the [`Mesh`] trait through which those operators see the
//! partition, along with small structured backends and the
//! [`ScalarField`] container.
//!
//! # Backends
//!
//! - [`Line1D`]: 1D row of cells with `left`/`right` patches
//! - [`Grid2D`]: 2D channel with `inlet`/`outlet`/`walls` patches and an
//!   optional `injuryWalls` segment
//!
//! # Operators
//!
//! [`fvm::laplacian`] evaluates an explicit Laplacian;
//! [`fvm::solve_diffusion`] solves an implicit diffusion-plus-decay system.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod field;
pub mod fvm;
pub mod grid2d;
pub mod line1d;
pub mod mesh;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::{BoundaryCondition, PatchField};
pub use error::MeshError;
pub use field::ScalarField;
pub use fvm::{SolverPerformance, SolverSettings, Stencil};
pub use grid2d::Grid2D;
pub use line1d::Line1D;
pub use mesh::{BoundaryFace, Face, Mesh, Patch};
