//! Error types for mesh construction and field containers.

use std::fmt;

/// Errors arising from mesh construction or field/mesh mismatches.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Attempted to construct a mesh with zero cells.
    EmptyMesh,
    /// A geometric parameter (spacing, extent) is not finite and positive.
    InvalidGeometry {
        /// What went wrong.
        reason: String,
    },
    /// Field data length does not match the mesh.
    SizeMismatch {
        /// Name of the field.
        field: String,
        /// Expected number of entries.
        expected: usize,
        /// Entries supplied.
        actual: usize,
    },
    /// A boundary condition references a patch the mesh does not have.
    UnknownPatch {
        /// The patch name.
        name: String,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "mesh must have at least one cell"),
            Self::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            Self::SizeMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "field '{field}' has {actual} entries, mesh expects {expected}"
            ),
            Self::UnknownPatch { name } => write!(f, "unknown boundary patch '{name}'"),
        }
    }
}

impl std::error::Error for MeshError {}
