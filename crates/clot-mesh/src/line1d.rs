//! 1D row of cells.

use crate::error::MeshError;
use crate::mesh::{BoundaryFace, Face, Mesh, Patch};

/// A one-dimensional row of `len` cells of width `dx` and unit cross-section.
///
/// Cell `i` has neighbours `i - 1` and `i + 1` where they exist. The two
/// ends are boundary patches named [`LEFT`](Self::LEFT) and
/// [`RIGHT`](Self::RIGHT).
///
/// # Examples
///
/// ```
/// use clot_mesh::{Line1D, Mesh};
///
/// let line = Line1D::new(5, 0.1).unwrap();
/// assert_eq!(line.cell_count(), 5);
/// assert_eq!(line.internal_faces().len(), 4);
/// assert_eq!(line.patch_cells("left"), vec![0]);
/// assert_eq!(line.patch_cells("right"), vec![4]);
/// ```
#[derive(Debug, Clone)]
pub struct Line1D {
    len: usize,
    dx: f64,
    faces: Vec<Face>,
    patches: Vec<Patch>,
}

impl Line1D {
    /// Name of the patch at cell 0.
    pub const LEFT: &'static str = "left";
    /// Name of the patch at the last cell.
    pub const RIGHT: &'static str = "right";

    /// Create a line of `len` cells with spacing `dx`.
    ///
    /// Returns `Err(MeshError::EmptyMesh)` if `len == 0` and
    /// `Err(MeshError::InvalidGeometry)` unless `dx` is finite and positive.
    pub fn new(len: usize, dx: f64) -> Result<Self, MeshError> {
        if len == 0 {
            return Err(MeshError::EmptyMesh);
        }
        if !(dx > 0.0) || !dx.is_finite() {
            return Err(MeshError::InvalidGeometry {
                reason: format!("dx must be finite and positive, got {dx}"),
            });
        }
        let faces = (0..len - 1)
            .map(|i| Face {
                owner: i,
                neighbour: i + 1,
                area: 1.0,
                distance: dx,
            })
            .collect();
        let end = |cell| BoundaryFace {
            cell,
            area: 1.0,
            distance: dx / 2.0,
        };
        let patches = vec![
            Patch::new(Self::LEFT, vec![end(0)]),
            Patch::new(Self::RIGHT, vec![end(len - 1)]),
        ];
        Ok(Self {
            len,
            dx,
            faces,
            patches,
        })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always returns `false`; construction rejects `len == 0`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cell width.
    pub fn dx(&self) -> f64 {
        self.dx
    }
}

impl Mesh for Line1D {
    fn cell_count(&self) -> usize {
        self.len
    }

    fn cell_volume(&self, _cell: usize) -> f64 {
        self.dx
    }

    fn internal_faces(&self) -> &[Face] {
        &self.faces
    }

    fn patches(&self) -> &[Patch] {
        &self.patches
    }
}
