//! 2D channel mesh with an optional injury segment on the lower wall.

use std::ops::Range;

use crate::error::MeshError;
use crate::mesh::{BoundaryFace, Face, Mesh, Patch};

/// A `rows x cols` channel of square cells, one cell thick.
///
/// Cells are numbered row-major: `index = row * cols + col`. Row 0 is the
/// upper wall, row `rows - 1` the lower wall. The west edge is the
/// [`INLET`](Self::INLET), the east edge the [`OUTLET`](Self::OUTLET).
/// Lower-wall faces whose column falls in the injury range form the
/// [`INJURY`](Self::INJURY) patch; every other wall face belongs to
/// [`WALLS`](Self::WALLS).
///
/// # Examples
///
/// ```
/// use clot_mesh::{Grid2D, Mesh};
///
/// let g = Grid2D::with_injury(4, 10, 1e-5, 3..6).unwrap();
/// assert_eq!(g.cell_count(), 40);
/// assert_eq!(g.patch_cells("injuryWalls"), vec![33, 34, 35]);
/// ```
#[derive(Debug, Clone)]
pub struct Grid2D {
    rows: usize,
    cols: usize,
    spacing: f64,
    faces: Vec<Face>,
    patches: Vec<Patch>,
}

impl Grid2D {
    /// West boundary.
    pub const INLET: &'static str = "inlet";
    /// East boundary.
    pub const OUTLET: &'static str = "outlet";
    /// Upper wall plus the uninjured part of the lower wall.
    pub const WALLS: &'static str = "walls";
    /// Injured segment of the lower wall.
    pub const INJURY: &'static str = "injuryWalls";

    /// Create a channel without an injury patch.
    pub fn new(rows: usize, cols: usize, spacing: f64) -> Result<Self, MeshError> {
        Self::with_injury(rows, cols, spacing, 0..0)
    }

    /// Create a channel whose lower-wall columns in `injury` form the
    /// `injuryWalls` patch. An empty range omits the patch entirely.
    pub fn with_injury(
        rows: usize,
        cols: usize,
        spacing: f64,
        injury: Range<usize>,
    ) -> Result<Self, MeshError> {
        if rows == 0 || cols == 0 {
            return Err(MeshError::EmptyMesh);
        }
        if !(spacing > 0.0) || !spacing.is_finite() {
            return Err(MeshError::InvalidGeometry {
                reason: format!("spacing must be finite and positive, got {spacing}"),
            });
        }
        if injury.end > cols || injury.start > injury.end {
            return Err(MeshError::InvalidGeometry {
                reason: format!(
                    "injury range {}..{} outside 0..{cols}",
                    injury.start, injury.end
                ),
            });
        }

        let area = spacing * spacing;
        let idx = |r: usize, c: usize| r * cols + c;
        let mut faces = Vec::with_capacity(rows * (cols - 1) + (rows - 1) * cols);
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    faces.push(Face {
                        owner: idx(r, c),
                        neighbour: idx(r, c + 1),
                        area,
                        distance: spacing,
                    });
                }
                if r + 1 < rows {
                    faces.push(Face {
                        owner: idx(r, c),
                        neighbour: idx(r + 1, c),
                        area,
                        distance: spacing,
                    });
                }
            }
        }

        let bf = |cell| BoundaryFace {
            cell,
            area,
            distance: spacing / 2.0,
        };
        let inlet = (0..rows).map(|r| bf(idx(r, 0))).collect();
        let outlet = (0..rows).map(|r| bf(idx(r, cols - 1))).collect();
        let mut walls: Vec<BoundaryFace> = (0..cols).map(|c| bf(idx(0, c))).collect();
        walls.extend(
            (0..cols)
                .filter(|c| !injury.contains(c))
                .map(|c| bf(idx(rows - 1, c))),
        );

        let mut patches = vec![
            Patch::new(Self::INLET, inlet),
            Patch::new(Self::OUTLET, outlet),
            Patch::new(Self::WALLS, walls),
        ];
        if !injury.is_empty() {
            let injured = injury.map(|c| bf(idx(rows - 1, c))).collect();
            patches.push(Patch::new(Self::INJURY, injured));
        }

        Ok(Self {
            rows,
            cols,
            spacing,
            faces,
            patches,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell edge length.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }
}

impl Mesh for Grid2D {
    fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    fn cell_volume(&self, _cell: usize) -> f64 {
        self.spacing * self.spacing * self.spacing
    }

    fn internal_faces(&self) -> &[Face] {
        &self.faces
    }

    fn patches(&self) -> &[Patch] {
        &self.patches
    }
}
