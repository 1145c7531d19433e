//! The [`Mesh`] trait and face/patch descriptors.

/// An internal face shared by two cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    /// Lower-indexed cell.
    pub owner: usize,
    /// Higher-indexed cell.
    pub neighbour: usize,
    /// Face area.
    pub area: f64,
    /// Distance between the two cell centres.
    pub distance: f64,
}

impl Face {
    /// Geometric diffusion coefficient `area / distance`.
    pub fn coefficient(&self) -> f64 {
        self.area / self.distance
    }
}

/// A face on the domain boundary, owned by a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryFace {
    /// Owning cell.
    pub cell: usize,
    /// Face area.
    pub area: f64,
    /// Distance from the cell centre to the face centre.
    pub distance: f64,
}

impl BoundaryFace {
    /// Geometric diffusion coefficient `area / distance`.
    pub fn coefficient(&self) -> f64 {
        self.area / self.distance
    }
}

/// A named group of boundary faces (inlet, walls, injury site, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    /// Patch name, used to attach boundary conditions.
    pub name: String,
    /// Faces in deterministic order.
    pub faces: Vec<BoundaryFace>,
}

impl Patch {
    /// Create a patch.
    pub fn new(name: impl Into<String>, faces: Vec<BoundaryFace>) -> Self {
        Self {
            name: name.into(),
            faces,
        }
    }

    /// Number of faces on the patch.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the patch has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// A partition-local finite-volume mesh.
///
/// This is the collaborator contract through which the reaction core
/// sees the flow solver's mesh. The kinetics only need `cell_count`; the
/// adhesion half-step and the optional `Hadh` smoothing pass also use the
/// face connectivity and patches.
///
/// # Thread Safety
///
/// `Sync` is required so a mesh can be shared between the driver and
/// any per-cell parallel loop the host framework runs.
pub trait Mesh: Send + Sync + 'static {
    /// Number of cells owned by this partition.
    fn cell_count(&self) -> usize;

    /// Volume of a cell.
    fn cell_volume(&self, cell: usize) -> f64;

    /// All internal faces.
    fn internal_faces(&self) -> &[Face];

    /// All boundary patches, in a fixed order.
    fn patches(&self) -> &[Patch];

    /// Index of the patch called `name`.
    fn patch_index(&self, name: &str) -> Option<usize> {
        self.patches().iter().position(|p| p.name == name)
    }

    /// Cells adjacent to the patch called `name`, without duplicates.
    ///
    /// Returns an empty list if the patch does not exist.
    fn patch_cells(&self, name: &str) -> Vec<usize> {
        let Some(idx) = self.patch_index(name) else {
            return Vec::new();
        };
        let mut cells: Vec<usize> = self.patches()[idx].faces.iter().map(|f| f.cell).collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}
