//! Partition-local scalar field with boundary-condition metadata.

use clot_core::Dimensions;

use crate::boundary::{BoundaryCondition, PatchField};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// A named, dimensioned cell-centred scalar with one [`PatchField`] per
/// mesh patch.
///
/// Face values are only meaningful after
/// [`correct_boundary_conditions`](Self::correct_boundary_conditions); any
/// operation that changes cell values leaves them stale until the next
/// correction.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    name: String,
    dimensions: Dimensions,
    values: Vec<f64>,
    patches: Vec<PatchField>,
}

/// Map `(patch name, condition)` pairs onto the mesh's patch order.
/// Patches not listed default to [`BoundaryCondition::ZeroGradient`].
///
/// # Errors
///
/// [`MeshError::UnknownPatch`] if a name does not exist on the mesh.
pub fn resolve_conditions(
    mesh: &dyn Mesh,
    named: &[(&str, BoundaryCondition)],
) -> Result<Vec<BoundaryCondition>, MeshError> {
    let mut out = vec![BoundaryCondition::ZeroGradient; mesh.patches().len()];
    for (name, bc) in named {
        let idx = mesh
            .patch_index(name)
            .ok_or_else(|| MeshError::UnknownPatch {
                name: (*name).to_string(),
            })?;
        out[idx] = *bc;
    }
    Ok(out)
}

impl ScalarField {
    /// Create a field from explicit cell values and one condition per patch.
    ///
    /// # Errors
    ///
    /// [`MeshError::SizeMismatch`] if `values` or `conditions` do not match
    /// the mesh's cell or patch count.
    pub fn new(
        mesh: &dyn Mesh,
        name: impl Into<String>,
        dimensions: Dimensions,
        values: Vec<f64>,
        conditions: Vec<BoundaryCondition>,
    ) -> Result<Self, MeshError> {
        let name = name.into();
        if values.len() != mesh.cell_count() {
            return Err(MeshError::SizeMismatch {
                field: name,
                expected: mesh.cell_count(),
                actual: values.len(),
            });
        }
        if conditions.len() != mesh.patches().len() {
            return Err(MeshError::SizeMismatch {
                field: format!("{name}.boundaryField"),
                expected: mesh.patches().len(),
                actual: conditions.len(),
            });
        }
        let patches = mesh
            .patches()
            .iter()
            .zip(conditions)
            .map(|(p, bc)| PatchField::new(bc, p.len()))
            .collect();
        Ok(Self {
            name,
            dimensions,
            values,
            patches,
        })
    }

    /// Create a uniform field.
    pub fn uniform(
        mesh: &dyn Mesh,
        name: impl Into<String>,
        dimensions: Dimensions,
        value: f64,
        conditions: Vec<BoundaryCondition>,
    ) -> Result<Self, MeshError> {
        Self::new(
            mesh,
            name,
            dimensions,
            vec![value; mesh.cell_count()],
            conditions,
        )
    }

    /// Create a uniform field with zero-gradient conditions on every patch.
    pub fn zero_gradient(
        mesh: &dyn Mesh,
        name: impl Into<String>,
        dimensions: Dimensions,
        value: f64,
    ) -> Self {
        let patches = mesh
            .patches()
            .iter()
            .map(|p| PatchField::new(BoundaryCondition::ZeroGradient, p.len()))
            .collect();
        Self {
            name: name.into(),
            dimensions,
            values: vec![value; mesh.cell_count()],
            patches,
        }
    }

    /// Create a uniform field that copies the boundary layout of `template`.
    pub fn like(
        template: &ScalarField,
        name: impl Into<String>,
        dimensions: Dimensions,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            dimensions,
            values: vec![value; template.values.len()],
            patches: template
                .patches
                .iter()
                .map(|p| PatchField::new(p.condition(), p.values().len()))
                .collect(),
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable cell values. Face values go stale until the next correction.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Value in one cell.
    pub fn get(&self, cell: usize) -> f64 {
        self.values[cell]
    }

    /// Overwrite all cell values.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the field length.
    pub fn assign(&mut self, values: &[f64]) {
        assert_eq!(
            values.len(),
            self.values.len(),
            "assign to '{}': length mismatch",
            self.name
        );
        self.values.copy_from_slice(values);
    }

    /// Per-patch boundary data, in mesh patch order.
    pub fn patches(&self) -> &[PatchField] {
        &self.patches
    }

    /// Refresh face values from the boundary conditions and owning cells.
    pub fn correct_boundary_conditions(&mut self, mesh: &dyn Mesh) {
        for (patch, pf) in mesh.patches().iter().zip(self.patches.iter_mut()) {
            match pf.condition() {
                BoundaryCondition::ZeroGradient => {
                    for (face, v) in patch.faces.iter().zip(pf.values_mut()) {
                        *v = self.values[face.cell];
                    }
                }
                BoundaryCondition::FixedValue(fixed) => pf.values_mut().fill(fixed),
            }
        }
    }

    /// Clamp every cell value into `[lo, hi]`. NaN cells map to `lo`.
    ///
    /// Returns the number of cells that changed.
    pub fn clamp(&mut self, lo: f64, hi: f64) -> usize {
        let mut changed = 0;
        for v in self.values.iter_mut() {
            let c = if v.is_nan() { lo } else { v.clamp(lo, hi) };
            // NaN compares unequal to everything, so it is counted too.
            if c != *v {
                changed += 1;
                *v = c;
            }
        }
        changed
    }

    /// Smallest cell value, or `None` for an empty field.
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// Largest cell value, or `None` for an empty field.
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}
