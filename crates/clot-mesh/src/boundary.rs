//! Boundary conditions and per-patch face values.
//!
//! Only reapplication is modelled here: a [`PatchField`] stores the face
//! values implied by its [`BoundaryCondition`], refreshed from the owning
//! cells by [`ScalarField::correct_boundary_conditions`](crate::ScalarField::correct_boundary_conditions).

/// Boundary condition attached to one patch of a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryCondition {
    /// Zero normal gradient: the face takes the owning cell's value. No
    /// diffusive flux crosses the face.
    ZeroGradient,
    /// Fixed face value.
    FixedValue(f64),
}

/// Face values of one field on one patch.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchField {
    condition: BoundaryCondition,
    values: Vec<f64>,
}

impl PatchField {
    /// Create a patch field with `faces` face values initialised from the
    /// condition (zero for zero-gradient until the first correction).
    pub fn new(condition: BoundaryCondition, faces: usize) -> Self {
        let init = match condition {
            BoundaryCondition::ZeroGradient => 0.0,
            BoundaryCondition::FixedValue(v) => v,
        };
        Self {
            condition,
            values: vec![init; faces],
        }
    }

    /// The attached condition.
    pub fn condition(&self) -> BoundaryCondition {
        self.condition
    }

    /// Face values, valid after the last boundary correction.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Whether the condition pins the face value.
    pub fn is_fixed(&self) -> bool {
        matches!(self.condition, BoundaryCondition::FixedValue(_))
    }
}
