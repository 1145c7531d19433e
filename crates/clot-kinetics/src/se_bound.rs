//! Enzyme bound to the exposed subendothelium at the injury.
//!
//! The free enzyme `E0` converts fluid-phase zymogen `S1` into enzyme
//! `E1` through the complex `C0`. `E0 + C0` is conserved per cell.

use clot_core::{Dimensions, FieldSpec, GroupId};
use clot_mesh::{Mesh, ScalarField};
use clot_species::{GroupFields, Linker, RateContext, SpeciesGroup, WiringError};

use crate::names;
use crate::params::ChemParams;

/// Slot of `seBound_E0`.
pub const E0: usize = 0;
/// Slot of `seBound_C0`.
pub const C0: usize = 1;

/// The subendothelium-bound species group. Only built when coagulation
/// reactions are enabled.
pub struct SeBoundGroup {
    params: ChemParams,
    fields: GroupFields,
    fluid: Option<GroupId>,
}

impl SeBoundGroup {
    /// Create with unfilled slots.
    pub fn new(params: ChemParams) -> Self {
        Self {
            params,
            fields: GroupFields::sized(names::SE_BOUND, Self::specs()),
            fluid: None,
        }
    }

    /// Slot declarations.
    pub fn specs() -> Vec<FieldSpec> {
        let c = Dimensions::CONCENTRATION;
        vec![
            FieldSpec::concentration(names::SE_E0, c).must_read(),
            FieldSpec::concentration(names::SE_C0, c).must_read(),
        ]
    }
}

/// Initial `seBound_E0`: `e0_init` in every cell owning a face of the
/// injury patch, zero elsewhere.
///
/// A mesh without the patch yields an all-zero field.
pub fn initial_e0(mesh: &dyn Mesh, injury_patch: &str, e0_init: f64) -> ScalarField {
    let mut field = ScalarField::zero_gradient(mesh, names::SE_E0, Dimensions::CONCENTRATION, 0.0);
    for cell in mesh.patch_cells(injury_patch) {
        field.values_mut()[cell] = e0_init;
    }
    field
}

impl SpeciesGroup for SeBoundGroup {
    fn name(&self) -> &str {
        names::SE_BOUND
    }

    fn fields(&self) -> &GroupFields {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }

    fn wire(&mut self, linker: &mut Linker<'_>) -> Result<(), WiringError> {
        self.fluid = Some(linker.require(names::FLUID_PHASE)?);
        Ok(())
    }

    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        let Some(fluid) = self.fluid else {
            panic!("group '{}' evaluated before wiring", names::SE_BOUND);
        };
        let p = &self.params;
        let e0 = self.fields.value(E0, cell);
        let c0 = self.fields.value(C0, cell);
        let s1 = ctx.value(fluid, crate::fluid_phase::S1, cell);
        let bind = p.k0_on * e0 * s1 - (p.k0_off + p.k0_cat) * c0;
        out[E0] = -bind;
        out[C0] = bind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clot_mesh::Grid2D;

    #[test]
    fn initial_e0_marks_injury_cells() {
        let g = Grid2D::with_injury(3, 5, 1.0, 1..3).unwrap();
        let e0 = initial_e0(&g, Grid2D::INJURY, 2.5);
        let marked: Vec<usize> = (0..15).filter(|&c| e0.get(c) > 0.0).collect();
        assert_eq!(marked, vec![11, 12]);
        assert_eq!(e0.get(11), 2.5);
    }

    #[test]
    fn initial_e0_without_injury_is_zero() {
        let g = Grid2D::new(2, 2, 1.0).unwrap();
        let e0 = initial_e0(&g, Grid2D::INJURY, 2.5);
        assert_eq!(e0.max(), Some(0.0));
    }
}
