//! Zymogens, enzymes and enzyme complexes on activated platelet surfaces.
//!
//! Slot order: `S1b`, `S2b`, `E1b`, `E2b`, `C1`, `C2`. Bound `E1b` forms
//! `C1` with `S2b` and converts it to `E2b`; bound `E2b` forms `C2` with
//! `S1b` and converts it to `E1b`. The four bound species exchange with
//! the fluid phase through the same binding fluxes the fluid-phase group
//! loses, so the total of free, bound and complexed material is conserved
//! in the absence of inhibition.

use clot_core::{Dimensions, FieldSpec, GroupId};
use clot_species::{GroupFields, Linker, RateContext, SpeciesGroup, WiringError};

use crate::fluid_phase::{self, binding_fluxes, bound_platelets};
use crate::names;
use crate::params::ChemParams;

/// Slot of `pltBound_S1b`.
pub const S1B: usize = 0;
/// Slot of `pltBound_S2b`.
pub const S2B: usize = 1;
/// Slot of `pltBound_E1b`.
pub const E1B: usize = 2;
/// Slot of `pltBound_E2b`.
pub const E2B: usize = 3;
/// Slot of `pltBound_C1`.
pub const C1: usize = 4;
/// Slot of `pltBound_C2`.
pub const C2: usize = 5;

/// The platelet-bound species group. Only built when coagulation reactions
/// are enabled.
pub struct PlateletBoundGroup {
    params: ChemParams,
    fields: GroupFields,
    links: Option<(GroupId, GroupId)>,
}

impl PlateletBoundGroup {
    /// Create with unfilled slots.
    pub fn new(params: ChemParams) -> Self {
        Self {
            params,
            fields: GroupFields::sized(names::PLATELET_BOUND, Self::specs()),
            links: None,
        }
    }

    /// Slot declarations.
    pub fn specs() -> Vec<FieldSpec> {
        let c = Dimensions::CONCENTRATION;
        vec![
            FieldSpec::concentration(names::PB_S1B, c).must_read(),
            FieldSpec::concentration(names::PB_S2B, c),
            FieldSpec::concentration(names::PB_E1B, c),
            FieldSpec::concentration(names::PB_E2B, c),
            FieldSpec::concentration(names::PB_C1, c),
            FieldSpec::concentration(names::PB_C2, c),
        ]
    }
}

impl SpeciesGroup for PlateletBoundGroup {
    fn name(&self) -> &str {
        names::PLATELET_BOUND
    }

    fn fields(&self) -> &GroupFields {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }

    fn wire(&mut self, linker: &mut Linker<'_>) -> Result<(), WiringError> {
        let platelet = linker.require(names::PLATELET)?;
        let fluid = linker.require(names::FLUID_PHASE)?;
        self.links = Some((platelet, fluid));
        Ok(())
    }

    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        let Some((platelet, fluid)) = self.links else {
            panic!("group '{}' evaluated before wiring", names::PLATELET_BOUND);
        };
        let p = &self.params;
        let f = &self.fields;
        let s1b = f.value(S1B, cell);
        let s2b = f.value(S2B, cell);
        let e1b = f.value(E1B, cell);
        let e2b = f.value(E2B, cell);
        let c1 = f.value(C1, cell);
        let c2 = f.value(C2, cell);

        let free = [
            ctx.value(fluid, fluid_phase::S1, cell),
            ctx.value(fluid, fluid_phase::S2, cell),
            ctx.value(fluid, fluid_phase::E1, cell),
            ctx.value(fluid, fluid_phase::E2, cell),
        ];
        let bind = binding_fluxes(
            p,
            free,
            [s1b, s2b, e1b, e2b],
            bound_platelets(ctx, platelet, cell),
        );

        let r1 = p.k1_on * s2b * e1b - p.k1_off * c1;
        let r1c = p.k1_cat * c1;
        let r2 = p.k2_on * s1b * e2b - p.k2_off * c2;
        let r2c = p.k2_cat * c2;

        out[S1B] = bind[0] - r2;
        out[S2B] = bind[1] - r1;
        out[E1B] = bind[2] - r1 + r1c + r2c;
        out[E2B] = bind[3] - r2 + r2c + r1c;
        out[C1] = r1 - r1c;
        out[C2] = r2 - r2c;
    }
}
