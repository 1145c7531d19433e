//! Zymogens and enzymes carried by the plasma.
//!
//! Slots: `S1`, `S2`, `E1`, `E2`. Each species binds to sites on bound
//! platelets (exchanging with the platelet-bound group), `S1` is converted
//! to `E1` by the subendothelial enzyme, and both enzymes are inhibited
//! at first order.
//!
//! The subendothelial and platelet-bound groups are optional siblings.
//! With coagulation disabled neither is registered, wiring resolves them
//! to `None`, and their terms vanish from the rate law.

use clot_core::{Dimensions, FieldSpec, GroupId};
use clot_species::{GroupFields, Linker, RateContext, SpeciesGroup, WiringError};

use crate::names;
use crate::params::ChemParams;
use crate::{platelet, platelet_bound, se_bound};

/// Slot of `fluidPhase_S1`.
pub const S1: usize = 0;
/// Slot of `fluidPhase_S2`.
pub const S2: usize = 1;
/// Slot of `fluidPhase_E1`.
pub const E1: usize = 2;
/// Slot of `fluidPhase_E2`.
pub const E2: usize = 3;

#[derive(Clone, Copy, Debug)]
struct Links {
    platelet: GroupId,
    se_bound: Option<GroupId>,
    platelet_bound: Option<GroupId>,
}

/// The fluid-phase species group.
pub struct FluidPhaseGroup {
    params: ChemParams,
    fields: GroupFields,
    links: Option<Links>,
}

impl FluidPhaseGroup {
    /// Create with unfilled slots.
    pub fn new(params: ChemParams) -> Self {
        Self {
            params,
            fields: GroupFields::sized(names::FLUID_PHASE, Self::specs()),
            links: None,
        }
    }

    /// Slot declarations.
    pub fn specs() -> Vec<FieldSpec> {
        let c = Dimensions::CONCENTRATION;
        vec![
            FieldSpec::concentration(names::FP_S1, c).must_read(),
            FieldSpec::concentration(names::FP_S2, c).must_read(),
            FieldSpec::concentration(names::FP_E1, c).must_read(),
            FieldSpec::concentration(names::FP_E2, c).must_read(),
        ]
    }

    /// Whether wiring found the subendothelial group.
    pub fn has_se_bound(&self) -> bool {
        self.links.is_some_and(|l| l.se_bound.is_some())
    }

    /// Whether wiring found the platelet-bound group.
    pub fn has_platelet_bound(&self) -> bool {
        self.links.is_some_and(|l| l.platelet_bound.is_some())
    }
}

/// Net platelet-binding flux of `S1, S2, E1, E2` in `cell`.
///
/// `free` are the fluid-phase values and `bound` the platelet-bound
/// counterparts `S1b, S2b, E1b, E2b`. Binding sites scale with the bound
/// platelet density `Pba + Pbse`.
pub(crate) fn binding_fluxes(
    params: &ChemParams,
    free: [f64; 4],
    bound: [f64; 4],
    bound_platelets: f64,
) -> [f64; 4] {
    let mut out = [0.0; 4];
    for (i, b) in params.binding.iter().enumerate() {
        out[i] = b.flux(free[i], bound[i], bound_platelets);
    }
    out
}

/// Density of platelets offering binding sites in `cell`.
pub(crate) fn bound_platelets(ctx: &RateContext<'_>, platelet: GroupId, cell: usize) -> f64 {
    ctx.value(platelet, platelet::PBA, cell) + ctx.value(platelet, platelet::PBSE, cell)
}

impl SpeciesGroup for FluidPhaseGroup {
    fn name(&self) -> &str {
        names::FLUID_PHASE
    }

    fn fields(&self) -> &GroupFields {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }

    fn wire(&mut self, linker: &mut Linker<'_>) -> Result<(), WiringError> {
        self.links = Some(Links {
            platelet: linker.require(names::PLATELET)?,
            se_bound: linker.optional(names::SE_BOUND),
            platelet_bound: linker.optional(names::PLATELET_BOUND),
        });
        Ok(())
    }

    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        let Some(l) = self.links else {
            panic!("group '{}' evaluated before wiring", names::FLUID_PHASE);
        };
        let p = &self.params;
        let f = &self.fields;
        let free = [
            f.value(S1, cell),
            f.value(S2, cell),
            f.value(E1, cell),
            f.value(E2, cell),
        ];

        let bind = match l.platelet_bound {
            Some(pb) => {
                let bound = [
                    ctx.value(pb, platelet_bound::S1B, cell),
                    ctx.value(pb, platelet_bound::S2B, cell),
                    ctx.value(pb, platelet_bound::E1B, cell),
                    ctx.value(pb, platelet_bound::E2B, cell),
                ];
                binding_fluxes(p, free, bound, bound_platelets(ctx, l.platelet, cell))
            }
            None => [0.0; 4],
        };

        let (se_uptake, se_release, se_product) = match l.se_bound {
            Some(se) => {
                let e0 = ctx.value(se, se_bound::E0, cell);
                let c0 = ctx.value(se, se_bound::C0, cell);
                (p.k0_on * e0 * free[S1], p.k0_off * c0, p.k0_cat * c0)
            }
            None => (0.0, 0.0, 0.0),
        };

        out[S1] = -se_uptake + se_release - bind[S1];
        out[S2] = -bind[S2];
        out[E1] = se_product - bind[E1] - p.k_e1_inh * free[E1];
        out[E2] = -bind[E2] - p.k_e2_inh * free[E2];
    }
}
