//! Platelet activation, adhesion and cohesion.
//!
//! Four platelet populations per cell, in slot order:
//!
//! | slot | field      | meaning                                 |
//! |------|------------|-----------------------------------------|
//! | 0    | `plt_Pmu`  | mobile, unactivated                     |
//! | 1    | `plt_Pma`  | mobile, activated                       |
//! | 2    | `plt_Pba`  | bound to other platelets                |
//! | 3    | `plt_Pbse` | bound to the subendothelium             |
//!
//! Mobile platelets activate through ADP and thrombin (`fluidPhase_E2`),
//! adhere where the injury indicator `Hadh` is set, and activated mobile
//! platelets cohere to the growing deposit marked by `eta`. The law
//! conserves `Pmu + Pma + Pba + Pbse` exactly.

use clot_core::{Dimensions, FieldSpec, GroupId};
use clot_species::{
    EnvHandle, Environment, GroupFields, Linker, RateContext, SpeciesGroup, WiringError,
};

use crate::names;
use crate::params::PlateletParams;

/// Slot of `plt_Pmu`.
pub const PMU: usize = 0;
/// Slot of `plt_Pma`.
pub const PMA: usize = 1;
/// Slot of `plt_Pba`.
pub const PBA: usize = 2;
/// Slot of `plt_Pbse`.
pub const PBSE: usize = 3;

#[derive(Clone, Copy, Debug)]
struct Links {
    fluid: GroupId,
    eta: EnvHandle,
    hadh: EnvHandle,
    adp: EnvHandle,
    shear: EnvHandle,
    theta_t: EnvHandle,
    theta_b: EnvHandle,
}

/// The platelet species group.
pub struct PlateletGroup {
    params: PlateletParams,
    fields: GroupFields,
    links: Option<Links>,
}

impl PlateletGroup {
    /// Create with unfilled slots.
    pub fn new(params: PlateletParams) -> Self {
        Self {
            params,
            fields: GroupFields::sized(names::PLATELET, Self::specs()),
            links: None,
        }
    }

    /// Slot declarations.
    pub fn specs() -> Vec<FieldSpec> {
        let n = Dimensions::NUMBER_DENSITY;
        vec![
            FieldSpec::concentration(names::PLT_PMU, n).must_read().mobile(),
            FieldSpec::concentration(names::PLT_PMA, n).must_read().mobile(),
            FieldSpec::concentration(names::PLT_PBA, n),
            FieldSpec::concentration(names::PLT_PBSE, n),
        ]
    }

    /// Parameters.
    pub fn params(&self) -> &PlateletParams {
        &self.params
    }

    fn links(&self) -> Links {
        match self.links {
            Some(l) => l,
            None => panic!("group '{}' evaluated before wiring", names::PLATELET),
        }
    }

    /// Total and bound volume fractions in `cell`.
    pub fn fractions(&self, cell: usize) -> (f64, f64) {
        let f = &self.fields;
        let bound = f.value(PBA, cell) + f.value(PBSE, cell);
        let total = f.value(PMU, cell) + f.value(PMA, cell) + bound;
        (total / self.params.pmax, bound / self.params.pmax)
    }
}

impl SpeciesGroup for PlateletGroup {
    fn name(&self) -> &str {
        names::PLATELET
    }

    fn fields(&self) -> &GroupFields {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }

    fn wire(&mut self, linker: &mut Linker<'_>) -> Result<(), WiringError> {
        self.links = Some(Links {
            fluid: linker.require(names::FLUID_PHASE)?,
            eta: linker.env(names::ETA)?,
            hadh: linker.env(names::HADH)?,
            adp: linker.env(names::ADP)?,
            shear: linker.env(names::SHEAR_RATE)?,
            theta_t: linker.env(names::THETA_T)?,
            theta_b: linker.env(names::THETA_B)?,
        });
        Ok(())
    }

    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        let l = self.links();
        let p = &self.params;
        let f = &self.fields;
        let pmu = f.value(PMU, cell);
        let pma = f.value(PMA, cell);
        let pba = f.value(PBA, cell);
        let pbse = f.value(PBSE, cell);

        let adp = ctx.env(l.adp, cell).max(0.0);
        let e2 = ctx.value(l.fluid, crate::fluid_phase::E2, cell).max(0.0);
        let eta = ctx.env(l.eta, cell);
        let hadh = ctx.env(l.hadh, cell);
        let shear = ctx.env(l.shear, cell).abs();

        let theta_t = (pmu + pma + pba + pbse) / p.pmax;
        let free_space = (1.0 - theta_t).max(0.0);
        let k_act = p.k_adp_act * adp / (p.adp_crit + adp) + p.k_e2_act * e2 / (p.e2_crit + e2);
        let shear_factor = p.gamma_adh_ref.map_or(1.0, |g| 1.0 + shear / g);
        let se_space = (1.0 - pbse / p.pse_max).max(0.0);
        let adhesion = p.k_adh * shear_factor * hadh * se_space;
        let r_mu = adhesion * pmu;
        let r_ma = adhesion * pma;
        let r_coh = p.k_coh * eta * free_space * pma;

        out[PMU] = -k_act * pmu - r_mu;
        out[PMA] = k_act * pmu - r_ma - r_coh;
        out[PBA] = r_coh;
        out[PBSE] = r_mu + r_ma;
    }

    fn publish(&self, env: &mut Environment) {
        let l = self.links();
        for cell in 0..self.fields.cell_count() {
            let (total, bound) = self.fractions(cell);
            env.get_mut(l.theta_t).values_mut()[cell] = total.clamp(0.0, 1.0);
            env.get_mut(l.theta_b).values_mut()[cell] = bound.clamp(0.0, 1.0);
        }
    }
}
