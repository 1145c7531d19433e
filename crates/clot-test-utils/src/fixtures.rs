//! Reusable constants, meshes and stores.
//!
//! Values are chosen so that every process acts on a time scale of order
//! one: tests can use `dt` between 0.01 and 0.5 and still see activation,
//! adhesion and enzyme production within a few steps.

use clot_core::{Constants, Dimensions};
use clot_engine::{MemoryStore, ReactionConfig, ReactionSystem, SetupError};
use clot_kinetics::{names, se_bound};
use clot_mesh::{BoundaryCondition, Grid2D, Line1D, Mesh, ScalarField};

/// Cell spacing of the fixture meshes.
pub const DX: f64 = 1e-6;

/// A row of `cells` cells with spacing [`DX`].
pub fn line(cells: usize) -> Line1D {
    Line1D::new(cells, DX).expect("fixture mesh")
}

/// A 4x8 channel with `injuryWalls` on lower-wall columns 2..6.
pub fn channel() -> Grid2D {
    Grid2D::with_injury(4, 8, DX, 2..6).expect("fixture mesh")
}

/// Every key read by setup, with moderate values.
pub fn standard_constants() -> Constants {
    let c = Dimensions::CONCENTRATION;
    let n = Dimensions::NUMBER_DENSITY;
    let r = Dimensions::RATE;
    let k2 = Dimensions::BIMOLECULAR_RATE;
    let mut b = Constants::builder()
        .label("M_rxn", 10)
        .scalar("Pmax", n, 10.0)
        .scalar("k_adp_act", r, 1.0)
        .scalar("ADP_crit", c, 0.5)
        .scalar("k_e2_act", r, 1.0)
        .scalar("E2_crit", c, 0.5)
        .scalar("gamma_adh_ref", r, 100.0)
        .scalar("Pse_max", n, 5.0)
        .scalar("k_adh", r, 2.0)
        .scalar("k_coh", r, 1.0)
        .scalar("Pdiam", Dimensions::LENGTH, 2.0 * DX)
        .scalar("l_D_eta", Dimensions::LENGTH, 2.0 * DX)
        .scalar("k0_on", k2, 1.0)
        .scalar("k0_off", r, 0.1)
        .scalar("k0_cat", r, 0.5)
        .scalar("E0_init", c, 1.0)
        .scalar("k1_on", k2, 1.0)
        .scalar("k1_off", r, 0.1)
        .scalar("k1_cat", r, 0.5)
        .scalar("k2_on", k2, 1.0)
        .scalar("k2_off", r, 0.1)
        .scalar("k2_cat", r, 0.5)
        .scalar("k_E1_inh", r, 0.05)
        .scalar("k_E2_inh", r, 0.05)
        .scalar("ADP_rel", Dimensions::MOLES, 0.2)
        .scalar("sigma_Tf", Dimensions::TIME, 1.0)
        .scalar("sigma_dt", Dimensions::TIME, 0.01);
    for species in ["S1", "S2", "E1", "E2"] {
        b = b
            .scalar(format!("N_{species}"), Dimensions::MOLES, 0.1)
            .scalar(format!("kon_{species}"), k2, 1.0)
            .scalar(format!("koff_{species}"), r, 0.1);
    }
    b.build()
}

/// [`standard_constants`] without the inhibition terms, so the cascade
/// conserves its total material.
pub fn conservative_constants() -> Constants {
    standard_constants()
        .iter()
        .filter(|s| !s.name.ends_with("_inh"))
        .cloned()
        .collect()
}

/// Initial values written by [`StoreSeed::seed`].
#[derive(Clone, Debug)]
pub struct StoreSeed {
    /// Uniform `plt_Pmu`.
    pub pmu: f64,
    /// Uniform `plt_Pma`.
    pub pma: f64,
    /// Uniform zymogen `fluidPhase_S1`.
    pub s1: f64,
    /// Uniform prothrombin `fluidPhase_S2`.
    pub s2: f64,
    /// Uniform `fluidPhase_E1`.
    pub e1: f64,
    /// Uniform thrombin `fluidPhase_E2`.
    pub e2: f64,
    /// `seBound_E0` on injury cells.
    pub e0_init: f64,
    /// `Hadh` on injury cells (zero elsewhere).
    pub hadh: f64,
    /// Uniform `eta`.
    pub eta: f64,
    /// Optional inlet value fixed on `plt_Pmu`'s first patch.
    pub pmu_inlet: Option<f64>,
}

impl Default for StoreSeed {
    fn default() -> Self {
        Self {
            pmu: 5.0,
            pma: 0.5,
            s1: 1.0,
            s2: 1.0,
            e1: 0.0,
            e2: 0.0,
            e0_init: 1.0,
            hadh: 1.0,
            eta: 0.0,
            pmu_inlet: None,
        }
    }
}

impl StoreSeed {
    /// A store holding every must-read field at `t = 0`.
    ///
    /// Cells adjacent to `injury_patch` get `Hadh = hadh` and
    /// `seBound_E0 = e0_init`.
    pub fn seed(&self, mesh: &dyn Mesh, injury_patch: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        let zg = |name: &str, dims: Dimensions, v: f64| ScalarField::zero_gradient(mesh, name, dims, v);
        let c = Dimensions::CONCENTRATION;
        let n = Dimensions::NUMBER_DENSITY;

        let mut hadh = zg(names::HADH, Dimensions::DIMLESS, 0.0);
        for cell in mesh.patch_cells(injury_patch) {
            hadh.values_mut()[cell] = self.hadh;
        }
        store.seed(0.0, &hadh);
        store.seed(0.0, &zg(names::ETA, Dimensions::DIMLESS, self.eta));

        let pmu = match self.pmu_inlet {
            Some(v) => {
                let mut bcs = vec![BoundaryCondition::ZeroGradient; mesh.patches().len()];
                bcs[0] = BoundaryCondition::FixedValue(v);
                ScalarField::uniform(mesh, names::PLT_PMU, n, self.pmu, bcs).expect("fixture field")
            }
            None => zg(names::PLT_PMU, n, self.pmu),
        };
        store.seed(0.0, &pmu);
        store.seed(0.0, &zg(names::PLT_PMA, n, self.pma));

        store.seed(0.0, &se_bound::initial_e0(mesh, injury_patch, self.e0_init));
        store.seed(0.0, &zg(names::SE_C0, c, 0.0));
        store.seed(0.0, &zg(names::FP_S1, c, self.s1));
        store.seed(0.0, &zg(names::FP_S2, c, self.s2));
        store.seed(0.0, &zg(names::FP_E1, c, self.e1));
        store.seed(0.0, &zg(names::FP_E2, c, self.e2));
        store.seed(0.0, &zg(names::PB_S1B, c, 0.0));
        store
    }
}

/// Build the standard model on `mesh` from [`standard_constants`] and a
/// default [`StoreSeed`].
pub fn build_system(
    mesh: Box<dyn Mesh>,
    injury_patch: &str,
    config: ReactionConfig,
) -> Result<ReactionSystem, SetupError> {
    let store = StoreSeed::default().seed(&*mesh, injury_patch);
    ReactionSystem::build(mesh, &standard_constants(), config, &store, 0.0)
}
