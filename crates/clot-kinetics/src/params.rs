//! Kinetic parameter bundles read from the constants bundle.
//!
//! Every group takes its parameters by value at construction, so rate
//! laws never perform string lookups in the hot loop.

use clot_core::{Constants, ConstantsError, Dimensions};

const C: Dimensions = Dimensions::CONCENTRATION;
const N: Dimensions = Dimensions::NUMBER_DENSITY;
const R: Dimensions = Dimensions::RATE;
const K2: Dimensions = Dimensions::BIMOLECULAR_RATE;

/// Platelet activation, adhesion and cohesion constants.
#[derive(Clone, Debug, PartialEq)]
pub struct PlateletParams {
    /// Maximum packing density `Pmax`.
    pub pmax: f64,
    /// ADP-driven activation rate `k_adp_act`.
    pub k_adp_act: f64,
    /// ADP half-saturation `ADP_crit`.
    pub adp_crit: f64,
    /// Thrombin-driven activation rate `k_e2_act`.
    pub k_e2_act: f64,
    /// Thrombin half-saturation `E2_crit`.
    pub e2_crit: f64,
    /// Reference shear for adhesion enhancement `gamma_adh_ref`; `None`
    /// disables shear dependence.
    pub gamma_adh_ref: Option<f64>,
    /// Subendothelial capacity `Pse_max`.
    pub pse_max: f64,
    /// Adhesion rate to the injury `k_adh`.
    pub k_adh: f64,
    /// Cohesion rate to bound platelets `k_coh`.
    pub k_coh: f64,
    /// Platelet diameter `Pdiam`, sets the `Hadh` smoothing length.
    pub pdiam: f64,
    /// Deposition length `l_D_eta` of the `eta` diffusion half-step.
    pub l_d_eta: f64,
    /// Linear decay `lambda_eta` of the `eta` half-step (default 0).
    pub lambda_eta: f64,
}

impl PlateletParams {
    /// Read from the constants bundle.
    ///
    /// # Errors
    ///
    /// The first missing or mis-dimensioned key, or a rate-law divisor
    /// (`Pmax`, `ADP_crit`, `E2_crit`, `Pse_max`, `gamma_adh_ref`) that is
    /// not positive.
    pub fn from_constants(c: &Constants) -> Result<Self, ConstantsError> {
        Ok(Self {
            pmax: c.require_positive("Pmax", N)?,
            k_adp_act: c.require("k_adp_act", R)?,
            adp_crit: c.require_positive("ADP_crit", C)?,
            k_e2_act: c.require("k_e2_act", R)?,
            e2_crit: c.require_positive("E2_crit", C)?,
            gamma_adh_ref: c.optional_positive("gamma_adh_ref", R)?,
            pse_max: c.require_positive("Pse_max", N)?,
            k_adh: c.require("k_adh", R)?,
            k_coh: c.require("k_coh", R)?,
            pdiam: c.require("Pdiam", Dimensions::LENGTH)?,
            l_d_eta: c.require("l_D_eta", Dimensions::LENGTH)?,
            lambda_eta: c.get_or("lambda_eta", Dimensions::DIMLESS, 0.0)?,
        })
    }
}

/// Platelet binding of one fluid-phase species.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Binding {
    /// Binding sites per platelet `N_X`, moles per platelet.
    pub sites: f64,
    /// On-rate `kon_X`.
    pub kon: f64,
    /// Off-rate `koff_X`.
    pub koff: f64,
}

impl Binding {
    fn read(c: &Constants, species: &str) -> Result<Self, ConstantsError> {
        Ok(Self {
            sites: c.require(&format!("N_{species}"), Dimensions::MOLES)?,
            kon: c.require(&format!("kon_{species}"), K2)?,
            koff: c.require(&format!("koff_{species}"), R)?,
        })
    }

    /// Net binding flux `kon * free * sites - koff * bound`, with
    /// `sites = N * bound_platelets`.
    #[inline]
    pub fn flux(&self, free: f64, bound: f64, bound_platelets: f64) -> f64 {
        self.kon * free * self.sites * bound_platelets - self.koff * bound
    }
}

/// Coagulation cascade constants.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChemParams {
    /// Subendothelial enzyme on-rate `k0_on`.
    pub k0_on: f64,
    /// Subendothelial enzyme off-rate `k0_off`.
    pub k0_off: f64,
    /// Subendothelial catalytic rate `k0_cat`.
    pub k0_cat: f64,
    /// Initial subendothelial enzyme at the injury `E0_init`.
    pub e0_init: f64,
    /// Binding of S1, S2, E1, E2 to activated platelets.
    pub binding: [Binding; 4],
    /// Inhibition of E1 `k_E1_inh` (default 0).
    pub k_e1_inh: f64,
    /// Inhibition of E2 `k_E2_inh` (default 0).
    pub k_e2_inh: f64,
    /// E1b + S2b association `k1_on`.
    pub k1_on: f64,
    /// C1 dissociation `k1_off`.
    pub k1_off: f64,
    /// C1 catalysis `k1_cat`.
    pub k1_cat: f64,
    /// E2b + S1b association `k2_on`.
    pub k2_on: f64,
    /// C2 dissociation `k2_off`.
    pub k2_off: f64,
    /// C2 catalysis `k2_cat`.
    pub k2_cat: f64,
}

impl ChemParams {
    /// Read the full cascade.
    ///
    /// # Errors
    ///
    /// The first missing or mis-dimensioned key.
    pub fn from_constants(c: &Constants) -> Result<Self, ConstantsError> {
        Ok(Self {
            k0_on: c.require("k0_on", K2)?,
            k0_off: c.require("k0_off", R)?,
            k0_cat: c.require("k0_cat", R)?,
            e0_init: c.require("E0_init", C)?,
            binding: [
                Binding::read(c, "S1")?,
                Binding::read(c, "S2")?,
                Binding::read(c, "E1")?,
                Binding::read(c, "E2")?,
            ],
            k1_on: c.require("k1_on", K2)?,
            k1_off: c.require("k1_off", R)?,
            k1_cat: c.require("k1_cat", R)?,
            k2_on: c.require("k2_on", K2)?,
            k2_off: c.require("k2_off", R)?,
            k2_cat: c.require("k2_cat", R)?,
            ..Self::fluid_only(c)?
        })
    }

    /// Read only what the fluid phase needs when coagulation is disabled:
    /// the inhibition rates. Everything else is zero.
    ///
    /// # Errors
    ///
    /// A mis-dimensioned or non-finite inhibition constant.
    pub fn fluid_only(c: &Constants) -> Result<Self, ConstantsError> {
        Ok(Self {
            k_e1_inh: c.get_or("k_E1_inh", R, 0.0)?,
            k_e2_inh: c.get_or("k_E2_inh", R, 0.0)?,
            ..Self::default()
        })
    }
}
