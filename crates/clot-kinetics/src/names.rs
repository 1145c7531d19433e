//! Group names, persisted field names and environment field declarations.

use clot_core::{Dimensions, FieldSpec};

/// Platelet group.
pub const PLATELET: &str = "platelet";
/// Subendothelium-bound enzyme group (coagulation only).
pub const SE_BOUND: &str = "se_bound";
/// Fluid-phase zymogen/enzyme group.
pub const FLUID_PHASE: &str = "fluid_phase";
/// Platelet-bound chemistry group (coagulation only).
pub const PLATELET_BOUND: &str = "platelet_bound";

/// Platelet-deposition indicator, the momentum drag source.
pub const ETA: &str = "eta";
/// Injury-adhesion indicator.
pub const HADH: &str = "Hadh";
/// Released ADP concentration.
pub const ADP: &str = "ADP";
/// Local shear rate from the flow solver.
pub const SHEAR_RATE: &str = "shearRate";
/// Total platelet volume fraction.
pub const THETA_T: &str = "Theta_T";
/// Bound platelet volume fraction.
pub const THETA_B: &str = "Theta_B";
/// ADP release source for the flow solver's ADP transport equation.
pub const SIGMA_RELEASE: &str = "sigma_release";

/// Mobile unactivated platelets.
pub const PLT_PMU: &str = "plt_Pmu";
/// Mobile activated platelets.
pub const PLT_PMA: &str = "plt_Pma";
/// Platelets bound to other platelets.
pub const PLT_PBA: &str = "plt_Pba";
/// Platelets bound to the subendothelium.
pub const PLT_PBSE: &str = "plt_Pbse";

/// Free subendothelial enzyme.
pub const SE_E0: &str = "seBound_E0";
/// Subendothelial enzyme-substrate complex.
pub const SE_C0: &str = "seBound_C0";

/// Fluid-phase zymogen 1.
pub const FP_S1: &str = "fluidPhase_S1";
/// Fluid-phase zymogen 2 (prothrombin).
pub const FP_S2: &str = "fluidPhase_S2";
/// Fluid-phase enzyme 1.
pub const FP_E1: &str = "fluidPhase_E1";
/// Fluid-phase enzyme 2 (thrombin).
pub const FP_E2: &str = "fluidPhase_E2";

/// Platelet-bound zymogen 1.
pub const PB_S1B: &str = "pltBound_S1b";
/// Platelet-bound zymogen 2.
pub const PB_S2B: &str = "pltBound_S2b";
/// Platelet-bound enzyme 1.
pub const PB_E1B: &str = "pltBound_E1b";
/// Platelet-bound enzyme 2.
pub const PB_E2B: &str = "pltBound_E2b";
/// Complex of enzyme 1 with zymogen 2.
pub const PB_C1: &str = "pltBound_C1";
/// Complex of enzyme 2 with zymogen 1.
pub const PB_C2: &str = "pltBound_C2";

/// ADP release source dimensions, concentration per time.
pub const SOURCE: Dimensions = Dimensions::new(0, -3, -1, 1);

/// Environment fields read or written by the groups, in setup order.
///
/// `eta` and `Hadh` must be stored; the rest default to zero.
pub fn environment_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::fraction(ETA).must_read(),
        FieldSpec::fraction(HADH).must_read(),
        FieldSpec::concentration(ADP, Dimensions::CONCENTRATION),
        FieldSpec::concentration(SHEAR_RATE, Dimensions::RATE),
        FieldSpec::fraction(THETA_T),
        FieldSpec::fraction(THETA_B),
        FieldSpec::concentration(SIGMA_RELEASE, SOURCE),
    ]
}
