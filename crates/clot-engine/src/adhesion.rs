//! The adhesion-indicator half-step and `Hadh` smoothing.
//!
//! `eta` marks where platelets have deposited and feeds the drag term of
//! the momentum equation. Each flow step resets it from the bound
//! fraction and spreads it over the deposition length `l_D_eta`:
//!
//! ```text
//! eta := clamp(Theta_B, 0, 1)
//! correct BCs
//! (1 + lambda_eta) eta - (l_D_eta^2 / 4) laplacian(eta) = eta_old
//! correct BCs
//! eta := clamp(eta, 0, 1)
//! ```
//!
//! The ordering is fixed; both clamps are needed because fixed-value
//! patches may hold values outside `[0, 1]`.

use clot_kinetics::PlateletParams;
use clot_mesh::fvm::{laplacian, solve_diffusion};
use clot_mesh::{Mesh, ScalarField, SolverPerformance, SolverSettings, Stencil};

/// Lengths and rates of the half-step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdhesionParams {
    /// Deposition length `l_D_eta`.
    pub l_d_eta: f64,
    /// Linear decay `lambda_eta` (dimensionless, default 0).
    pub lambda_eta: f64,
    /// Platelet diameter, sets the `Hadh` smoothing length.
    pub pdiam: f64,
}

impl AdhesionParams {
    /// Diffusion coefficient of the implicit solve, `l_D_eta^2 / 4`.
    pub fn eta_gamma(&self) -> f64 {
        self.l_d_eta * self.l_d_eta / 4.0
    }

    /// Smoothing coefficient of `Hadh`, `D_H^2 / 4` with `D_H = 0.25 Pdiam`.
    pub fn hadh_gamma(&self) -> f64 {
        let d_h = 0.25 * self.pdiam;
        d_h * d_h / 4.0
    }
}

impl From<&PlateletParams> for AdhesionParams {
    fn from(p: &PlateletParams) -> Self {
        Self {
            l_d_eta: p.l_d_eta,
            lambda_eta: p.lambda_eta,
            pdiam: p.pdiam,
        }
    }
}

/// Outcome of one [`eta_half_step`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HalfStepReport {
    /// Implicit solver statistics.
    pub solver: SolverPerformance,
    /// Cells changed by the two clamps.
    pub clamped: usize,
}

/// Run the `eta` half-step in place.
///
/// # Panics
///
/// Panics if `eta`, `theta_b` and the stencil disagree on cell count.
pub fn eta_half_step(
    mesh: &dyn Mesh,
    stencil: &Stencil,
    eta: &mut ScalarField,
    theta_b: &ScalarField,
    params: &AdhesionParams,
    settings: SolverSettings,
) -> HalfStepReport {
    eta.assign(theta_b.values());
    let mut clamped = eta.clamp(0.0, 1.0);
    eta.correct_boundary_conditions(mesh);
    let solver = solve_diffusion(
        stencil,
        eta,
        params.eta_gamma(),
        params.lambda_eta,
        settings,
    );
    if !solver.converged {
        log::warn!(
            "{} solve did not converge: residual {:.3e} after {} sweeps",
            eta.name(),
            solver.final_residual,
            solver.iterations
        );
    }
    eta.correct_boundary_conditions(mesh);
    clamped += eta.clamp(0.0, 1.0);
    HalfStepReport { solver, clamped }
}

/// Smooth `Hadh` once: `Hadh := clamp(Hadh + (D_H^2/4) laplacian(Hadh), 0, 1)`.
///
/// Returns the number of cells the clamp changed.
pub fn smooth_hadh(mesh: &dyn Mesh, hadh: &mut ScalarField, params: &AdhesionParams) -> usize {
    hadh.correct_boundary_conditions(mesh);
    let lap = laplacian(mesh, hadh, params.hadh_gamma());
    for (v, l) in hadh.values_mut().iter_mut().zip(&lap) {
        *v += l;
    }
    let clamped = hadh.clamp(0.0, 1.0);
    hadh.correct_boundary_conditions(mesh);
    log::debug!("smoothed {} with D_H = {:.3e}", hadh.name(), 0.25 * params.pdiam);
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use clot_core::Dimensions;
    use clot_mesh::{BoundaryCondition, Line1D};
    use proptest::prelude::*;

    fn params(l: f64) -> AdhesionParams {
        AdhesionParams {
            l_d_eta: l,
            lambda_eta: 0.0,
            pdiam: 1.0,
        }
    }

    #[test]
    fn zero_length_copies_clamped_theta_b() {
        let m = Line1D::new(3, 1.0).unwrap();
        let s = Stencil::new(&m);
        let mut eta = ScalarField::zero_gradient(&m, "eta", Dimensions::DIMLESS, 0.0);
        let mut tb = ScalarField::zero_gradient(&m, "Theta_B", Dimensions::DIMLESS, 0.0);
        tb.assign(&[-0.5, 0.3, 1.7]);
        let r = eta_half_step(&m, &s, &mut eta, &tb, &params(0.0), SolverSettings::default());
        assert_eq!(eta.values(), &[0.0, 0.3, 1.0]);
        assert_eq!(r.clamped, 2);
        assert!(r.solver.converged);
    }

    #[test]
    fn spreading_conserves_mass_with_zero_gradient() {
        let m = Line1D::new(5, 1.0).unwrap();
        let s = Stencil::new(&m);
        let mut eta = ScalarField::zero_gradient(&m, "eta", Dimensions::DIMLESS, 0.0);
        let mut tb = ScalarField::zero_gradient(&m, "Theta_B", Dimensions::DIMLESS, 0.0);
        tb.assign(&[0.0, 0.0, 1.0, 0.0, 0.0]);
        eta_half_step(&m, &s, &mut eta, &tb, &params(2.0), SolverSettings::default());
        let total: f64 = eta.values().iter().sum();
        assert!((total - 1.0).abs() < 1e-8, "total {total}");
        assert!(eta.get(2) < 1.0);
        assert!(eta.get(1) > 0.0 && eta.get(3) > 0.0);
        assert!((eta.get(1) - eta.get(3)).abs() < 1e-9);
    }

    #[test]
    fn decay_shrinks_eta() {
        let m = Line1D::new(1, 1.0).unwrap();
        let s = Stencil::new(&m);
        let mut eta = ScalarField::zero_gradient(&m, "eta", Dimensions::DIMLESS, 0.0);
        let tb = ScalarField::zero_gradient(&m, "Theta_B", Dimensions::DIMLESS, 0.8);
        let p = AdhesionParams {
            lambda_eta: 1.0,
            ..params(0.0)
        };
        eta_half_step(&m, &s, &mut eta, &tb, &p, SolverSettings::default());
        assert!((eta.get(0) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_fixed_value_is_clamped() {
        let m = Line1D::new(4, 1.0).unwrap();
        let s = Stencil::new(&m);
        let mut eta = ScalarField::uniform(
            &m,
            "eta",
            Dimensions::DIMLESS,
            0.0,
            vec![BoundaryCondition::FixedValue(3.0), BoundaryCondition::ZeroGradient],
        )
        .unwrap();
        let tb = ScalarField::zero_gradient(&m, "Theta_B", Dimensions::DIMLESS, 0.5);
        eta_half_step(&m, &s, &mut eta, &tb, &params(4.0), SolverSettings::default());
        assert!(eta.values().iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(eta.get(0), 1.0);
    }

    #[test]
    fn smoothing_keeps_uniform_field() {
        let m = Line1D::new(4, 1.0).unwrap();
        let mut h = ScalarField::zero_gradient(&m, "Hadh", Dimensions::DIMLESS, 0.6);
        assert_eq!(smooth_hadh(&m, &mut h, &params(0.0)), 0);
        for v in h.values() {
            assert!((v - 0.6).abs() < 1e-12);
        }
    }

    #[test]
    fn smoothing_spreads_a_step() {
        let m = Line1D::new(4, 0.1).unwrap();
        let mut h = ScalarField::zero_gradient(&m, "Hadh", Dimensions::DIMLESS, 0.0);
        h.assign(&[0.0, 0.0, 1.0, 1.0]);
        smooth_hadh(&m, &mut h, &params(0.4));
        assert!(h.get(1) > 0.0);
        assert!(h.get(2) < 1.0);
        assert!((h.get(1) + h.get(2) - 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn eta_stays_in_unit_interval(
            seed in prop::collection::vec(-2.0f64..3.0, 6),
            l in 0.0f64..5.0,
            lambda in 0.0f64..2.0,
        ) {
            let m = Line1D::new(6, 0.5).unwrap();
            let s = Stencil::new(&m);
            let mut eta = ScalarField::zero_gradient(&m, "eta", Dimensions::DIMLESS, 0.0);
            let mut tb = ScalarField::zero_gradient(&m, "Theta_B", Dimensions::DIMLESS, 0.0);
            tb.assign(&seed);
            let p = AdhesionParams { l_d_eta: l, lambda_eta: lambda, pdiam: 1.0 };
            eta_half_step(&m, &s, &mut eta, &tb, &p, SolverSettings::default());
            prop_assert!(eta.values().iter().all(|v| (0.0..=1.0).contains(v)));
        }

        #[test]
        fn hadh_stays_in_unit_interval(
            seed in prop::collection::vec(-1.0f64..2.0, 6),
            pdiam in 0.0f64..4.0,
        ) {
            let m = Line1D::new(6, 0.5).unwrap();
            let mut h = ScalarField::zero_gradient(&m, "Hadh", Dimensions::DIMLESS, 0.0);
            h.assign(&seed);
            let p = AdhesionParams { l_d_eta: 0.0, lambda_eta: 0.0, pdiam };
            smooth_hadh(&m, &mut h, &p);
            prop_assert!(h.values().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }
}
