//! Integration tests: the operator-split step on the standard model and
//! on custom networks.

use clot_core::Dimensions;
use clot_engine::{ReactionConfig, ReactionSystem};
use clot_kinetics::names::*;
use clot_kinetics::{ReleaseProfile, ReleaseTracker};
use clot_mesh::{Grid2D, Line1D, Mesh, ScalarField};
use clot_species::{Environment, Network};
use clot_test_utils::{
    build_system, channel, line, standard_constants, AdpPool, Oscillator, ShearActivated,
    StoreSeed,
};
use proptest::prelude::*;

fn config() -> ReactionConfig {
    ReactionConfig::from_constants(&standard_constants()).unwrap()
}

fn in_unit_interval(f: &ScalarField) -> bool {
    f.values().iter().all(|v| (0.0..=1.0).contains(v))
}

#[test]
fn step_advances_time_and_counts_substeps() {
    let mut sys = build_system(Box::new(channel()), Grid2D::INJURY, config()).unwrap();
    let m = sys.step(0.1).clone();
    assert_eq!(m.substeps, 10);
    assert!(m.eta_solver.is_some_and(|s| s.converged));
    assert!(m.total_us >= m.reaction_us);
    sys.step(0.1);
    assert_eq!(sys.steps(), 2);
    assert_eq!(sys.substeps(), 20);
    assert!((sys.time() - 0.2).abs() < 1e-15);
}

#[test]
fn eta_follows_bound_platelets() {
    let mut sys = build_system(Box::new(channel()), Grid2D::INJURY, config()).unwrap();
    // No platelet is bound initially, so the first half-step clears eta.
    sys.step(0.1);
    assert_eq!(sys.field(ETA).unwrap().max(), Some(0.0));
    assert!(sys.field(THETA_B).unwrap().max().unwrap() > 0.0);

    sys.step(0.1);
    let eta = sys.field(ETA).unwrap();
    assert!(in_unit_interval(eta));
    let injury = sys.mesh().patch_cells(Grid2D::INJURY);
    assert!(injury.iter().all(|&c| eta.get(c) > 0.0));
}

#[test]
fn adhesion_happens_only_near_the_injury() {
    let mut sys = build_system(Box::new(channel()), Grid2D::INJURY, config()).unwrap();
    for _ in 0..5 {
        sys.step(0.1);
    }
    let pbse = sys.field(PLT_PBSE).unwrap();
    let injury = sys.mesh().patch_cells(Grid2D::INJURY);
    for c in 0..pbse.len() {
        if injury.contains(&c) {
            assert!(pbse.get(c) > 0.0);
        } else {
            assert_eq!(pbse.get(c), 0.0);
        }
    }
}

#[test]
fn release_publishes_sigma_after_activation() {
    let mut sys = build_system(Box::new(channel()), Grid2D::INJURY, config()).unwrap();
    sys.step(0.1);
    // The newest event sits at R(0) = 0.
    assert_eq!(sys.field(SIGMA_RELEASE).unwrap().max(), Some(0.0));
    sys.step(0.1);
    sys.step(0.1);
    assert!(sys.field(SIGMA_RELEASE).unwrap().max().unwrap() > 0.0);
    assert_eq!(sys.release().unwrap().active_events(), 3);
}

#[test]
fn release_without_agonist_comes_from_adhesion() {
    // No ADP or thrombin: only subendothelial adhesion at the injury
    // takes platelets out of plt_Pmu.
    let mut sys = build_system(Box::new(channel()), Grid2D::INJURY, config()).unwrap();
    for _ in 0..3 {
        sys.step(0.1);
    }
    let sigma = sys.field(SIGMA_RELEASE).unwrap();
    let injury = sys.mesh().patch_cells(Grid2D::INJURY);
    for c in 0..sigma.len() {
        if injury.contains(&c) {
            assert!(sigma.get(c) > 0.0, "injury cell {c}");
        } else {
            assert_eq!(sigma.get(c), 0.0, "cell {c}");
        }
    }
}

#[test]
fn release_follows_adp_activation_away_from_injury() {
    let mesh = channel();
    let mut store = StoreSeed::default().seed(&mesh, Grid2D::INJURY);
    store.seed(
        0.0,
        &ScalarField::zero_gradient(&mesh, ADP, Dimensions::CONCENTRATION, 1.0),
    );
    let mut sys =
        ReactionSystem::build(Box::new(mesh), &standard_constants(), config(), &store, 0.0)
            .unwrap();
    for _ in 0..3 {
        sys.step(0.1);
    }
    let sigma = sys.field(SIGMA_RELEASE).unwrap();
    let injury = sys.mesh().patch_cells(Grid2D::INJURY);
    let remote = (0..sigma.len()).find(|c| !injury.contains(c)).unwrap();
    assert!(sigma.get(remote) > 0.0);
}

#[test]
fn release_tracking_can_be_disabled() {
    let cfg = ReactionConfig {
        track_release: false,
        ..config()
    };
    let mut sys = build_system(Box::new(channel()), Grid2D::INJURY, cfg).unwrap();
    sys.step(0.1);
    sys.step(0.1);
    assert!(sys.release().is_none());
    assert_eq!(sys.field(SIGMA_RELEASE).unwrap().max(), Some(0.0));
}

#[test]
fn fields_written_every_output_interval() {
    let cfg = ReactionConfig {
        output_interval: Some(2),
        ..config()
    };
    let mesh = channel();
    let mut store = StoreSeed::default().seed(&mesh, Grid2D::INJURY);
    let mut sys =
        ReactionSystem::build(Box::new(mesh), &standard_constants(), cfg, &store, 0.0).unwrap();

    let mut written = Vec::new();
    for _ in 0..5 {
        written.push(sys.step_with_output(0.5, &mut store).fields_written);
    }
    // 16 group fields plus eta, Theta_T, Theta_B and sigma_release.
    assert_eq!(written, vec![0, 20, 0, 20, 0]);
    assert_eq!(store.write_count(), 40);
    assert_eq!(store.times(PLT_PMU), vec![0.0, 1.0, 2.0]);
    assert_eq!(store.times(THETA_B), vec![1.0, 2.0]);
    assert_ne!(
        store.latest(PLT_PMU).unwrap().values,
        sys.field(PLT_PMU).unwrap().values().to_vec()
    );
}

#[test]
fn mobile_boundaries_are_reapplied() {
    let seed = StoreSeed {
        pmu_inlet: Some(7.0),
        ..StoreSeed::default()
    };
    let mesh = channel();
    let store = seed.seed(&mesh, Grid2D::INJURY);
    let mut sys =
        ReactionSystem::build(Box::new(mesh), &standard_constants(), config(), &store, 0.0)
            .unwrap();
    for _ in 0..3 {
        sys.step(0.1);
    }
    let platelet = sys.network().id(PLATELET).unwrap();
    assert_eq!(sys.mobile_slots(platelet), &[0, 1]);
    let fluid = sys.network().id(FLUID_PHASE).unwrap();
    assert!(sys.mobile_slots(fluid).is_empty());
    let pmu = sys.field(PLT_PMU).unwrap();
    assert!(pmu.patches()[0].values().iter().all(|&v| v == 7.0));
    let outlet = &sys.mesh().patches()[1];
    for (face, v) in outlet.faces.iter().zip(pmu.patches()[1].values()) {
        assert_eq!(*v, pmu.get(face.cell));
    }
}

#[test]
fn single_cell_substep_convergence() {
    let run = |m_rxn: u32| {
        let mesh = Line1D::new(1, 1e-6).unwrap();
        let store = StoreSeed::default().seed(&mesh, Line1D::LEFT);
        let cfg = ReactionConfig {
            reaction_substeps: m_rxn,
            ..config()
        };
        let mut sys =
            ReactionSystem::build(Box::new(mesh), &standard_constants(), cfg, &store, 0.0)
                .unwrap();
        for _ in 0..10 {
            sys.step(0.1);
        }
        sys.network()
            .groups()
            .iter()
            .flat_map(|g| g.fields().iter().map(|f| f.get(0)).collect::<Vec<_>>())
            .collect::<Vec<f64>>()
    };
    let coarse = run(10);
    let fine = run(100);
    assert_eq!(coarse.len(), fine.len());
    for (i, (a, b)) in coarse.iter().zip(&fine).enumerate() {
        assert!((a - b).abs() < 1e-6, "slot {i}: {a} vs {b}");
    }
}

#[test]
#[should_panic(expected = "flow step must be finite and positive")]
fn zero_dt_panics() {
    let mut sys = build_system(Box::new(channel()), Grid2D::INJURY, config()).unwrap();
    sys.step(0.0);
}

// ── Custom networks ──────────────────────────────────────────────────

fn shear_env(mesh: &dyn Mesh, shear: f64) -> Environment {
    let mut env = Environment::new();
    env.insert(ScalarField::zero_gradient(mesh, SHEAR_RATE, Dimensions::RATE, shear));
    env.insert(ScalarField::zero_gradient(mesh, SIGMA_RELEASE, SOURCE, 0.0));
    env
}

#[test]
fn custom_network_with_release_feedback() {
    let mesh = line(3);
    let mut net = Network::new();
    net.add(Box::new(AdpPool::new(&mesh, 0.5, 0.2)));
    net.add(Box::new(ShearActivated::new(&mesh, 2.0, 0.5, 100.0, 4.0)));
    let tracker = ReleaseTracker::new(ReleaseProfile::new(0.5, 0.01).unwrap(), 1.0);
    let mut sys = ReactionSystem::from_parts(
        Box::new(line(3)),
        ReactionConfig {
            reaction_substeps: 20,
            ..ReactionConfig::default()
        },
        net,
        shear_env(&mesh, 50.0),
        0.0,
    )
    .unwrap()
    .with_release(tracker, ShearActivated::NAME, 0)
    .unwrap();
    assert!(!sys.has_adhesion());

    let mut peak: f64 = 0.0;
    for _ in 0..6 {
        sys.step(0.1);
        peak = peak.max(sys.field(SIGMA_RELEASE).unwrap().max().unwrap());
        let pu = sys.field("Pu").unwrap().get(1);
        let pa = sys.field("Pa").unwrap().get(1);
        assert!((pu + pa - 4.0).abs() < 1e-10);
    }
    assert!(peak > 0.0);
    assert!(sys.last_metrics().eta_solver.is_none());
    // Released ADP feeds back into the pool beyond pure uptake.
    let pool = sys.field(AdpPool::FIELD).unwrap().get(1);
    assert!(pool > 0.2 * (-0.5f64 * 0.6).exp() + 1e-6, "pool = {pool}");
}

#[test]
fn custom_network_unknown_release_group() {
    let mesh = line(2);
    let mut net = Network::new();
    net.add(Box::new(AdpPool::new(&mesh, 0.5, 0.2)));
    let tracker = ReleaseTracker::new(ReleaseProfile::new(0.5, 0.01).unwrap(), 1.0);
    let err = ReactionSystem::from_parts(
        Box::new(line(2)),
        ReactionConfig::default(),
        net,
        Environment::new(),
        0.0,
    )
    .unwrap()
    .with_release(tracker, "missing", 0)
    .unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn oscillator_returns_after_one_period() {
    let mesh = line(1);
    let omega = 2.0 * std::f64::consts::PI;
    let (x, y) = Oscillator::pair(&mesh, omega, 2.0, 1.0);
    let mut net = Network::new();
    net.add(Box::new(x));
    net.add(Box::new(y));
    let mut sys = ReactionSystem::from_parts(
        Box::new(line(1)),
        ReactionConfig {
            reaction_substeps: 50,
            ..ReactionConfig::default()
        },
        net,
        Environment::new(),
        0.0,
    )
    .unwrap();
    for _ in 0..4 {
        sys.step(0.25);
    }
    let xv = sys.field("osc_x_v").unwrap().get(0);
    let yv = sys.field("osc_y_v").unwrap().get(0);
    assert!((xv - 3.0).abs() < 1e-6, "x = {xv}");
    assert!((yv - 2.0).abs() < 1e-6, "y = {yv}");
}

#[test]
fn memory_store_roundtrip_restarts_run() {
    let cfg = ReactionConfig {
        output_interval: Some(1),
        ..config()
    };
    let mesh = channel();
    let mut store = StoreSeed::default().seed(&mesh, Grid2D::INJURY);
    let mut first =
        ReactionSystem::build(Box::new(mesh), &standard_constants(), cfg.clone(), &store, 0.0)
            .unwrap();
    first.step_with_output(0.1, &mut store);

    let restarted =
        ReactionSystem::build(Box::new(channel()), &standard_constants(), cfg, &store, 0.1)
            .unwrap();
    for name in [PLT_PMU, PLT_PBSE, FP_E1, PB_C2] {
        assert_eq!(
            restarted.field(name).unwrap().values(),
            first.field(name).unwrap().values(),
            "{name}"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn eta_and_hadh_stay_bounded(
        eta_seed in prop::collection::vec(-1.0f64..2.0, 32),
        hadh_seed in prop::collection::vec(-1.0f64..2.0, 32),
        theta_boost in 0.0f64..30.0,
    ) {
        let mesh = channel();
        let seed = StoreSeed { pmu: 5.0 + theta_boost, ..StoreSeed::default() };
        let mut store = seed.seed(&mesh, Grid2D::INJURY);
        let mut eta = ScalarField::zero_gradient(&mesh, ETA, Dimensions::DIMLESS, 0.0);
        eta.assign(&eta_seed);
        store.seed(0.0, &eta);
        let mut hadh = ScalarField::zero_gradient(&mesh, HADH, Dimensions::DIMLESS, 0.0);
        hadh.assign(&hadh_seed);
        store.seed(0.0, &hadh);

        let cfg = ReactionConfig { smooth_adhesion: true, reaction_substeps: 4, ..config() };
        let mut sys = ReactionSystem::build(
            Box::new(mesh), &standard_constants(), cfg, &store, 0.0,
        ).unwrap();
        prop_assert!(in_unit_interval(sys.field(HADH).unwrap()));
        for _ in 0..3 {
            sys.step(0.2);
            prop_assert!(in_unit_interval(sys.field(ETA).unwrap()));
            prop_assert!(in_unit_interval(sys.field(HADH).unwrap()));
            prop_assert!(in_unit_interval(sys.field(THETA_T).unwrap()));
        }
    }

    #[test]
    fn hadh_stays_bounded_without_smoothing(
        eta_seed in prop::collection::vec(-1.0f64..2.0, 32),
        hadh_seed in prop::collection::vec(-1.0f64..2.0, 32),
    ) {
        let mesh = channel();
        let mut store = StoreSeed::default().seed(&mesh, Grid2D::INJURY);
        let mut eta = ScalarField::zero_gradient(&mesh, ETA, Dimensions::DIMLESS, 0.0);
        eta.assign(&eta_seed);
        store.seed(0.0, &eta);
        let mut hadh = ScalarField::zero_gradient(&mesh, HADH, Dimensions::DIMLESS, 0.0);
        hadh.assign(&hadh_seed);
        store.seed(0.0, &hadh);

        let cfg = ReactionConfig { smooth_adhesion: false, reaction_substeps: 4, ..config() };
        let mut sys = ReactionSystem::build(
            Box::new(mesh), &standard_constants(), cfg, &store, 0.0,
        ).unwrap();
        prop_assert!(in_unit_interval(sys.field(ETA).unwrap()));
        prop_assert!(in_unit_interval(sys.field(HADH).unwrap()));
        for _ in 0..3 {
            sys.step(0.2);
            prop_assert!(in_unit_interval(sys.field(ETA).unwrap()));
            prop_assert!(in_unit_interval(sys.field(HADH).unwrap()));
        }
    }
}
