//! Benchmark profiles and utilities for the clot reaction-kinetics workspace.
//!
//! Provides pre-built [`ReactionSystem`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 channel (10K cells), full cascade
//! - [`stress_profile`]: 316x316 channel (~100K cells) for stress testing
//! - [`perturbed_store`]: deterministic seeded initial fields

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use clot_engine::{MemoryStore, ReactionConfig, ReactionSystem};
use clot_kinetics::names;
use clot_mesh::{Grid2D, Mesh};
use clot_test_utils::{standard_constants, StoreSeed, DX};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Build a reference benchmark profile: 100x100 channel (10K cells).
///
/// Injury on lower-wall columns 30..70, `M_rxn = 10`, initial platelets
/// and prothrombin perturbed by 10% around the fixture values.
pub fn reference_profile(seed: u64) -> ReactionSystem {
    channel_profile(100, 100, 30..70, seed, true)
}

/// Build a stress benchmark profile: 316x316 channel (~100K cells).
///
/// Same model as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(seed: u64) -> ReactionSystem {
    channel_profile(316, 316, 100..216, seed, true)
}

/// The reference channel with coagulation reactions switched off.
pub fn platelet_only_profile(seed: u64) -> ReactionSystem {
    channel_profile(100, 100, 30..70, seed, false)
}

fn channel_profile(
    rows: usize,
    cols: usize,
    injury: std::ops::Range<usize>,
    seed: u64,
    coag: bool,
) -> ReactionSystem {
    let mesh = Grid2D::with_injury(rows, cols, DX, injury).unwrap();
    let store = perturbed_store(&mesh, Grid2D::INJURY, seed, 0.1);
    let constants = standard_constants();
    let config = ReactionConfig {
        coag_reactions_on: coag,
        ..ReactionConfig::from_constants(&constants).unwrap()
    };
    ReactionSystem::build(Box::new(mesh), &constants, config, &store, 0.0).unwrap()
}

/// A [`StoreSeed`] store whose `plt_Pmu` and `fp_S1` cell values are
/// scaled by `1 + amplitude * U(-1, 1)`, drawn from a ChaCha8 stream
/// seeded with `seed`.
pub fn perturbed_store(
    mesh: &dyn Mesh,
    injury_patch: &str,
    seed: u64,
    amplitude: f64,
) -> MemoryStore {
    let mut store = StoreSeed::default().seed(mesh, injury_patch);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for name in [names::PLT_PMU, names::FP_S1] {
        let Some(mut stored) = store.latest(name).cloned() else {
            continue;
        };
        for v in &mut stored.values {
            *v *= 1.0 + amplitude * (2.0 * unit(&mut rng) - 1.0);
        }
        store.insert(name, 0.0, stored);
    }
    store
}

/// Uniform sample in `[0, 1)` from the top 53 bits.
fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clot_engine::FieldStore;

    #[test]
    fn reference_profile_builds() {
        let sys = reference_profile(42);
        assert_eq!(sys.mesh().cell_count(), 10_000);
        assert_eq!(sys.network().len(), 4);
    }

    #[test]
    fn platelet_only_profile_builds() {
        let sys = platelet_only_profile(42);
        assert_eq!(sys.network().len(), 2);
    }

    #[test]
    fn perturbation_is_deterministic_and_bounded() {
        let mesh = clot_test_utils::channel();
        let a = perturbed_store(&mesh, Grid2D::INJURY, 7, 0.1);
        let b = perturbed_store(&mesh, Grid2D::INJURY, 7, 0.1);
        let c = perturbed_store(&mesh, Grid2D::INJURY, 8, 0.1);
        let pa = a.read(names::PLT_PMU, 0.0).unwrap().values;
        assert_eq!(pa, b.read(names::PLT_PMU, 0.0).unwrap().values);
        assert_ne!(pa, c.read(names::PLT_PMU, 0.0).unwrap().values);
        assert!(pa.iter().all(|v| (4.5..=5.5).contains(v)));
        // Fields outside the perturbed pair are untouched.
        assert!(a
            .read(names::FP_S2, 0.0)
            .unwrap()
            .values
            .iter()
            .all(|&v| v == 1.0));
    }
}
