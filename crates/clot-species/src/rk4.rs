//! Classical explicit RK4 over the whole network.
//!
//! Each stage runs in two phases. Phase A evaluates every group's rate law
//! against a shared `&Network`, writing into integrator-owned buffers.
//! Phase B hands each group its buffer through `&mut Network` to fold the
//! rates into its increment and form the next trial state. Because phase
//! A holds only shared borrows, no rate law can observe a sibling that has
//! already moved on to the next stage.

use clot_core::GroupId;

use crate::context::RateContext;
use crate::environment::Environment;
use crate::network::Network;
use crate::stage::Stage;

/// RK4 driver with one cell-major rate buffer per group.
///
/// # Examples
///
/// ```no_run
/// # use clot_species::{Environment, Network, Rk4};
/// # fn run(mut network: Network, env: Environment) {
/// network.wire(&env).unwrap();
/// let mut rk = Rk4::new(&network);
/// let dt = 1e-3;
/// let m_rxn = 10;
/// for k in 0..m_rxn {
///     rk.substep(&mut network, &env, k as f64 * dt / m_rxn as f64, dt / m_rxn as f64);
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Rk4 {
    rates: Vec<Vec<f64>>,
    substeps: u64,
}

impl Rk4 {
    /// Allocate rate buffers for a wired network.
    ///
    /// # Panics
    ///
    /// Panics if the network is not wired.
    pub fn new(network: &Network) -> Self {
        assert!(network.is_wired(), "integrator built before wiring");
        let cells = network.cell_count();
        let rates = network
            .groups()
            .iter()
            .map(|g| vec![0.0; cells * g.field_count()])
            .collect();
        Self { rates, substeps: 0 }
    }

    /// Sub-steps completed so far.
    pub fn substeps(&self) -> u64 {
        self.substeps
    }

    /// Advance every group in `network` by one sub-step of size `h`
    /// starting at time `t`.
    ///
    /// Returns the number of cell values pulled back into range by the
    /// commit clamp.
    ///
    /// # Panics
    ///
    /// Panics if the network is not wired or has changed shape since
    /// [`Rk4::new`].
    pub fn substep(&mut self, network: &mut Network, env: &Environment, t: f64, h: f64) -> usize {
        assert!(network.is_wired(), "integration before wiring");
        assert_eq!(
            self.rates.len(),
            network.len(),
            "integrator built for a different network"
        );
        let groups = network.len();
        let ids = move || (0..groups).map(|i| GroupId(i as u32));

        for id in ids() {
            network.group_mut(id).fields_mut().begin_step();
        }

        for stage in Stage::ALL {
            {
                let ctx = RateContext::new(network, env, t + stage.time_fraction() * h);
                for (g, buf) in network.groups().iter().zip(self.rates.iter_mut()) {
                    let n = g.field_count();
                    if n == 0 {
                        continue;
                    }
                    for (cell, out) in buf.chunks_exact_mut(n).enumerate() {
                        g.rates(&ctx, cell, out);
                    }
                }
            }
            for (id, buf) in ids().zip(&self.rates) {
                network.group_mut(id).fields_mut().apply_stage(stage, h, buf);
            }
        }

        let mut clamped = 0;
        for id in ids() {
            clamped += network.group_mut(id).fields_mut().commit();
        }
        self.substeps += 1;
        clamped
    }
}
