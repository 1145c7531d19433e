//! Read-only view handed to rate laws during a stage.

use clot_core::GroupId;

use crate::environment::{EnvHandle, Environment};
use crate::network::Network;

/// Read-only network state at one RK stage.
///
/// Holds shared borrows of the whole network and environment, so no group
/// can be mutated while any rate law of the stage is being evaluated.
pub struct RateContext<'a> {
    network: &'a Network,
    env: &'a Environment,
    time: f64,
}

impl<'a> RateContext<'a> {
    /// Construct a context. Typically called by the integrator.
    pub fn new(network: &'a Network, env: &'a Environment, time: f64) -> Self {
        Self { network, env, time }
    }

    /// Value of slot `slot` of group `group` in `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `group` is not in the network or the slot is unfilled.
    #[inline]
    pub fn value(&self, group: GroupId, slot: usize, cell: usize) -> f64 {
        self.network.group(group).fields().value(slot, cell)
    }

    /// Value of an environment field in `cell`.
    #[inline]
    pub fn env(&self, field: EnvHandle, cell: usize) -> f64 {
        self.env.value(field, cell)
    }

    /// Stage time: start of the sub-step plus the stage's fraction of `h`.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The network being evaluated.
    pub fn network(&self) -> &Network {
        self.network
    }
}
