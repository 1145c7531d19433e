//! The operator-split flow-step driver.
//!
//! One call to [`ReactionSystem::step`] advances the reaction core by a
//! flow step `dt`:
//!
//! 1. `eta` half-step (if attached).
//! 2. `M_rxn` RK4 sub-steps of `dt / M_rxn` over every group.
//! 3. Boundary reapplication on mobile fields, publication of derived
//!    fields, and release tracking.
//!
//! Transport of the mobile species between steps is the host flow
//! solver's job.

use std::time::Instant;

use clot_core::GroupId;

use crate::adhesion::eta_half_step;
use crate::metrics::StepMetrics;
use crate::setup::ReactionSystem;
use crate::store::FieldStore;

impl ReactionSystem {
    /// Advance by one flow step of size `dt`.
    ///
    /// # Panics
    ///
    /// Panics unless `dt` is finite and positive.
    pub fn step(&mut self, dt: f64) -> &StepMetrics {
        assert!(
            dt.is_finite() && dt > 0.0,
            "flow step must be finite and positive, got {dt}"
        );
        let step_start = Instant::now();
        let mut metrics = StepMetrics::default();

        // 1. Adhesion indicator.
        let adhesion_start = Instant::now();
        if let Some(a) = self.adhesion {
            let theta_b = self.env.get(a.theta_b).clone();
            let report = eta_half_step(
                &*self.mesh,
                &self.stencil,
                self.env.get_mut(a.eta),
                &theta_b,
                &a.params,
                self.config.eta_solver,
            );
            metrics.eta_solver = Some(report.solver);
            metrics.clamped_cells += report.clamped;
        }
        metrics.adhesion_us = adhesion_start.elapsed().as_micros() as u64;

        // 2. Reactions.
        let watched_before = self.release.as_ref().map(|w| {
            self.network
                .group(w.group)
                .fields()
                .field(w.slot)
                .values()
                .to_vec()
        });
        let reaction_start = Instant::now();
        let m = self.config.reaction_substeps;
        let h = dt / f64::from(m);
        for k in 0..m {
            let t = self.time + f64::from(k) * h;
            metrics.clamped_cells += self.rk.substep(&mut self.network, &self.env, t, h);
        }
        metrics.substeps = m;
        metrics.reaction_us = reaction_start.elapsed().as_micros() as u64;

        // 3. Boundaries, derived fields, release.
        let boundary_start = Instant::now();
        self.correct_mobile_boundaries();
        self.network.publish(&mut self.env);
        self.time += dt;
        self.steps += 1;
        // Adhesion out of the watched pool counts as activation.
        if let (Some(w), Some(before)) = (self.release.as_mut(), watched_before) {
            let after = self.network.group(w.group).fields().field(w.slot).values();
            let activated = before
                .iter()
                .zip(after)
                .map(|(b, a)| (b - a).max(0.0))
                .collect();
            w.tracker.record(self.time, activated);
            let sigma = self.env.get_mut(w.sigma);
            w.tracker.source(self.time, sigma.values_mut());
            sigma.correct_boundary_conditions(&*self.mesh);
        }
        metrics.boundary_us = boundary_start.elapsed().as_micros() as u64;

        metrics.total_us = step_start.elapsed().as_micros() as u64;
        log::debug!(
            "step {} to t = {:.6e}: {} substeps, {} clamped, {} us",
            self.steps,
            self.time,
            metrics.substeps,
            metrics.clamped_cells,
            metrics.total_us
        );
        self.last_metrics = metrics;
        &self.last_metrics
    }

    /// [`step`](Self::step), then write fields to `store` if the output
    /// interval is due.
    pub fn step_with_output(&mut self, dt: f64, store: &mut dyn FieldStore) -> &StepMetrics {
        self.step(dt);
        if self.config.writes_at(self.steps) {
            let written = self.write_fields(store);
            log::info!("Wrote {written} fields at t = {}", self.time);
            self.last_metrics.fields_written = written;
        }
        &self.last_metrics
    }

    fn correct_mobile_boundaries(&mut self) {
        let mesh = &*self.mesh;
        for (i, slots) in self.mobile.iter().enumerate() {
            let fields = self.network.group_mut(GroupId(i as u32)).fields_mut();
            for &slot in slots {
                fields.field_mut(slot).correct_boundary_conditions(mesh);
            }
        }
    }
}
