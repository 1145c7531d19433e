//! Per-step performance metrics for the reaction driver.
//!
//! [`StepMetrics`] captures timing, solver and clamping data for a single
//! flow step, for telemetry and for spotting numerical drift.

use clot_mesh::SolverPerformance;

/// Timing and diagnostic metrics collected during a single flow step.
///
/// All durations are in microseconds. The driver populates these fields
/// after each `step()` call; consumers read them from the most recent
/// step.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent in the `eta` half-step, in microseconds.
    pub adhesion_us: u64,
    /// Time spent in the RK4 reaction loop, in microseconds.
    pub reaction_us: u64,
    /// Time spent reapplying boundary conditions, publishing derived
    /// fields and tracking release, in microseconds.
    pub boundary_us: u64,
    /// Statistics of the implicit `eta` solve, if it ran.
    pub eta_solver: Option<SolverPerformance>,
    /// RK4 sub-steps taken this step.
    pub substeps: u32,
    /// Cell values pulled back into range by commit and half-step clamps.
    pub clamped_cells: usize,
    /// Fields handed to the store this step.
    pub fields_written: usize,
}
