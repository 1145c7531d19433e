//! Finite-volume operators used by the adhesion half-step.
//!
//! Only two operators are needed by the reaction core: an explicit
//! Laplacian (for the optional `Hadh` smoothing pass) and an implicit
//! diffusion-plus-linear-decay solve (for `eta`). Both treat
//! zero-gradient patches as zero flux and fixed-value patches as a
//! half-cell gradient to the face value.

use smallvec::SmallVec;

use crate::boundary::BoundaryCondition;
use crate::field::ScalarField;
use crate::mesh::Mesh;

/// Precomputed per-cell connectivity for iterative solves.
///
/// Built once from a mesh and reused every coarse step.
#[derive(Clone, Debug)]
pub struct Stencil {
    volumes: Vec<f64>,
    /// `(neighbour cell, area / distance)` per cell.
    neighbours: Vec<SmallVec<[(usize, f64); 6]>>,
    /// `(patch index, face index, area / distance)` per cell.
    boundary: Vec<SmallVec<[(usize, usize, f64); 2]>>,
}

impl Stencil {
    /// Build the stencil for `mesh`.
    pub fn new(mesh: &dyn Mesh) -> Self {
        let n = mesh.cell_count();
        let volumes = (0..n).map(|c| mesh.cell_volume(c)).collect();
        let mut neighbours = vec![SmallVec::new(); n];
        for f in mesh.internal_faces() {
            let k = f.coefficient();
            neighbours[f.owner].push((f.neighbour, k));
            neighbours[f.neighbour].push((f.owner, k));
        }
        let mut boundary = vec![SmallVec::new(); n];
        for (pi, patch) in mesh.patches().iter().enumerate() {
            for (fi, face) in patch.faces.iter().enumerate() {
                boundary[face.cell].push((pi, fi, face.coefficient()));
            }
        }
        Self {
            volumes,
            neighbours,
            boundary,
        }
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> usize {
        self.volumes.len()
    }
}

/// Convergence controls for [`solve_diffusion`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverSettings {
    /// Normalised residual at which iteration stops. Default: 1e-10.
    pub tolerance: f64,
    /// Hard cap on Gauss-Seidel sweeps. Default: 1000.
    pub max_iterations: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 1000,
        }
    }
}

/// Outcome of one implicit solve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolverPerformance {
    /// Normalised residual of the initial guess.
    pub initial_residual: f64,
    /// Normalised residual after the last sweep.
    pub final_residual: f64,
    /// Sweeps performed.
    pub iterations: u32,
    /// Whether `final_residual <= tolerance`.
    pub converged: bool,
}

/// Explicit Laplacian `div(gamma grad(x))` per cell, divided by cell volume.
///
/// Fixed-value patches read the face values stored on `field`, so call
/// [`ScalarField::correct_boundary_conditions`] first if cell values
/// changed since the last correction.
pub fn laplacian(mesh: &dyn Mesh, field: &ScalarField, gamma: f64) -> Vec<f64> {
    let x = field.values();
    let mut out = vec![0.0; x.len()];
    for f in mesh.internal_faces() {
        let flux = gamma * f.coefficient() * (x[f.neighbour] - x[f.owner]);
        out[f.owner] += flux;
        out[f.neighbour] -= flux;
    }
    for (patch, pf) in mesh.patches().iter().zip(field.patches()) {
        if !pf.is_fixed() {
            continue;
        }
        for (face, xb) in patch.faces.iter().zip(pf.values()) {
            out[face.cell] += gamma * face.coefficient() * (xb - x[face.cell]);
        }
    }
    for (c, v) in out.iter_mut().enumerate() {
        *v /= mesh.cell_volume(c);
    }
    out
}

/// Solve `(1 + decay) x - div(gamma grad(x)) = x_old` in place.
///
/// `field` holds `x_old` on entry and the solution on exit. Uses
/// Gauss-Seidel sweeps from `x_old` as the initial guess; the system is
/// an M-matrix for `gamma, decay >= 0`, so each sweep is a weighted
/// average and the solution respects the bounds of `x_old` and the fixed
/// face values.
///
/// # Panics
///
/// Panics if the stencil and field disagree on cell count.
pub fn solve_diffusion(
    stencil: &Stencil,
    field: &mut ScalarField,
    gamma: f64,
    decay: f64,
    settings: SolverSettings,
) -> SolverPerformance {
    let n = stencil.cell_count();
    assert_eq!(
        n,
        field.len(),
        "stencil/field size mismatch for '{}'",
        field.name()
    );

    let mut diag = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    for c in 0..n {
        let v = stencil.volumes[c];
        let mut d = (1.0 + decay) * v;
        let mut b = v * field.get(c);
        for &(_, k) in &stencil.neighbours[c] {
            d += gamma * k;
        }
        for &(pi, fi, k) in &stencil.boundary[c] {
            if let BoundaryCondition::FixedValue(_) = field.patches()[pi].condition() {
                d += gamma * k;
                b += gamma * k * field.patches()[pi].values()[fi];
            }
        }
        diag[c] = d;
        rhs[c] = b;
    }

    let norm = rhs.iter().fold(0.0f64, |m, b| m.max(b.abs())).max(f64::MIN_POSITIVE);
    let residual = |x: &[f64]| -> f64 {
        let mut r = 0.0f64;
        for c in 0..n {
            let off: f64 = stencil.neighbours[c]
                .iter()
                .map(|&(nb, k)| gamma * k * x[nb])
                .sum();
            r = r.max((rhs[c] + off - diag[c] * x[c]).abs());
        }
        r / norm
    };

    let x = field.values_mut();
    let mut perf = SolverPerformance {
        initial_residual: residual(x),
        ..Default::default()
    };
    perf.final_residual = perf.initial_residual;
    while perf.final_residual > settings.tolerance && perf.iterations < settings.max_iterations {
        for c in 0..n {
            let off: f64 = stencil.neighbours[c]
                .iter()
                .map(|&(nb, k)| gamma * k * x[nb])
                .sum();
            x[c] = (rhs[c] + off) / diag[c];
        }
        perf.iterations += 1;
        perf.final_residual = residual(x);
    }
    perf.converged = perf.final_residual <= settings.tolerance;
    log::trace!(
        "solve_diffusion: {} sweeps, residual {:.3e} -> {:.3e}",
        perf.iterations,
        perf.initial_residual,
        perf.final_residual
    );
    perf
}
