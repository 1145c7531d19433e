//! Mesh trait compliance test helpers.
//!
//! These functions verify that a Mesh implementation satisfies the
//! invariants the finite-volume operators rely on. Reused across all
//! backend test modules (Line1D, Grid2D).

use crate::boundary::BoundaryCondition;
use crate::field::ScalarField;
use crate::fvm;
use crate::mesh::Mesh;
use clot_core::Dimensions;

/// Assert that every internal face joins two distinct in-range cells.
pub fn assert_faces_valid(mesh: &dyn Mesh) {
    let n = mesh.cell_count();
    for (i, f) in mesh.internal_faces().iter().enumerate() {
        assert!(f.owner < n && f.neighbour < n, "face {i} out of range: {f:?}");
        assert!(f.owner < f.neighbour, "face {i} not owner-ordered: {f:?}");
        assert!(f.coefficient() > 0.0, "face {i} has non-positive coefficient");
    }
}

/// Assert that every boundary face belongs to an in-range cell.
pub fn assert_patches_valid(mesh: &dyn Mesh) {
    let n = mesh.cell_count();
    for p in mesh.patches() {
        for f in &p.faces {
            assert!(f.cell < n, "patch '{}' face cell {} out of range", p.name, f.cell);
            assert!(f.coefficient() > 0.0, "patch '{}' has bad coefficient", p.name);
        }
    }
}

/// Assert that all cell volumes are finite and positive.
pub fn assert_volumes_positive(mesh: &dyn Mesh) {
    for c in 0..mesh.cell_count() {
        let v = mesh.cell_volume(c);
        assert!(v.is_finite() && v > 0.0, "cell {c} volume {v}");
    }
}

/// Assert that the Laplacian of a uniform field is zero and that the
/// Laplacian of any field conserves mass under zero-gradient boundaries.
pub fn assert_laplacian_conservative(mesh: &dyn Mesh) {
    let conditions = vec![BoundaryCondition::ZeroGradient; mesh.patches().len()];
    let mut uniform =
        ScalarField::uniform(mesh, "u", Dimensions::DIMLESS, 3.0, conditions.clone()).unwrap();
    uniform.correct_boundary_conditions(mesh);
    for (c, v) in fvm::laplacian(mesh, &uniform, 1.0).iter().enumerate() {
        assert!(v.abs() < 1e-9, "laplacian of uniform field at {c} = {v}");
    }

    let values: Vec<f64> = (0..mesh.cell_count()).map(|c| (c % 5) as f64).collect();
    let mut ramp = ScalarField::new(mesh, "r", Dimensions::DIMLESS, values, conditions).unwrap();
    ramp.correct_boundary_conditions(mesh);
    let lap = fvm::laplacian(mesh, &ramp, 0.5);
    let total: f64 = lap
        .iter()
        .enumerate()
        .map(|(c, v)| v * mesh.cell_volume(c))
        .sum();
    assert!(total.abs() < 1e-9, "zero-gradient laplacian not conservative: {total}");
}

/// Run all compliance checks on a mesh.
pub fn run_full_compliance(mesh: &dyn Mesh) {
    assert_faces_valid(mesh);
    assert_patches_valid(mesh);
    assert_volumes_positive(mesh);
    assert_laplacian_conservative(mesh);
}
