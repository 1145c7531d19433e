//! Pre-allocated RK4 stage memory.
//!
//! Each group owns one [`RkScratch`] with a [`StageBuffer`] per field slot.
//! The buffers are allocated once at setup and re-zeroed by
//! [`RkScratch::reset`] before every integration call, so the inner stage
//! loop never touches the heap.

use clot_core::Dimensions;
use clot_mesh::ScalarField;

/// Stage memory for one field: the start-of-substep snapshot and the
/// running weighted increment `h * (k1 + 2 k2 + 2 k3 + k4)`.
///
/// Both vectors carry the dimensions of the field they shadow.
#[derive(Clone, Debug, PartialEq)]
pub struct StageBuffer {
    name: String,
    dimensions: Dimensions,
    base: Vec<f64>,
    increment: Vec<f64>,
}

impl StageBuffer {
    fn for_field(field: &ScalarField) -> Self {
        Self {
            name: format!("{}_rk", field.name()),
            dimensions: field.dimensions(),
            base: vec![0.0; field.len()],
            increment: vec![0.0; field.len()],
        }
    }

    /// Buffer name, derived from the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical dimensions, equal to the shadowed field's.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.increment.len()
    }

    /// Whether the buffer covers no cells.
    pub fn is_empty(&self) -> bool {
        self.increment.is_empty()
    }

    /// Start-of-substep values.
    pub fn base(&self) -> &[f64] {
        &self.base
    }

    /// Accumulated weighted increment.
    pub fn increment(&self) -> &[f64] {
        &self.increment
    }

    pub(crate) fn parts_mut(&mut self) -> (&[f64], &mut [f64]) {
        (&self.base, &mut self.increment)
    }
}

/// One [`StageBuffer`] per field slot of a group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RkScratch {
    buffers: Vec<StageBuffer>,
}

impl RkScratch {
    /// Allocate zero-valued buffers matching each field's length and
    /// dimensions.
    pub fn for_fields<'a>(fields: impl IntoIterator<Item = &'a ScalarField>) -> Self {
        Self {
            buffers: fields.into_iter().map(StageBuffer::for_field).collect(),
        }
    }

    /// Number of buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether there are no buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Buffer for slot `i`.
    pub fn buffer(&self, i: usize) -> &StageBuffer {
        &self.buffers[i]
    }

    pub(crate) fn buffer_mut(&mut self, i: usize) -> &mut StageBuffer {
        &mut self.buffers[i]
    }

    /// Snapshot the current field values and zero every increment.
    ///
    /// # Panics
    ///
    /// Panics if the number or length of `fields` no longer matches the
    /// allocation.
    pub fn reset<'a>(&mut self, fields: impl IntoIterator<Item = &'a ScalarField>) {
        let mut count = 0;
        for (buf, field) in self.buffers.iter_mut().zip(fields) {
            assert_eq!(
                buf.base.len(),
                field.len(),
                "scratch for '{}' sized for {} cells, field has {}",
                field.name(),
                buf.base.len(),
                field.len()
            );
            buf.base.copy_from_slice(field.values());
            buf.increment.fill(0.0);
            count += 1;
        }
        assert_eq!(count, self.buffers.len(), "scratch/field count mismatch");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clot_mesh::Line1D;

    fn fields() -> Vec<ScalarField> {
        let m = Line1D::new(3, 1.0).unwrap();
        vec![
            ScalarField::zero_gradient(&m, "A", Dimensions::CONCENTRATION, 2.0),
            ScalarField::zero_gradient(&m, "theta", Dimensions::DIMLESS, 0.5),
        ]
    }

    #[test]
    fn buffers_match_fields() {
        let f = fields();
        let s = RkScratch::for_fields(&f);
        assert_eq!(s.len(), 2);
        for (i, field) in f.iter().enumerate() {
            let b = s.buffer(i);
            assert_eq!(b.len(), field.len());
            assert_eq!(b.dimensions(), field.dimensions());
            assert!(b.increment().iter().all(|&v| v == 0.0));
            assert!(b.base().iter().all(|&v| v == 0.0));
        }
        assert_eq!(s.buffer(0).name(), "A_rk");
    }

    #[test]
    fn reset_snapshots_and_zeroes() {
        let f = fields();
        let mut s = RkScratch::for_fields(&f);
        s.buffer_mut(0).increment.fill(7.0);
        s.reset(&f);
        assert_eq!(s.buffer(0).base(), &[2.0, 2.0, 2.0]);
        assert_eq!(s.buffer(1).base(), &[0.5, 0.5, 0.5]);
        assert_eq!(s.buffer(0).increment(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "count mismatch")]
    fn reset_with_missing_field_panics() {
        let f = fields();
        let mut s = RkScratch::for_fields(&f);
        s.reset(&f[..1]);
    }
}
