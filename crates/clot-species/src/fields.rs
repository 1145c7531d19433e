//! Fixed-size field storage shared by every species group.
//!
//! [`GroupFields`] is the part of a group the integrator drives: a slot
//! list sized exactly once, filled exactly once per slot, shadowed by an
//! [`RkScratch`], and advanced through the stages of a sub-step under an
//! asserted ordering.

use clot_core::FieldSpec;
use clot_mesh::ScalarField;

use crate::scratch::RkScratch;
use crate::stage::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Progress {
    Idle,
    Expecting(Stage),
    Committable,
}

/// Ordered field slots of one species group plus their RK stage memory.
///
/// # Contract
///
/// - [`size`](Self::size) is called once; the slot count never changes.
/// - Every slot is [`fill`](Self::fill)ed exactly once before wiring.
/// - A sub-step is `begin_step`, then `apply_stage` for stages one to four
///   in order, then `commit`. Any other order panics.
#[derive(Debug)]
pub struct GroupFields {
    group: String,
    specs: Option<Vec<FieldSpec>>,
    slots: Vec<Option<ScalarField>>,
    scratch: Option<RkScratch>,
    progress: Progress,
}

impl GroupFields {
    /// Unsized storage for the named group.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            specs: None,
            slots: Vec::new(),
            scratch: None,
            progress: Progress::Idle,
        }
    }

    /// Storage sized for `specs` in one call.
    pub fn sized(group: impl Into<String>, specs: Vec<FieldSpec>) -> Self {
        let mut fields = Self::new(group);
        fields.size(specs);
        fields
    }

    /// Allocate one empty slot per spec.
    ///
    /// # Panics
    ///
    /// Panics if the storage has already been sized.
    pub fn size(&mut self, specs: Vec<FieldSpec>) {
        assert!(
            self.specs.is_none(),
            "group '{}' sized twice",
            self.group
        );
        self.slots = specs.iter().map(|_| None).collect();
        self.specs = Some(specs);
    }

    /// Owning group's name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Declared slot count (zero before sizing).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot declarations, in slot order.
    pub fn specs(&self) -> &[FieldSpec] {
        self.specs.as_deref().unwrap_or(&[])
    }

    /// Attach `field` to slot `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range, the slot is already filled, the
    /// field's dimensions differ from the slot declaration, or its length
    /// differs from previously filled slots.
    pub fn fill(&mut self, i: usize, field: ScalarField) {
        let n = self.slots.len();
        assert!(i < n, "group '{}' has {n} slots, cannot fill slot {i}", self.group);
        assert!(
            self.slots[i].is_none(),
            "group '{}' slot {i} ({}) filled twice",
            self.group,
            self.specs()[i].name
        );
        let spec = &self.specs()[i];
        assert_eq!(
            field.dimensions(),
            spec.dimensions,
            "group '{}' slot {i} ({}) dimension mismatch",
            self.group,
            spec.name
        );
        if let Some(len) = self.slots.iter().flatten().map(ScalarField::len).next() {
            assert_eq!(
                field.len(),
                len,
                "group '{}' slot {i} ({}) size mismatch",
                self.group,
                spec.name
            );
        }
        self.slots[i] = Some(field);
    }

    /// Whether slot `i` holds a field.
    pub fn is_filled(&self, i: usize) -> bool {
        self.slots.get(i).is_some_and(Option::is_some)
    }

    /// Whether the storage is sized and every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.specs.is_some() && self.slots.iter().all(Option::is_some)
    }

    /// First unfilled slot, if any.
    pub fn first_unfilled(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Field in slot `i`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is unfilled.
    pub fn field(&self, i: usize) -> &ScalarField {
        match self.slots.get(i) {
            Some(Some(f)) => f,
            _ => self.unfilled(i),
        }
    }

    /// Mutable field in slot `i`. Used for boundary reapplication.
    ///
    /// # Panics
    ///
    /// Panics if the slot is unfilled or a sub-step is in progress.
    pub fn field_mut(&mut self, i: usize) -> &mut ScalarField {
        assert_eq!(
            self.progress,
            Progress::Idle,
            "group '{}' fields mutated mid-substep",
            self.group
        );
        match self.slots.get_mut(i) {
            Some(Some(f)) => f,
            _ => panic!("group '{}' slot {i} unfilled", self.group),
        }
    }

    /// Value of slot `i` in `cell`.
    #[inline]
    pub fn value(&self, i: usize, cell: usize) -> f64 {
        self.field(i).get(cell)
    }

    /// Iterate over filled fields in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ScalarField> {
        self.slots.iter().flatten()
    }

    /// Number of mesh cells covered (zero while no slot is filled).
    pub fn cell_count(&self) -> usize {
        self.iter().next().map_or(0, ScalarField::len)
    }

    /// Allocate zero-valued stage buffers matching every filled field.
    ///
    /// # Panics
    ///
    /// Panics if any slot is unfilled.
    pub fn init_scratch(&mut self) {
        self.assert_complete();
        self.scratch = Some(RkScratch::for_fields(self.slots.iter().flatten()));
    }

    /// Stage buffers, once allocated.
    pub fn scratch(&self) -> Option<&RkScratch> {
        self.scratch.as_ref()
    }

    /// Start a sub-step: snapshot every field and zero the increments.
    ///
    /// # Panics
    ///
    /// Panics if a slot is unfilled, the scratch was never allocated, or
    /// the previous sub-step was not committed.
    pub fn begin_step(&mut self) {
        self.assert_complete();
        assert_eq!(
            self.progress,
            Progress::Idle,
            "group '{}' began a sub-step before committing the last",
            self.group
        );
        let Some(scratch) = self.scratch.as_mut() else {
            panic!("group '{}' integrated before init_scratch", self.group);
        };
        scratch.reset(self.slots.iter().flatten());
        self.progress = Progress::Expecting(Stage::One);
    }

    /// Fold `stage`'s rates into the increment and form the next trial
    /// state.
    ///
    /// `rates` is cell-major: the rate of slot `i` in cell `c` lives at
    /// `c * slot_count + i`.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-order stage or a rate buffer of the wrong size.
    pub fn apply_stage(&mut self, stage: Stage, h: f64, rates: &[f64]) {
        assert_eq!(
            self.progress,
            Progress::Expecting(stage),
            "group '{}' received {stage:?} out of order",
            self.group
        );
        let n = self.slots.len();
        let cells = self.cell_count();
        assert_eq!(
            rates.len(),
            cells * n,
            "group '{}' rate buffer size mismatch",
            self.group
        );
        let Some(scratch) = self.scratch.as_mut() else {
            panic!("group '{}' integrated before init_scratch", self.group);
        };
        let weight = stage.weight() * h;
        let trial = stage.next().map(|s| s.time_fraction() * h);
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(field) = slot.as_mut() else {
                panic!("group '{}' slot {i} unfilled", self.group);
            };
            let (base, increment) = scratch.buffer_mut(i).parts_mut();
            let values = field.values_mut();
            for c in 0..cells {
                let k = rates[c * n + i];
                increment[c] += weight * k;
                if let Some(a) = trial {
                    values[c] = base[c] + a * k;
                }
            }
        }
        self.progress = match stage.next() {
            Some(s) => Progress::Expecting(s),
            None => Progress::Committable,
        };
    }

    /// Write `base + increment / 6` into every field and clamp each slot
    /// into its kind's range.
    ///
    /// Returns the number of cell values the clamp changed.
    ///
    /// # Panics
    ///
    /// Panics unless all four stages have been applied.
    pub fn commit(&mut self) -> usize {
        assert_eq!(
            self.progress,
            Progress::Committable,
            "group '{}' committed before stage four",
            self.group
        );
        let Some(scratch) = self.scratch.as_ref() else {
            panic!("group '{}' integrated before init_scratch", self.group);
        };
        let specs = self.specs.as_deref().unwrap_or(&[]);
        let mut clamped = 0;
        for (i, (slot, spec)) in self.slots.iter_mut().zip(specs).enumerate() {
            let Some(field) = slot.as_mut() else {
                panic!("group '{}' slot {i} unfilled", self.group);
            };
            let buf = scratch.buffer(i);
            for ((v, b), inc) in field
                .values_mut()
                .iter_mut()
                .zip(buf.base())
                .zip(buf.increment())
            {
                *v = b + inc / 6.0;
            }
            let (lo, hi) = spec.kind.bounds();
            clamped += field.clamp(lo, hi);
        }
        self.progress = Progress::Idle;
        clamped
    }

    fn assert_complete(&self) {
        assert!(self.specs.is_some(), "group '{}' never sized", self.group);
        if let Some(i) = self.first_unfilled() {
            self.unfilled(i);
        }
    }

    fn unfilled(&self, i: usize) -> ! {
        let name = self.specs().get(i).map_or("?", |s| s.name.as_str());
        panic!("group '{}' slot {i} ({name}) unfilled", self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clot_core::Dimensions;
    use clot_mesh::Line1D;

    fn specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::concentration("A", Dimensions::CONCENTRATION),
            FieldSpec::fraction("theta"),
        ]
    }

    fn filled(a: f64, theta: f64) -> GroupFields {
        let m = Line1D::new(2, 1.0).unwrap();
        let mut g = GroupFields::sized("g", specs());
        g.fill(0, ScalarField::zero_gradient(&m, "A", Dimensions::CONCENTRATION, a));
        g.fill(1, ScalarField::zero_gradient(&m, "theta", Dimensions::DIMLESS, theta));
        g.init_scratch();
        g
    }

    fn run(g: &mut GroupFields, h: f64, rate: [f64; 2]) -> usize {
        let rates = [rate[0], rate[1], rate[0], rate[1]];
        g.begin_step();
        for s in Stage::ALL {
            g.apply_stage(s, h, &rates);
        }
        g.commit()
    }

    #[test]
    fn scratch_matches_slots() {
        let g = filled(1.0, 0.5);
        let s = g.scratch().unwrap();
        assert_eq!(s.len(), g.slot_count());
        assert_eq!(s.buffer(0).dimensions(), Dimensions::CONCENTRATION);
        assert_eq!(s.buffer(1).dimensions(), Dimensions::DIMLESS);
    }

    #[test]
    fn constant_rate_is_exact() {
        let mut g = filled(1.0, 0.25);
        assert_eq!(run(&mut g, 0.125, [2.0, 1.0]), 0);
        assert_eq!(g.field(0).values(), &[1.25, 1.25]);
        assert_eq!(g.field(1).values(), &[0.375, 0.375]);
    }

    #[test]
    fn commit_clamps_by_kind() {
        let mut g = filled(0.1, 0.9);
        assert_eq!(run(&mut g, 1.0, [-1.0, 1.0]), 4);
        assert_eq!(g.field(0).values(), &[0.0, 0.0]);
        assert_eq!(g.field(1).values(), &[1.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "sized twice")]
    fn sizing_twice_panics() {
        let mut g = GroupFields::sized("g", specs());
        g.size(specs());
    }

    #[test]
    #[should_panic(expected = "filled twice")]
    fn filling_twice_panics() {
        let mut g = filled(1.0, 0.5);
        let m = Line1D::new(2, 1.0).unwrap();
        g.fill(0, ScalarField::zero_gradient(&m, "A", Dimensions::CONCENTRATION, 0.0));
    }

    #[test]
    #[should_panic(expected = "slot 1 (theta) unfilled")]
    fn unfilled_slot_panics_at_scratch_init() {
        let m = Line1D::new(2, 1.0).unwrap();
        let mut g = GroupFields::sized("g", specs());
        g.fill(0, ScalarField::zero_gradient(&m, "A", Dimensions::CONCENTRATION, 0.0));
        assert!(!g.is_complete());
        g.init_scratch();
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn wrong_dimensions_panic() {
        let m = Line1D::new(2, 1.0).unwrap();
        let mut g = GroupFields::sized("g", specs());
        g.fill(0, ScalarField::zero_gradient(&m, "A", Dimensions::DIMLESS, 0.0));
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn skipping_a_stage_panics() {
        let mut g = filled(1.0, 0.5);
        g.begin_step();
        g.apply_stage(Stage::One, 0.1, &[0.0; 4]);
        g.apply_stage(Stage::Three, 0.1, &[0.0; 4]);
    }

    #[test]
    #[should_panic(expected = "before stage four")]
    fn early_commit_panics() {
        let mut g = filled(1.0, 0.5);
        g.begin_step();
        g.apply_stage(Stage::One, 0.1, &[0.0; 4]);
        g.commit();
    }

    #[test]
    fn trial_state_uses_stage_fraction() {
        let mut g = filled(1.0, 0.0);
        g.begin_step();
        g.apply_stage(Stage::One, 0.5, &[2.0, 0.0, 2.0, 0.0]);
        // Stage two is evaluated at y + h/2 k1.
        assert_eq!(g.field(0).values(), &[1.5, 1.5]);
        g.apply_stage(Stage::Two, 0.5, &[4.0, 0.0, 4.0, 0.0]);
        assert_eq!(g.field(0).values(), &[2.0, 2.0]);
        g.apply_stage(Stage::Three, 0.5, &[1.0, 0.0, 1.0, 0.0]);
        // Stage four is evaluated at y + h k3.
        assert_eq!(g.field(0).values(), &[1.5, 1.5]);
    }
}
