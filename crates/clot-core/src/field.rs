//! Field declarations: kinds, read policies and [`FieldSpec`].

use crate::dimension::Dimensions;

/// Value-range class of a concentration field.
///
/// Explicit integration near saturation can overshoot; after every commit
/// the integrator pulls values back into the range declared here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-negative, unbounded above.
    Concentration,
    /// Dimensionless fraction in `[0, 1]`.
    Fraction,
}

impl FieldKind {
    /// Inclusive `(min, max)` bounds for this kind.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Concentration => (0.0, f64::INFINITY),
            Self::Fraction => (0.0, 1.0),
        }
    }

    /// Clamp a value into this kind's range. NaN maps to the lower bound.
    pub fn clamp(self, v: f64) -> f64 {
        let (lo, hi) = self.bounds();
        if v.is_nan() {
            lo
        } else {
            v.clamp(lo, hi)
        }
    }

    /// Whether `v` already lies inside the range.
    pub fn contains(self, v: f64) -> bool {
        let (lo, hi) = self.bounds();
        v >= lo && v <= hi
    }
}

/// How a field is obtained from the persistence layer at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadPolicy {
    /// The field must exist; absence is a configuration error.
    MustRead,
    /// Read the field if stored, otherwise start from zero.
    ReadIfPresent,
}

/// Declaration of one slot of a species group.
///
/// Groups publish their specs once; the setup phase uses them to read or
/// default-initialize each slot, and the integrator uses `kind` to clamp
/// after every commit.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// Persistence name (e.g. `"plt_Pmu"`).
    pub name: String,
    /// Physical dimensions of the stored values.
    pub dimensions: Dimensions,
    /// Value-range class.
    pub kind: FieldKind,
    /// Setup read policy.
    pub policy: ReadPolicy,
    /// Whether the species is transported by the flow. Boundary conditions
    /// of mobile fields are reapplied after every reaction loop.
    pub mobile: bool,
}

impl FieldSpec {
    /// A non-negative concentration read with [`ReadPolicy::ReadIfPresent`].
    pub fn concentration(name: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            dimensions,
            kind: FieldKind::Concentration,
            policy: ReadPolicy::ReadIfPresent,
            mobile: false,
        }
    }

    /// A dimensionless `[0, 1]` fraction read with [`ReadPolicy::ReadIfPresent`].
    pub fn fraction(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimensions: Dimensions::DIMLESS,
            kind: FieldKind::Fraction,
            policy: ReadPolicy::ReadIfPresent,
            mobile: false,
        }
    }

    /// Require the field to be present in the store.
    pub fn must_read(mut self) -> Self {
        self.policy = ReadPolicy::MustRead;
        self
    }

    /// Mark the field as transported by the flow.
    pub fn mobile(mut self) -> Self {
        self.mobile = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_clamps_both_sides() {
        assert_eq!(FieldKind::Fraction.clamp(-0.5), 0.0);
        assert_eq!(FieldKind::Fraction.clamp(1.5), 1.0);
        assert_eq!(FieldKind::Fraction.clamp(0.25), 0.25);
        assert_eq!(FieldKind::Fraction.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn concentration_clamps_only_below() {
        assert_eq!(FieldKind::Concentration.clamp(-1e-12), 0.0);
        assert_eq!(FieldKind::Concentration.clamp(1e9), 1e9);
        assert!(!FieldKind::Concentration.contains(-1.0));
        assert!(FieldKind::Concentration.contains(1e30));
    }

    #[test]
    fn spec_builders() {
        let s = FieldSpec::concentration("plt_Pmu", Dimensions::NUMBER_DENSITY)
            .must_read()
            .mobile();
        assert_eq!(s.policy, ReadPolicy::MustRead);
        assert!(s.mobile);
        assert_eq!(s.kind, FieldKind::Concentration);

        let f = FieldSpec::fraction("Theta_B");
        assert_eq!(f.dimensions, Dimensions::DIMLESS);
        assert_eq!(f.policy, ReadPolicy::ReadIfPresent);
        assert!(!f.mobile);
    }
}
