//! Physical dimensions carried by constants and fields.
//!
//! A [`Dimensions`] value is a vector of integer exponents over the base
//! quantities used by the kinetics: mass, length, time and amount of
//! substance. Platelet densities are counts per volume, so they carry
//! `length^-3` with no moles.

use std::fmt;
use std::ops::{Div, Mul};

/// Exponents over `[mass, length, time, moles]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    /// Mass exponent.
    pub mass: i8,
    /// Length exponent.
    pub length: i8,
    /// Time exponent.
    pub time: i8,
    /// Amount-of-substance exponent.
    pub moles: i8,
}

impl Dimensions {
    /// Construct from raw exponents `[mass, length, time, moles]`.
    pub const fn new(mass: i8, length: i8, time: i8, moles: i8) -> Self {
        Self {
            mass,
            length,
            time,
            moles,
        }
    }

    /// Dimensionless.
    pub const DIMLESS: Self = Self::new(0, 0, 0, 0);
    /// Length.
    pub const LENGTH: Self = Self::new(0, 1, 0, 0);
    /// Time.
    pub const TIME: Self = Self::new(0, 0, 1, 0);
    /// Amount of substance.
    pub const MOLES: Self = Self::new(0, 0, 0, 1);
    /// Volume.
    pub const VOLUME: Self = Self::new(0, 3, 0, 0);
    /// Reciprocal time: first-order rate constants, shear rate.
    pub const RATE: Self = Self::new(0, 0, -1, 0);
    /// Molar concentration, moles per volume.
    pub const CONCENTRATION: Self = Self::new(0, -3, 0, 1);
    /// Number density, counts per volume (platelets).
    pub const NUMBER_DENSITY: Self = Self::new(0, -3, 0, 0);
    /// Second-order rate constant, volume per mole per time.
    pub const BIMOLECULAR_RATE: Self = Self::new(0, 3, -1, -1);
    /// Kinematic diffusivity, area per time.
    pub const DIFFUSIVITY: Self = Self::new(0, 2, -1, 0);

    /// Whether every exponent is zero.
    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMLESS
    }

    /// Raise to an integer power.
    pub fn powi(self, n: i8) -> Self {
        Self::new(
            self.mass * n,
            self.length * n,
            self.time * n,
            self.moles * n,
        )
    }
}

impl Mul for Dimensions {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.mass + rhs.mass,
            self.length + rhs.length,
            self.time + rhs.time,
            self.moles + rhs.moles,
        )
    }
}

impl Div for Dimensions {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.mass - rhs.mass,
            self.length - rhs.length,
            self.time - rhs.time,
            self.moles - rhs.moles,
        )
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {}]",
            self.mass, self.length, self.time, self.moles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_dims() -> impl Strategy<Value = Dimensions> {
        (-4i8..=4, -4i8..=4, -4i8..=4, -4i8..=4)
            .prop_map(|(m, l, t, n)| Dimensions::new(m, l, t, n))
    }

    #[test]
    fn named_dimensions_compose() {
        assert_eq!(
            Dimensions::MOLES / Dimensions::VOLUME,
            Dimensions::CONCENTRATION
        );
        assert_eq!(
            Dimensions::BIMOLECULAR_RATE * Dimensions::CONCENTRATION,
            Dimensions::RATE
        );
        assert_eq!(
            Dimensions::LENGTH.powi(2) / Dimensions::TIME,
            Dimensions::DIFFUSIVITY
        );
        assert!((Dimensions::RATE * Dimensions::TIME).is_dimensionless());
    }

    #[test]
    fn display_lists_exponents() {
        assert_eq!(Dimensions::CONCENTRATION.to_string(), "[0 -3 0 1]");
    }

    proptest! {
        #[test]
        fn div_inverts_mul(a in arb_dims(), b in arb_dims()) {
            prop_assert_eq!((a * b) / b, a);
        }

        #[test]
        fn mul_commutative(a in arb_dims(), b in arb_dims()) {
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn self_division_is_dimensionless(a in arb_dims()) {
            prop_assert!((a / a).is_dimensionless());
        }
    }
}
