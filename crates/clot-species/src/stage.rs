//! The four classical Runge-Kutta stages.

/// One stage of a classical RK4 sub-step.
///
/// Stages run strictly in the order of [`Stage::ALL`]; each group's
/// [`GroupFields`](crate::GroupFields) asserts that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Rates at the start-of-substep state.
    One,
    /// Rates at `y + h/2 k1`.
    Two,
    /// Rates at `y + h/2 k2`.
    Three,
    /// Rates at `y + h k3`.
    Four,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 4] = [Stage::One, Stage::Two, Stage::Three, Stage::Four];

    /// Weight of this stage's rate in the final combination.
    pub fn weight(self) -> f64 {
        match self {
            Stage::One | Stage::Four => 1.0,
            Stage::Two | Stage::Three => 2.0,
        }
    }

    /// Fraction of `h` at which this stage's rates are evaluated.
    pub fn time_fraction(self) -> f64 {
        match self {
            Stage::One => 0.0,
            Stage::Two | Stage::Three => 0.5,
            Stage::Four => 1.0,
        }
    }

    /// The next stage, or `None` after [`Stage::Four`].
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::One => Some(Stage::Two),
            Stage::Two => Some(Stage::Three),
            Stage::Three => Some(Stage::Four),
            Stage::Four => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_six() {
        let sum: f64 = Stage::ALL.iter().map(|s| s.weight()).sum();
        assert_eq!(sum, 6.0);
    }

    #[test]
    fn next_walks_all() {
        let mut s = Some(Stage::One);
        let mut seen = Vec::new();
        while let Some(stage) = s {
            seen.push(stage);
            s = stage.next();
        }
        assert_eq!(seen, Stage::ALL);
    }
}
