//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a species group within a reaction network.
///
/// Groups are registered once at setup and assigned sequential IDs.
/// `GroupId(n)` is the n-th registered group. Cross-links between groups
/// are stored as `GroupId`s, never as references, so the network can hand
/// out read-only views during rate evaluation and exclusive access during
/// stage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl GroupId {
    /// Index into the network's group list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GroupId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_display() {
        let id = GroupId::from(3);
        assert_eq!(id.index(), 3);
        assert_eq!(id.to_string(), "3");
        assert!(GroupId(1) < GroupId(2));
    }
}
