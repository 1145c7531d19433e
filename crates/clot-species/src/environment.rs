//! Externally supplied fields that rate laws read but do not integrate.

use indexmap::IndexMap;

use clot_mesh::ScalarField;

/// Index of a field in an [`Environment`], resolved once during wiring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvHandle(pub u32);

impl EnvHandle {
    /// Position in the environment's insertion order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Named environment fields such as `eta`, `Hadh`, `ADP` and `shearRate`.
///
/// Insertion order is stable, so handles stay valid once issued; fields
/// are replaced in place, never removed.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    fields: IndexMap<String, ScalarField>,
}

impl Environment {
    /// Empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `field` under its own name, replacing any previous field of
    /// that name in place.
    pub fn insert(&mut self, field: ScalarField) -> EnvHandle {
        let (idx, _) = self.fields.insert_full(field.name().to_string(), field);
        EnvHandle(idx as u32)
    }

    /// Handle for `name`, if present.
    pub fn handle(&self, name: &str) -> Option<EnvHandle> {
        self.fields.get_index_of(name).map(|i| EnvHandle(i as u32))
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different environment.
    pub fn get(&self, h: EnvHandle) -> &ScalarField {
        match self.fields.get_index(h.index()) {
            Some((_, f)) => f,
            None => panic!("stale environment handle {h:?}"),
        }
    }

    /// Mutable field behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different environment.
    pub fn get_mut(&mut self, h: EnvHandle) -> &mut ScalarField {
        match self.fields.get_index_mut(h.index()) {
            Some((_, f)) => f,
            None => panic!("stale environment handle {h:?}"),
        }
    }

    /// Field by name.
    pub fn by_name(&self, name: &str) -> Option<&ScalarField> {
        self.fields.get(name)
    }

    /// Mutable field by name.
    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut ScalarField> {
        self.fields.get_mut(name)
    }

    /// Value of a handle's field in `cell`.
    #[inline]
    pub fn value(&self, h: EnvHandle, cell: usize) -> f64 {
        self.get(h).get(cell)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ScalarField> {
        self.fields.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clot_core::Dimensions;
    use clot_mesh::Line1D;

    #[test]
    fn handles_survive_replacement() {
        let m = Line1D::new(2, 1.0).unwrap();
        let mut env = Environment::new();
        let eta = env.insert(ScalarField::zero_gradient(&m, "eta", Dimensions::DIMLESS, 0.1));
        let adp = env.insert(ScalarField::zero_gradient(&m, "ADP", Dimensions::CONCENTRATION, 0.0));
        assert_ne!(eta, adp);

        let again = env.insert(ScalarField::zero_gradient(&m, "eta", Dimensions::DIMLESS, 0.7));
        assert_eq!(again, eta);
        assert_eq!(env.len(), 2);
        assert_eq!(env.value(eta, 1), 0.7);
        assert_eq!(env.handle("ADP"), Some(adp));
        assert!(env.handle("Hadh").is_none());
    }

    #[test]
    #[should_panic(expected = "stale environment handle")]
    fn foreign_handle_panics() {
        let env = Environment::new();
        env.get(EnvHandle(3));
    }
}
