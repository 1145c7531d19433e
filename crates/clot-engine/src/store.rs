//! Named, time-keyed field persistence.
//!
//! The reaction core does not own any file format. Setup reads fields
//! through [`FieldStore::read`] and the driver writes them back through
//! [`FieldStore::write`]; the host framework decides where they live.
//! [`MemoryStore`] keeps everything in memory for tests and embedding.

use indexmap::IndexMap;

use clot_core::Dimensions;
use clot_mesh::{BoundaryCondition, Mesh, MeshError, ScalarField};

/// One persisted field: dimensions, cell values and one boundary
/// condition per mesh patch.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredField {
    /// Physical dimensions of `values`.
    pub dimensions: Dimensions,
    /// Cell values.
    pub values: Vec<f64>,
    /// Patch conditions in mesh patch order.
    pub conditions: Vec<BoundaryCondition>,
}

impl StoredField {
    /// Rebuild a [`ScalarField`] called `name` on `mesh`.
    ///
    /// # Errors
    ///
    /// [`MeshError::SizeMismatch`] if the stored sizes do not match the
    /// mesh.
    pub fn into_field(self, mesh: &dyn Mesh, name: &str) -> Result<ScalarField, MeshError> {
        ScalarField::new(mesh, name, self.dimensions, self.values, self.conditions)
    }
}

impl From<&ScalarField> for StoredField {
    fn from(field: &ScalarField) -> Self {
        Self {
            dimensions: field.dimensions(),
            values: field.values().to_vec(),
            conditions: field.patches().iter().map(|p| p.condition()).collect(),
        }
    }
}

/// Persistence collaborator.
pub trait FieldStore {
    /// The stored field `name` valid at `time`, if any.
    fn read(&self, name: &str, time: f64) -> Option<StoredField>;

    /// Persist `field` under `name` at `time`.
    fn write(&mut self, name: &str, time: f64, field: &ScalarField);
}

/// In-memory [`FieldStore`].
///
/// Each name keeps a time-ordered history. [`read`](FieldStore::read)
/// returns the latest entry at or before the requested time, so a store
/// seeded at `t = 0` serves any later start time.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    fields: IndexMap<String, Vec<(f64, StoredField)>>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `stored` under `name` at `time`, replacing an entry at the
    /// same time.
    pub fn insert(&mut self, name: impl Into<String>, time: f64, stored: StoredField) {
        let history = self.fields.entry(name.into()).or_default();
        match history.binary_search_by(|(t, _)| t.total_cmp(&time)) {
            Ok(i) => history[i].1 = stored,
            Err(i) => history.insert(i, (time, stored)),
        }
    }

    /// Insert `field` under its own name at `time`.
    pub fn seed(&mut self, time: f64, field: &ScalarField) {
        self.insert(field.name().to_string(), time, StoredField::from(field));
    }

    /// Drop every entry for `name`. Returns whether any existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.fields.shift_remove(name).is_some()
    }

    /// Whether any entry exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Times at which `name` was stored, ascending.
    pub fn times(&self, name: &str) -> Vec<f64> {
        self.fields
            .get(name)
            .map(|h| h.iter().map(|(t, _)| *t).collect())
            .unwrap_or_default()
    }

    /// Most recent entry for `name`.
    pub fn latest(&self, name: &str) -> Option<&StoredField> {
        self.fields.get(name)?.last().map(|(_, s)| s)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of [`FieldStore::write`] calls received.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl FieldStore for MemoryStore {
    fn read(&self, name: &str, time: f64) -> Option<StoredField> {
        self.fields
            .get(name)?
            .iter()
            .rev()
            .find(|(t, _)| *t <= time)
            .map(|(_, s)| s.clone())
    }

    fn write(&mut self, name: &str, time: f64, field: &ScalarField) {
        self.writes += 1;
        self.insert(name.to_string(), time, StoredField::from(field));
    }
}
