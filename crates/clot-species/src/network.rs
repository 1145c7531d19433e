//! Group registry and one-time cross-link wiring.
//!
//! [`Network`] owns every active species group. Cross-links are
//! [`GroupId`] indices recorded once by [`Network::wire`]; after wiring
//! the registry is frozen, so recorded ids can never go stale. Disabled
//! groups are simply never added, and an optional lookup for them
//! resolves to `None` without leaving a wiring entry.

use indexmap::IndexMap;

use clot_core::GroupId;

use crate::environment::{EnvHandle, Environment};
use crate::error::WiringError;
use crate::group::SpeciesGroup;

/// Resolver handed to [`SpeciesGroup::wire`].
///
/// Every successful lookup of a sibling group or environment field is
/// recorded; the records become the network's dependency graph.
pub struct Linker<'a> {
    group: String,
    own: GroupId,
    names: &'a IndexMap<String, GroupId>,
    env: &'a Environment,
    groups: Vec<GroupId>,
    fields: Vec<EnvHandle>,
}

impl<'a> Linker<'a> {
    fn new(
        group: String,
        own: GroupId,
        names: &'a IndexMap<String, GroupId>,
        env: &'a Environment,
    ) -> Self {
        Self {
            group,
            own,
            names,
            env,
            groups: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Name of the group being wired.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Resolve a sibling group that must be registered.
    ///
    /// # Errors
    ///
    /// [`WiringError::MissingGroup`] if no group of that name exists.
    pub fn require(&mut self, name: &str) -> Result<GroupId, WiringError> {
        self.optional(name).ok_or_else(|| WiringError::MissingGroup {
            group: self.group.clone(),
            requires: name.to_string(),
        })
    }

    /// Resolve a sibling group that may be disabled.
    pub fn optional(&mut self, name: &str) -> Option<GroupId> {
        let id = *self.names.get(name)?;
        if id != self.own && !self.groups.contains(&id) {
            self.groups.push(id);
        }
        Some(id)
    }

    /// Resolve an environment field that must be present.
    ///
    /// # Errors
    ///
    /// [`WiringError::MissingEnvironmentField`] if the field is absent.
    pub fn env(&mut self, name: &str) -> Result<EnvHandle, WiringError> {
        self.env_optional(name)
            .ok_or_else(|| WiringError::MissingEnvironmentField {
                group: self.group.clone(),
                field: name.to_string(),
            })
    }

    /// Resolve an environment field that may be absent.
    pub fn env_optional(&mut self, name: &str) -> Option<EnvHandle> {
        let h = self.env.handle(name)?;
        if !self.fields.contains(&h) {
            self.fields.push(h);
        }
        Some(h)
    }
}

/// Registry of active species groups and their wiring.
///
/// # Lifecycle
///
/// 1. [`add`](Self::add) every enabled group.
/// 2. Fill every group's slots.
/// 3. [`wire`](Self::wire) exactly once.
/// 4. Integrate. Adding groups after wiring panics.
#[derive(Default)]
pub struct Network {
    groups: Vec<Box<dyn SpeciesGroup>>,
    names: IndexMap<String, GroupId>,
    edges: Vec<Vec<GroupId>>,
    env_reads: Vec<Vec<EnvHandle>>,
    wired: bool,
}

impl Network {
    /// Empty, unwired network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group.
    ///
    /// # Panics
    ///
    /// Panics if the network is already wired or a group of the same name
    /// is registered.
    pub fn add(&mut self, group: Box<dyn SpeciesGroup>) -> GroupId {
        assert!(
            !self.wired,
            "group '{}' added after wiring",
            group.name()
        );
        let id = GroupId(self.groups.len() as u32);
        let prev = self.names.insert(group.name().to_string(), id);
        assert!(prev.is_none(), "group '{}' registered twice", group.name());
        self.groups.push(group);
        id
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Id of the named group, if registered.
    pub fn id(&self, name: &str) -> Option<GroupId> {
        self.names.get(name).copied()
    }

    /// Whether the named group is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Group behind an id.
    ///
    /// # Panics
    ///
    /// Panics on an id not issued by this network.
    pub fn group(&self, id: GroupId) -> &dyn SpeciesGroup {
        match self.groups.get(id.index()) {
            Some(g) => g.as_ref(),
            None => panic!("stale group id {id}"),
        }
    }

    /// Mutable group behind an id.
    ///
    /// # Panics
    ///
    /// Panics on an id not issued by this network.
    pub fn group_mut(&mut self, id: GroupId) -> &mut dyn SpeciesGroup {
        match self.groups.get_mut(id.index()) {
            Some(g) => g.as_mut(),
            None => panic!("stale group id {id}"),
        }
    }

    /// Named group, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn SpeciesGroup> {
        self.id(name).map(|id| self.group(id))
    }

    /// All groups in registration order.
    pub fn groups(&self) -> &[Box<dyn SpeciesGroup>] {
        &self.groups
    }

    /// Whether [`wire`](Self::wire) has completed.
    pub fn is_wired(&self) -> bool {
        self.wired
    }

    /// Sibling groups whose fields `id`'s rate law reads. Empty before
    /// wiring.
    pub fn dependencies(&self, id: GroupId) -> &[GroupId] {
        self.edges.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Environment fields `id`'s rate law reads. Empty before wiring.
    pub fn environment_reads(&self, id: GroupId) -> &[EnvHandle] {
        self.env_reads.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of mesh cells covered by the groups' fields.
    pub fn cell_count(&self) -> usize {
        self.groups
            .first()
            .map_or(0, |g| g.fields().cell_count())
    }

    /// Wire every group, record the dependency graph and allocate RK
    /// scratch buffers.
    ///
    /// # Errors
    ///
    /// The first [`WiringError`] a group reports. The network must then be
    /// discarded.
    ///
    /// # Panics
    ///
    /// Panics if called twice, if any group has an unfilled slot, or if
    /// groups disagree on cell count.
    pub fn wire(&mut self, env: &Environment) -> Result<(), WiringError> {
        assert!(!self.wired, "network wired twice");
        let cells = self.cell_count();
        for g in &self.groups {
            let f = g.fields();
            if let Some(i) = f.first_unfilled() {
                panic!(
                    "group '{}' wired before slot {i} ({}) was filled",
                    g.name(),
                    f.specs()[i].name
                );
            }
            assert!(f.is_complete(), "group '{}' wired before sizing", g.name());
            assert_eq!(
                f.cell_count(),
                cells,
                "group '{}' size mismatch: {} cells, network has {cells}",
                g.name(),
                f.cell_count()
            );
        }

        let mut edges = Vec::with_capacity(self.groups.len());
        let mut env_reads = Vec::with_capacity(self.groups.len());
        for (i, g) in self.groups.iter_mut().enumerate() {
            let mut linker = Linker::new(g.name().to_string(), GroupId(i as u32), &self.names, env);
            g.wire(&mut linker)?;
            log::debug!(
                "wired '{}': groups {:?}, environment {:?}",
                linker.group,
                linker.groups,
                linker.fields
            );
            edges.push(linker.groups);
            env_reads.push(linker.fields);
        }
        for g in &mut self.groups {
            g.fields_mut().init_scratch();
        }
        self.edges = edges;
        self.env_reads = env_reads;
        self.wired = true;
        Ok(())
    }

    /// Let every group publish derived fields into `env`.
    pub fn publish(&self, env: &mut Environment) {
        for g in &self.groups {
            g.publish(env);
        }
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("groups", &self.names.keys().collect::<Vec<_>>())
            .field("edges", &self.edges)
            .field("wired", &self.wired)
            .finish()
    }
}
