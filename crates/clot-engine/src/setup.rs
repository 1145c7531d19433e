//! Building a [`ReactionSystem`] from constants, toggles and stored fields.
//!
//! Setup is the only place configuration can fail. It reads every
//! parameter bundle, reads or defaults every field according to its
//! [`ReadPolicy`], builds the groups the toggles ask for, and wires them.
//! Once [`ReactionSystem::build`] returns, stepping cannot fail.

use std::error::Error;
use std::fmt;

use clot_core::{
    Constants, ConstantsError, Dimensions, FieldKind, FieldSpec, GroupId, ReadPolicy,
};
use clot_kinetics::{
    names, platelet, ChemParams, FluidPhaseGroup, PlateletBoundGroup, PlateletGroup,
    PlateletParams, ReleaseTracker, SeBoundGroup,
};
use clot_mesh::{Mesh, MeshError, ScalarField, Stencil};
use clot_species::{EnvHandle, Environment, Network, Rk4, SpeciesGroup, WiringError};

use crate::adhesion::{smooth_hadh, AdhesionParams};
use crate::config::{ConfigError, ReactionConfig};
use crate::metrics::StepMetrics;
use crate::store::FieldStore;

// ── SetupError ─────────────────────────────────────────────────────

/// Errors detected while building a [`ReactionSystem`].
///
/// Every variant names the offending key, field or group.
#[derive(Clone, Debug, PartialEq)]
pub enum SetupError {
    /// Invalid reaction configuration.
    Config(ConfigError),
    /// A kinetic constant is missing or malformed.
    Constants(ConstantsError),
    /// A must-read field is not in the store.
    MissingField {
        /// The field name.
        name: String,
    },
    /// A stored field carries the wrong dimensions.
    DimensionMismatch {
        /// The field name.
        name: String,
        /// Dimensions the slot declares.
        expected: Dimensions,
        /// Dimensions found in the store.
        found: Dimensions,
    },
    /// A stored field does not fit the mesh.
    Mesh(MeshError),
    /// Wiring failed.
    Wiring(WiringError),
    /// A group named by the caller is not in the network.
    UnknownGroup {
        /// The group name.
        name: String,
    },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Constants(e) => write!(f, "constants: {e}"),
            Self::MissingField { name } => write!(f, "required field '{name}' not found"),
            Self::DimensionMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "field '{name}' has dimensions {found}, expected {expected}"
            ),
            Self::Mesh(e) => write!(f, "mesh: {e}"),
            Self::Wiring(e) => write!(f, "wiring: {e}"),
            Self::UnknownGroup { name } => write!(f, "no group named '{name}'"),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Constants(e) => Some(e),
            Self::Mesh(e) => Some(e),
            Self::Wiring(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ConstantsError> for SetupError {
    fn from(e: ConstantsError) -> Self {
        Self::Constants(e)
    }
}

impl From<MeshError> for SetupError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<WiringError> for SetupError {
    fn from(e: WiringError) -> Self {
        Self::Wiring(e)
    }
}

// ── Field reading ──────────────────────────────────────────────────

/// Read `spec` from `store`, or default it to zero.
///
/// A defaulted field copies the boundary layout of `template` when one is
/// given, and is zero-gradient everywhere otherwise. Stored fraction
/// fields are clamped into `[0, 1]`; concentrations are taken as stored.
///
/// # Errors
///
/// [`SetupError::MissingField`] for an absent must-read field,
/// [`SetupError::DimensionMismatch`] or [`SetupError::Mesh`] for a stored
/// field that does not fit the slot.
pub fn read_field(
    mesh: &dyn Mesh,
    store: &dyn FieldStore,
    spec: &FieldSpec,
    time: f64,
    template: Option<&ScalarField>,
) -> Result<ScalarField, SetupError> {
    match store.read(&spec.name, time) {
        Some(stored) => {
            log::info!("Reading field {}", spec.name);
            if stored.dimensions != spec.dimensions {
                return Err(SetupError::DimensionMismatch {
                    name: spec.name.clone(),
                    expected: spec.dimensions,
                    found: stored.dimensions,
                });
            }
            let mut field = stored.into_field(mesh, &spec.name)?;
            if matches!(spec.kind, FieldKind::Fraction) {
                let (lo, hi) = spec.kind.bounds();
                let clamped = field.clamp(lo, hi);
                if clamped > 0 {
                    log::warn!("{}: {clamped} cells outside [{lo}, {hi}] clamped", spec.name);
                    field.correct_boundary_conditions(mesh);
                }
            }
            Ok(field)
        }
        None if spec.policy == ReadPolicy::MustRead => Err(SetupError::MissingField {
            name: spec.name.clone(),
        }),
        None => {
            log::debug!("Field {} not stored, starting from zero", spec.name);
            Ok(match template {
                Some(t) => ScalarField::like(t, spec.name.as_str(), spec.dimensions, 0.0),
                None => ScalarField::zero_gradient(mesh, spec.name.as_str(), spec.dimensions, 0.0),
            })
        }
    }
}

/// Fill every slot of `group` from `store`. Defaulted slots copy the
/// boundary layout of slot 0.
///
/// # Errors
///
/// As [`read_field`].
pub fn fill_group(
    group: &mut dyn SpeciesGroup,
    mesh: &dyn Mesh,
    store: &dyn FieldStore,
    time: f64,
) -> Result<(), SetupError> {
    let specs = group.fields().specs().to_vec();
    for (i, spec) in specs.iter().enumerate() {
        let field = {
            let template = (i > 0).then(|| group.fields().field(0));
            read_field(mesh, store, spec, time, template)?
        };
        group.fields_mut().fill(i, field);
    }
    Ok(())
}

// ── ReactionSystem ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub(crate) struct AdhesionStep {
    pub(crate) params: AdhesionParams,
    pub(crate) eta: EnvHandle,
    pub(crate) theta_b: EnvHandle,
}

#[derive(Debug)]
pub(crate) struct ReleaseWatch {
    pub(crate) tracker: ReleaseTracker,
    pub(crate) group: GroupId,
    pub(crate) slot: usize,
    pub(crate) sigma: EnvHandle,
}

/// A wired network, its environment and the per-step machinery.
///
/// Built by [`build`](Self::build) for the platelet/coagulation model, or
/// by [`from_parts`](Self::from_parts) for any network. Advanced by
/// [`step`](Self::step).
pub struct ReactionSystem {
    pub(crate) mesh: Box<dyn Mesh>,
    pub(crate) stencil: Stencil,
    pub(crate) config: ReactionConfig,
    pub(crate) network: Network,
    pub(crate) env: Environment,
    pub(crate) rk: Rk4,
    /// Mobile slots per group, in group order.
    pub(crate) mobile: Vec<Vec<usize>>,
    pub(crate) adhesion: Option<AdhesionStep>,
    pub(crate) release: Option<ReleaseWatch>,
    pub(crate) time: f64,
    pub(crate) steps: u64,
    pub(crate) last_metrics: StepMetrics,
}

impl ReactionSystem {
    /// Build the platelet/coagulation model at `time`.
    ///
    /// 1. Validate `config` and read the parameter bundles.
    /// 2. Read or default the environment fields, then optionally smooth
    ///    `Hadh`.
    /// 3. Build `platelet` and `fluid_phase`, plus `se_bound` and
    ///    `platelet_bound` when coagulation is on, filling every slot.
    /// 4. Wire, publish `Theta_T`/`Theta_B`, and attach the `eta`
    ///    half-step and (if enabled) release tracking.
    ///
    /// # Errors
    ///
    /// The first [`SetupError`] encountered; nothing is partially built.
    pub fn build(
        mesh: Box<dyn Mesh>,
        constants: &Constants,
        config: ReactionConfig,
        store: &dyn FieldStore,
        time: f64,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let platelet_params = PlateletParams::from_constants(constants)?;
        let chem = if config.coag_reactions_on {
            ChemParams::from_constants(constants)?
        } else {
            ChemParams::fluid_only(constants)?
        };
        let adhesion = AdhesionParams::from(&platelet_params);
        let release = if config.track_release {
            Some(ReleaseTracker::from_constants(constants)?)
        } else {
            None
        };

        let mut env = Environment::new();
        for spec in names::environment_specs() {
            let field = read_field(&*mesh, store, &spec, time, env.iter().next())?;
            env.insert(field);
        }
        if config.smooth_adhesion {
            if let Some(hadh) = env.by_name_mut(names::HADH) {
                let clamped = smooth_hadh(&*mesh, hadh, &adhesion);
                log::info!("Smoothed {} ({clamped} cells clamped)", names::HADH);
            }
        }

        let mut groups: Vec<Box<dyn SpeciesGroup>> = vec![Box::new(PlateletGroup::new(platelet_params))];
        if config.coag_reactions_on {
            groups.push(Box::new(SeBoundGroup::new(chem.clone())));
            groups.push(Box::new(FluidPhaseGroup::new(chem.clone())));
            groups.push(Box::new(PlateletBoundGroup::new(chem)));
        } else {
            log::info!("coagulation reactions disabled");
            groups.push(Box::new(FluidPhaseGroup::new(chem)));
        }
        let mut network = Network::new();
        for mut group in groups {
            fill_group(group.as_mut(), &*mesh, store, time)?;
            network.add(group);
        }

        let system = Self::from_parts(mesh, config, network, env, time)?.with_adhesion(adhesion)?;
        match release {
            Some(tracker) => system.with_release(tracker, names::PLATELET, platelet::PMU),
            None => Ok(system),
        }
    }

    /// Wire an arbitrary filled network and prepare it for stepping.
    ///
    /// No half-step or release tracking is attached; see
    /// [`with_adhesion`](Self::with_adhesion) and
    /// [`with_release`](Self::with_release).
    ///
    /// # Errors
    ///
    /// An invalid config, a network whose cell count differs from the
    /// mesh, or a wiring failure.
    ///
    /// # Panics
    ///
    /// Panics if any group has an unfilled slot.
    pub fn from_parts(
        mesh: Box<dyn Mesh>,
        config: ReactionConfig,
        mut network: Network,
        mut env: Environment,
        time: f64,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        if network.cell_count() != mesh.cell_count() {
            return Err(SetupError::Mesh(MeshError::SizeMismatch {
                field: "network".to_string(),
                expected: mesh.cell_count(),
                actual: network.cell_count(),
            }));
        }
        network.wire(&env)?;
        network.publish(&mut env);
        let rk = Rk4::new(&network);
        let mobile: Vec<Vec<usize>> = network
            .groups()
            .iter()
            .map(|g| {
                g.fields()
                    .specs()
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.mobile)
                    .map(|(slot, _)| slot)
                    .collect()
            })
            .collect();
        let stencil = Stencil::new(&*mesh);
        log::info!(
            "Reaction system ready: {} groups, {} cells, M_rxn = {}",
            network.len(),
            mesh.cell_count(),
            config.reaction_substeps
        );
        Ok(Self {
            mesh,
            stencil,
            config,
            network,
            env,
            rk,
            mobile,
            adhesion: None,
            release: None,
            time,
            steps: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Run the `eta` half-step at the start of every flow step.
    ///
    /// # Errors
    ///
    /// [`SetupError::MissingField`] if the environment lacks `eta` or
    /// `Theta_B`.
    pub fn with_adhesion(mut self, params: AdhesionParams) -> Result<Self, SetupError> {
        let handle = |name: &str| {
            self.env.handle(name).ok_or_else(|| SetupError::MissingField {
                name: name.to_string(),
            })
        };
        let eta = handle(names::ETA)?;
        let theta_b = handle(names::THETA_B)?;
        self.adhesion = Some(AdhesionStep {
            params,
            eta,
            theta_b,
        });
        Ok(self)
    }

    /// Track activations as the decrease of `group`'s slot `slot` over
    /// each reaction loop and publish `sigma_release`.
    ///
    /// A zero `sigma_release` field is added to the environment if absent.
    ///
    /// # Errors
    ///
    /// [`SetupError::UnknownGroup`] if `group` is not in the network.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range for the group.
    pub fn with_release(
        mut self,
        tracker: ReleaseTracker,
        group: &str,
        slot: usize,
    ) -> Result<Self, SetupError> {
        let id = self.network.id(group).ok_or_else(|| SetupError::UnknownGroup {
            name: group.to_string(),
        })?;
        assert!(
            slot < self.network.group(id).field_count(),
            "group '{group}' has no slot {slot}"
        );
        let sigma = match self.env.handle(names::SIGMA_RELEASE) {
            Some(h) => h,
            None => self.env.insert(ScalarField::zero_gradient(
                &*self.mesh,
                names::SIGMA_RELEASE,
                names::SOURCE,
                0.0,
            )),
        };
        self.release = Some(ReleaseWatch {
            tracker,
            group: id,
            slot,
            sigma,
        });
        Ok(self)
    }

    /// The mesh partition.
    pub fn mesh(&self) -> &dyn Mesh {
        &*self.mesh
    }

    /// The configuration fixed at setup.
    pub fn config(&self) -> &ReactionConfig {
        &self.config
    }

    /// Slots of group `id` whose boundary values are reapplied after
    /// every reaction loop.
    pub fn mobile_slots(&self, id: GroupId) -> &[usize] {
        &self.mobile[id.index()]
    }

    /// The wired network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable network, for perturbing fields between steps.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Environment fields.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Mutable environment, for the flow solver to update `ADP` and
    /// `shearRate` between steps.
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Flow steps taken.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// RK4 sub-steps taken.
    pub fn substeps(&self) -> u64 {
        self.rk.substeps()
    }

    /// Metrics of the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Whether the `eta` half-step is attached.
    pub fn has_adhesion(&self) -> bool {
        self.adhesion.is_some()
    }

    /// The release tracker, if attached.
    pub fn release(&self) -> Option<&ReleaseTracker> {
        self.release.as_ref().map(|w| &w.tracker)
    }

    /// Find a field by name among the group fields, then the environment.
    pub fn field(&self, name: &str) -> Option<&ScalarField> {
        self.network
            .groups()
            .iter()
            .flat_map(|g| g.fields().iter())
            .find(|f| f.name() == name)
            .or_else(|| self.env.by_name(name))
    }

    /// Write every group field, then `eta`, `Theta_T`, `Theta_B` and
    /// `sigma_release` when present, at the current time.
    ///
    /// Returns the number of fields written.
    pub fn write_fields(&self, store: &mut dyn FieldStore) -> usize {
        let mut written = 0;
        for g in self.network.groups() {
            for f in g.fields().iter() {
                store.write(f.name(), self.time, f);
                written += 1;
            }
        }
        for name in [names::ETA, names::THETA_T, names::THETA_B, names::SIGMA_RELEASE] {
            if let Some(f) = self.env.by_name(name) {
                store.write(name, self.time, f);
                written += 1;
            }
        }
        written
    }
}

impl fmt::Debug for ReactionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionSystem")
            .field("cells", &self.mesh.cell_count())
            .field("network", &self.network)
            .field("time", &self.time)
            .field("steps", &self.steps)
            .finish()
    }
}
