//! Mock species groups with known behaviour.
//!
//! - [`ConstantRate`]: `x' = r`, exact under RK4.
//! - [`LinearDecay`]: `x' = -lambda x`, for convergence-order checks.
//! - [`Oscillator`]: a pair of groups reading each other, `x' = -w y`,
//!   `y' = w x`.
//! - [`AdpPool`]: ADP fed by the published `sigma_release` and consumed
//!   at first order.
//! - [`ShearActivated`]: resting/activated platelets activated by the
//!   [`AdpPool`] group, enhanced by `shearRate`.

use clot_core::{Dimensions, FieldSpec, GroupId};
use clot_kinetics::names;
use clot_mesh::{Mesh, ScalarField};
use clot_species::{EnvHandle, GroupFields, Linker, RateContext, SpeciesGroup, WiringError};

fn single(group: &str, field: &str, dims: Dimensions) -> GroupFields {
    GroupFields::sized(group, vec![FieldSpec::concentration(field, dims)])
}

fn filled(mesh: &dyn Mesh, mut fields: GroupFields, init: &[f64]) -> GroupFields {
    let specs = fields.specs().to_vec();
    for (i, (spec, &v)) in specs.iter().zip(init).enumerate() {
        fields.fill(i, ScalarField::zero_gradient(mesh, spec.name.as_str(), spec.dimensions, v));
    }
    fields
}

/// `x' = rate` in every cell.
pub struct ConstantRate {
    name: String,
    fields: GroupFields,
    /// Constant time derivative of `x`.
    pub rate: f64,
}

impl ConstantRate {
    /// Group `name` with field `{name}_x` starting at `x0`.
    pub fn new(mesh: &dyn Mesh, name: &str, rate: f64, x0: f64) -> Self {
        let field = format!("{name}_x");
        Self {
            name: name.to_string(),
            fields: filled(mesh, single(name, &field, Dimensions::CONCENTRATION), &[x0]),
            rate,
        }
    }
}

impl SpeciesGroup for ConstantRate {
    fn name(&self) -> &str {
        &self.name
    }
    fn fields(&self) -> &GroupFields {
        &self.fields
    }
    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }
    fn wire(&mut self, _: &mut Linker<'_>) -> Result<(), WiringError> {
        Ok(())
    }
    fn rates(&self, _: &RateContext<'_>, _cell: usize, out: &mut [f64]) {
        out[0] = self.rate;
    }
}

/// `x' = -lambda x`.
pub struct LinearDecay {
    name: String,
    fields: GroupFields,
    /// Decay rate of `x`.
    pub lambda: f64,
}

impl LinearDecay {
    /// Group `name` with field `{name}_x` starting at `x0`.
    pub fn new(mesh: &dyn Mesh, name: &str, lambda: f64, x0: f64) -> Self {
        let field = format!("{name}_x");
        Self {
            name: name.to_string(),
            fields: filled(mesh, single(name, &field, Dimensions::CONCENTRATION), &[x0]),
            lambda,
        }
    }
}

impl SpeciesGroup for LinearDecay {
    fn name(&self) -> &str {
        &self.name
    }
    fn fields(&self) -> &GroupFields {
        &self.fields
    }
    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }
    fn wire(&mut self, _: &mut Linker<'_>) -> Result<(), WiringError> {
        Ok(())
    }
    fn rates(&self, _: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        out[0] = -self.lambda * self.fields.value(0, cell);
    }
}

/// One half of a harmonic oscillator split across two groups.
///
/// Values are clamped at zero like any concentration, so the pair
/// oscillates about a positive center (see [`Oscillator::pair`]).
pub struct Oscillator {
    name: String,
    partner: String,
    fields: GroupFields,
    omega: f64,
    center: f64,
    link: Option<GroupId>,
}

impl Oscillator {
    /// Groups `osc_x` and `osc_y` oscillating about `center` with
    /// angular frequency `omega`, starting at `(center + amplitude, center)`.
    ///
    /// With `center > amplitude` both values stay positive.
    pub fn pair(mesh: &dyn Mesh, omega: f64, center: f64, amplitude: f64) -> (Self, Self) {
        let make = |name: &str, partner: &str, sign: f64, x0: f64| Self {
            name: name.to_string(),
            partner: partner.to_string(),
            fields: filled(
                mesh,
                single(name, &format!("{name}_v"), Dimensions::CONCENTRATION),
                &[x0],
            ),
            omega: sign * omega,
            center,
            link: None,
        };
        (
            make("osc_x", "osc_y", -1.0, center + amplitude),
            make("osc_y", "osc_x", 1.0, center),
        )
    }
}

impl SpeciesGroup for Oscillator {
    fn name(&self) -> &str {
        &self.name
    }
    fn fields(&self) -> &GroupFields {
        &self.fields
    }
    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }
    fn wire(&mut self, linker: &mut Linker<'_>) -> Result<(), WiringError> {
        self.link = Some(linker.require(&self.partner)?);
        Ok(())
    }
    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        let Some(partner) = self.link else {
            panic!("oscillator '{}' evaluated before wiring", self.name);
        };
        out[0] = self.omega * (ctx.value(partner, 0, cell) - self.center);
    }
}

/// Group `adp_pool` with field `ADP_pool`:
/// `ADP' = sigma_release - uptake * ADP`.
///
/// Reads `sigma_release` if the environment has it.
pub struct AdpPool {
    fields: GroupFields,
    /// First-order uptake rate of the pool.
    pub uptake: f64,
    sigma: Option<EnvHandle>,
}

impl AdpPool {
    /// Group name.
    pub const NAME: &'static str = "adp_pool";
    /// Name of the single field.
    pub const FIELD: &'static str = "ADP_pool";

    /// A pool starting at `adp0` everywhere.
    pub fn new(mesh: &dyn Mesh, uptake: f64, adp0: f64) -> Self {
        Self {
            fields: filled(
                mesh,
                single(Self::NAME, Self::FIELD, Dimensions::CONCENTRATION),
                &[adp0],
            ),
            uptake,
            sigma: None,
        }
    }
}

impl SpeciesGroup for AdpPool {
    fn name(&self) -> &str {
        Self::NAME
    }
    fn fields(&self) -> &GroupFields {
        &self.fields
    }
    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }
    fn wire(&mut self, linker: &mut Linker<'_>) -> Result<(), WiringError> {
        self.sigma = linker.env_optional(names::SIGMA_RELEASE);
        Ok(())
    }
    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        let source = self.sigma.map_or(0.0, |h| ctx.env(h, cell));
        out[0] = source - self.uptake * self.fields.value(0, cell);
    }
}

/// Group `shear_activated` with fields `Pu` (mobile) and `Pa`:
///
/// ```text
/// k   = k_act * ADP / (ADP + crit) * (1 + |shearRate| / gamma_ref)
/// Pu' = -k Pu
/// Pa' =  k Pu
/// ```
pub struct ShearActivated {
    fields: GroupFields,
    /// Maximal activation rate.
    pub k_act: f64,
    /// ADP half-saturation.
    pub crit: f64,
    /// Shear at which activation doubles.
    pub gamma_ref: f64,
    links: Option<(GroupId, EnvHandle)>,
}

impl ShearActivated {
    /// Group name.
    pub const NAME: &'static str = "shear_activated";

    /// `Pu = pu0` and `Pa = 0` everywhere.
    pub fn new(mesh: &dyn Mesh, k_act: f64, crit: f64, gamma_ref: f64, pu0: f64) -> Self {
        let n = Dimensions::NUMBER_DENSITY;
        let fields = GroupFields::sized(
            Self::NAME,
            vec![
                FieldSpec::concentration("Pu", n).mobile(),
                FieldSpec::concentration("Pa", n),
            ],
        );
        Self {
            fields: filled(mesh, fields, &[pu0, 0.0]),
            k_act,
            crit,
            gamma_ref,
            links: None,
        }
    }
}

impl SpeciesGroup for ShearActivated {
    fn name(&self) -> &str {
        Self::NAME
    }
    fn fields(&self) -> &GroupFields {
        &self.fields
    }
    fn fields_mut(&mut self) -> &mut GroupFields {
        &mut self.fields
    }
    fn wire(&mut self, linker: &mut Linker<'_>) -> Result<(), WiringError> {
        let pool = linker.require(AdpPool::NAME)?;
        let shear = linker.env(names::SHEAR_RATE)?;
        self.links = Some((pool, shear));
        Ok(())
    }
    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        let Some((pool, shear)) = self.links else {
            panic!("group '{}' evaluated before wiring", Self::NAME);
        };
        let adp = ctx.value(pool, 0, cell).max(0.0);
        let gamma = ctx.env(shear, cell).abs();
        let k = self.k_act * adp / (adp + self.crit) * (1.0 + gamma / self.gamma_ref);
        let pu = self.fields.value(0, cell);
        out[0] = -k * pu;
        out[1] = k * pu;
    }
}
