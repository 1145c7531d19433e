//! The [`SpeciesGroup`] trait.
//!
//! A species group is a bundle of related concentration fields advanced
//! together under one rate law. Variants differ only in field count and
//! rate law; the integrator drives every variant through the same
//! [`GroupFields`] stage protocol and never branches on variant identity.

use crate::context::RateContext;
use crate::environment::Environment;
use crate::error::WiringError;
use crate::fields::GroupFields;
use crate::network::Linker;

/// A polymorphic species group held by the [`Network`](crate::Network).
///
/// # Contract
///
/// - Slots are sized in the constructor and filled by setup before
///   [`Network::wire`](crate::Network::wire).
/// - `wire` is called exactly once and records every sibling group and
///   environment field the rate law reads.
/// - `rates` is a pure function of the network state it is handed; it must
///   not read groups it did not resolve in `wire`.
///
/// # Object safety
///
/// The trait is object-safe; the network stores groups as
/// `Vec<Box<dyn SpeciesGroup>>`.
///
/// # Examples
///
/// A single-field group with a constant production rate:
///
/// ```
/// use clot_core::{Dimensions, FieldSpec};
/// use clot_species::{GroupFields, Linker, RateContext, SpeciesGroup, WiringError};
///
/// struct Source {
///     fields: GroupFields,
///     rate: f64,
/// }
///
/// impl SpeciesGroup for Source {
///     fn name(&self) -> &str { "source" }
///     fn fields(&self) -> &GroupFields { &self.fields }
///     fn fields_mut(&mut self) -> &mut GroupFields { &mut self.fields }
///     fn wire(&mut self, _: &mut Linker<'_>) -> Result<(), WiringError> { Ok(()) }
///     fn rates(&self, _: &RateContext<'_>, _cell: usize, out: &mut [f64]) {
///         out[0] = self.rate;
///     }
/// }
///
/// let g = Source {
///     fields: GroupFields::sized("source", vec![
///         FieldSpec::concentration("S", Dimensions::CONCENTRATION),
///     ]),
///     rate: 1.0,
/// };
/// assert_eq!(g.field_count(), 1);
/// ```
pub trait SpeciesGroup: Send + 'static {
    /// Registry name, used for wiring lookups and diagnostics.
    fn name(&self) -> &str;

    /// Field storage.
    fn fields(&self) -> &GroupFields;

    /// Mutable field storage.
    fn fields_mut(&mut self) -> &mut GroupFields;

    /// Declared field count.
    fn field_count(&self) -> usize {
        self.fields().slot_count()
    }

    /// Resolve and record the sibling groups and environment fields the
    /// rate law reads.
    ///
    /// Optional siblings that are absent (disabled) resolve to `None` and
    /// leave no wiring entry.
    fn wire(&mut self, linker: &mut Linker<'_>) -> Result<(), WiringError>;

    /// Write the rate of every slot in `cell` into `out`
    /// (`out.len() == field_count()`).
    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]);

    /// Publish derived quantities into the environment after a reaction
    /// loop. Default: nothing.
    fn publish(&self, _env: &mut Environment) {}
}
