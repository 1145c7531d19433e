//! Minimal groups for this crate's unit tests.

use clot_core::{Dimensions, FieldSpec, GroupId};
use clot_mesh::{Mesh, ScalarField};

use crate::context::RateContext;
use crate::error::WiringError;
use crate::fields::GroupFields;
use crate::group::SpeciesGroup;
use crate::network::Linker;

/// `x' = -lambda x`.
pub(crate) struct Decay {
    name: String,
    fields: GroupFields,
    lambda: f64,
}

impl Decay {
    pub(crate) fn unfilled(name: &str, lambda: f64) -> Self {
        Self {
            name: name.to_string(),
            fields: GroupFields::sized(
                name,
                vec![FieldSpec::concentration("x", Dimensions::CONCENTRATION)],
            ),
            lambda,
        }
    }

    pub(crate) fn filled(mesh: &dyn Mesh, name: &str, lambda: f64, x0: f64) -> Self {
        let mut g = Self::unfilled(name, lambda);
        g.fields.fill(
            0,
            ScalarField::zero_gradient(mesh, "x", Dimensions::CONCENTRATION, x0),
        );
        g
    }
}

impl SpeciesGroup for Decay {
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

/// `y' = x` where `x` is slot 0 of another group.
pub(crate) struct Follower {
    name: String,
    target: String,
    source: Option<GroupId>,
    fields: GroupFields,
}

impl Follower {
    pub(crate) fn filled(mesh: &dyn Mesh, name: &str, target: &str) -> Self {
        let mut fields = GroupFields::sized(
            name,
            vec![FieldSpec::concentration("y", Dimensions::CONCENTRATION)],
        );
        fields.fill(
            0,
            ScalarField::zero_gradient(mesh, "y", Dimensions::CONCENTRATION, 0.0),
        );
        Self {
            name: name.to_string(),
            target: target.to_string(),
            source: None,
            fields,
        }
    }
}

impl SpeciesGroup for Follower {
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
        self.source = Some(linker.require(&self.target)?);
        Ok(())
    }
    fn rates(&self, ctx: &RateContext<'_>, cell: usize, out: &mut [f64]) {
        let Some(src) = self.source else {
            panic!("'{}' evaluated before wiring", self.name);
        };
        out[0] = ctx.value(src, 0, cell);
    }
}
