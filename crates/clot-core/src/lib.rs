//! Core types for the clot reaction-kinetics workspace.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by every other crate: group identifiers, physical
//! [`Dimensions`], the read-only [`Constants`] bundle, field kinds, and the
//! constants error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod dimension;
pub mod error;
pub mod field;
pub mod id;

pub use constants::{Constants, ConstantsBuilder, DimensionedScalar};
pub use dimension::Dimensions;
pub use error::ConstantsError;
pub use field::{FieldKind, FieldSpec, ReadPolicy};
pub use id::GroupId;
