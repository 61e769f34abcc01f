//! Intermediate representation for the Kiln entity compiler.
//!
//! The IR is the fully resolved, generator-agnostic form of a validated
//! manifest:
//!
//! ```text
//! manifest → validation (gate) → ManifestIR → generators → files
//! ```
//!
//! Every name a generator uses — table, column, accessor — is derived once
//! by the compiler through [`NamingContext`] and stored here, so independent
//! generators can never disagree on identifiers. The IR is an immutable,
//! single-use value: the runner reads it, generators get shared references,
//! nobody mutates it.

mod entity;
mod ir;
mod naming;

pub use entity::{
    Access, Constraints, DefaultValue, FieldOrigin, FieldType, JoinEntity, JoinKey, RelationKind,
    ResolvedEntity, ResolvedField, ResolvedRelation,
};
pub use ir::{DatabaseInfo, DatabaseKind, ExternalSourceInfo, ManifestIR, Mode};
pub use naming::{NamingContext, Pluralizer};
