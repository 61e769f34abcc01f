//! Manifest descriptors and validation for the Kiln entity compiler.
//!
//! A manifest is a data-only payload describing an application's entities,
//! database, auth, and generation mode. Descriptors are built externally
//! (by hand, by a builder surface, or by an automated caller) and checked by
//! [`validate`], which performs every check in a single pass and returns a
//! structured [`ValidationReport`] instead of failing on the first problem.
//! That report is the entire error surface for input problems; parsing is
//! the only operation here that can return `Err`.

mod error;
mod manifest;
mod report;
mod validate;

pub use error::{Error, Result};
pub use manifest::{
    AuthConfig, AuthProvider, DatabaseConfig, DatabaseKind, EntityDescriptor, ExternalSource,
    FieldDescriptor, FieldKind, ManifestDescriptor, ModeConfig, ModeKind, ProtectedPolicy,
    RelationDescriptor, RelationKind,
};
pub use report::{ErrorCode, ValidationError, ValidationReport, ValidationWarning};
pub use validate::{Check, KNOWN_CATEGORIES, validate};
