//! Raw manifest descriptor types.
//!
//! Descriptors are deliberately loose: closed string enumerations carry an
//! `Unknown` variant so an out-of-range value parses successfully and is
//! rejected by the validator with a stable error code, instead of dying in
//! serde where an automated caller can't see all problems at once.

mod auth;
mod database;
mod entity;
mod mode;

use std::{path::Path, str::FromStr};

pub use auth::{AuthConfig, AuthProvider};
pub use database::{DatabaseConfig, DatabaseKind};
pub use entity::{
    EntityDescriptor, ExternalSource, FieldDescriptor, FieldKind, ProtectedPolicy,
    RelationDescriptor, RelationKind,
};
pub use mode::{ModeConfig, ModeKind};
use serde::Deserialize;

use crate::{Error, Result};

/// Root manifest descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestDescriptor {
    /// Declared entities, in order.
    #[serde(default)]
    pub entities: Vec<EntityDescriptor>,

    /// Database configuration. Mandatory iff mode is `full`.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Authentication configuration.
    #[serde(default)]
    pub auth: Option<AuthConfig>,

    /// Generation mode. Defaults to `full`.
    #[serde(default)]
    pub mode: ModeConfig,
}

impl ManifestDescriptor {
    /// Parse a manifest from TOML source with a filename for error reporting.
    pub fn from_toml_str(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| Error::parse(e, src, filename))
    }

    /// Load a manifest from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&src, &path.display().to_string())
    }

    /// Look up a declared entity by name.
    pub fn entity(&self, name: &str) -> Option<&EntityDescriptor> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Whether auth is configured and enabled.
    pub fn auth_enabled(&self) -> bool {
        self.auth.as_ref().is_some_and(|a| a.enabled)
    }
}

impl FromStr for ManifestDescriptor {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml_str(s, "manifest.toml")
    }
}
