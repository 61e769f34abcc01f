//! Top-level manifest IR.

use serde::Serialize;

use crate::{JoinEntity, NamingContext, ResolvedEntity};

/// The fully resolved intermediate representation of a validated manifest.
///
/// Produced once by the compiler, consumed exactly once by the runner, then
/// discarded. Generators receive shared references and must not re-derive
/// any name stored here.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestIR {
    /// Database info; `None` under headless mode.
    pub database: Option<DatabaseInfo>,
    /// Resolved generation mode.
    pub mode: Mode,
    /// Resolved entities in declaration order.
    pub entities: Vec<ResolvedEntity>,
    /// Synthesized many-to-many join entities.
    pub joins: Vec<JoinEntity>,
    /// Shared naming context used for every derived name.
    pub naming: NamingContext,
}

impl ManifestIR {
    /// Look up a resolved entity by name.
    pub fn entity(&self, name: &str) -> Option<&ResolvedEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Look up a join entity by name.
    pub fn join(&self, name: &str) -> Option<&JoinEntity> {
        self.joins.iter().find(|j| j.name == name)
    }
}

/// Resolved database information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseInfo {
    /// Database engine.
    pub kind: DatabaseKind,
    /// File path (sqlite).
    pub file: Option<String>,
    /// Connection URL (postgres, mysql).
    pub url: Option<String>,
}

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
    Mysql,
}

/// Resolved generation mode.
///
/// Controls which artifact categories a run produces; the actual filtering
/// lives with the generator machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Every category runs; database required.
    Full,
    /// Storage schema never runs; an explicit include-list further restricts
    /// the remaining categories.
    Headless { include: Option<Vec<String>> },
    /// Fixed category set regardless of include-list.
    ApiOnly,
}

/// External HTTP source backing an entity instead of local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalSourceInfo {
    /// Base URL of the upstream service.
    pub base_url: String,
    /// Optional path prefix under the base URL.
    pub path: Option<String>,
}
