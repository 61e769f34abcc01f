//! Mode and database resolution.

use kiln_ir::{DatabaseInfo, DatabaseKind, Mode};
use kiln_manifest::{DatabaseConfig, DatabaseKind as DeclaredKind, ModeConfig, ModeKind};

/// Resolve the declared mode configuration.
pub(crate) fn resolve_mode(mode: &ModeConfig) -> Mode {
    match &mode.kind {
        ModeKind::Full => Mode::Full,
        ModeKind::Headless => Mode::Headless {
            include: mode.include.clone(),
        },
        ModeKind::ApiOnly => Mode::ApiOnly,
        // Gated out by validation; full is the declared default.
        ModeKind::Unknown(_) => Mode::Full,
    }
}

/// Resolve database info. Headless runs carry no storage configuration in
/// the IR even when the manifest declares one.
pub(crate) fn resolve_database(
    database: Option<&DatabaseConfig>,
    mode: &Mode,
) -> Option<DatabaseInfo> {
    if matches!(mode, Mode::Headless { .. }) {
        return None;
    }

    let database = database?;
    let kind = match &database.kind {
        DeclaredKind::Sqlite => DatabaseKind::Sqlite,
        DeclaredKind::Postgres => DatabaseKind::Postgres,
        DeclaredKind::Mysql => DatabaseKind::Mysql,
        DeclaredKind::Unknown(_) => return None,
    };

    Some(DatabaseInfo {
        kind,
        file: database.file.clone(),
        url: database.url.clone(),
    })
}
