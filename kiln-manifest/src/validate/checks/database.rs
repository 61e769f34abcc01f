//! Mode/database coupling checks.

use crate::{
    Check, ErrorCode, ManifestDescriptor, ValidationError, ValidationReport,
    manifest::{DatabaseKind, ModeKind},
};

/// Checks that the database block matches what the generation mode and the
/// chosen engine require.
pub struct DatabaseCoupling;

impl Check for DatabaseCoupling {
    fn name(&self) -> &'static str {
        "database-coupling"
    }

    fn run(&self, manifest: &ManifestDescriptor, report: &mut ValidationReport) {
        if manifest.mode.kind == ModeKind::Full && manifest.database.is_none() {
            report.error(ValidationError::new(
                ErrorCode::DatabaseRequired,
                "database",
                "full mode requires a database block",
            ));
        }

        let Some(database) = &manifest.database else {
            return;
        };

        match &database.kind {
            DatabaseKind::Unknown(kind) => {
                report.error(ValidationError::new(
                    ErrorCode::InvalidDatabaseType,
                    "database.type",
                    format!(
                        "unknown database type '{kind}'; valid types are: {}",
                        DatabaseKind::VALID.join(", ")
                    ),
                ));
            }
            DatabaseKind::Sqlite => {
                if database.file.as_deref().is_none_or(str::is_empty) {
                    report.error(ValidationError::new(
                        ErrorCode::SqliteRequiresFile,
                        "database.file",
                        "sqlite requires a database file path",
                    ));
                }
            }
            DatabaseKind::Postgres | DatabaseKind::Mysql => {
                if database.url.as_deref().is_none_or(str::is_empty) {
                    report.error(ValidationError::new(
                        ErrorCode::PostgresRequiresUrl,
                        "database.url",
                        format!(
                            "{} requires a connection URL",
                            if database.kind == DatabaseKind::Postgres {
                                "postgres"
                            } else {
                                "mysql"
                            }
                        ),
                    ));
                }
            }
        }
    }
}
