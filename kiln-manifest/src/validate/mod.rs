//! Manifest validation.
//!
//! [`validate`] is a pure read over the manifest: it never fails, never
//! mutates, and runs **every** check in one pass so a caller sees all
//! violations at once instead of fixing them one round trip at a time.

mod checks;

pub use checks::KNOWN_CATEGORIES;
use checks::{
    AuthCoupling, DatabaseCoupling, ExternalSources, ModeShape, NamingShape, Structure,
};

use crate::{ManifestDescriptor, ValidationReport};

/// A single validation check over the manifest.
///
/// Checks are independent: each appends its own findings and never looks at
/// what earlier checks reported.
pub trait Check {
    /// The name of this check.
    fn name(&self) -> &'static str;

    /// Inspect the manifest and record findings.
    fn run(&self, manifest: &ManifestDescriptor, report: &mut ValidationReport);
}

fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(NamingShape),
        Box::new(Structure),
        Box::new(DatabaseCoupling),
        Box::new(AuthCoupling),
        Box::new(ModeShape),
        Box::new(ExternalSources),
    ]
}

/// Validate a manifest descriptor, returning the complete structured report.
pub fn validate(manifest: &ManifestDescriptor) -> ValidationReport {
    let mut report = ValidationReport::new();
    for check in default_checks() {
        check.run(manifest, &mut report);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    fn parse(src: &str) -> ManifestDescriptor {
        src.parse().expect("test manifest should parse")
    }

    #[test]
    fn test_valid_manifest_passes() {
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"

            [entities.fields.title]
            type = "text"

            [entities.relations.author]
            type = "hasOne"
            entity = "User"

            [[entities]]
            name = "User"

            [entities.fields.email]
            type = "text"
            unique = true
            "#,
        );

        let report = validate(&manifest);
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_all_violations_reported_in_one_pass() {
        // Three independent violations must yield exactly three errors.
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "user"

            [entities.fields.Email]
            type = "text"

            [entities.relations.org]
            type = "hasOne"
            entity = "Org"
            "#,
        );

        let report = validate(&manifest);
        assert_eq!(
            report.codes(),
            vec![
                ErrorCode::InvalidEntityName,
                ErrorCode::InvalidFieldName,
                ErrorCode::RelationTargetNotFound,
            ]
        );
    }

    #[test]
    fn test_name_errors_carry_suggestions() {
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "order_item"

            [entities.fields.CreatedBy]
            type = "text"
            "#,
        );

        let report = validate(&manifest);
        let entity_error = report
            .errors
            .iter()
            .find(|e| e.code == ErrorCode::InvalidEntityName)
            .unwrap();
        assert_eq!(entity_error.suggestion.as_deref(), Some("OrderItem"));

        let field_error = report
            .errors
            .iter()
            .find(|e| e.code == ErrorCode::InvalidFieldName)
            .unwrap();
        assert_eq!(field_error.suggestion.as_deref(), Some("createdBy"));
    }

    #[test]
    fn test_duplicate_entities_exact_match_only() {
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"

            [[entities]]
            name = "Post"
            [entities.fields.body]
            type = "text"
            "#,
        );

        let report = validate(&manifest);
        assert!(report.has_code(ErrorCode::DuplicateEntity));
    }

    #[test]
    fn test_case_insensitive_collision_not_detected() {
        // Exact string match only: "Post" vs "POST" passes duplicate
        // detection (though "POST" fails the PascalCase shape check).
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"

            [[entities]]
            name = "POST"
            [entities.fields.body]
            type = "text"
            "#,
        );

        let report = validate(&manifest);
        assert!(!report.has_code(ErrorCode::DuplicateEntity));
    }

    #[test]
    fn test_full_mode_requires_database() {
        let manifest = parse(
            r#"
            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            "#,
        );

        let report = validate(&manifest);
        assert!(report.has_code(ErrorCode::DatabaseRequired));
    }

    #[test]
    fn test_headless_mode_does_not_require_database() {
        let manifest = parse(
            r#"
            [mode]
            type = "headless"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            "#,
        );

        let report = validate(&manifest);
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn test_sqlite_requires_file() {
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            "#,
        );

        assert!(validate(&manifest).has_code(ErrorCode::SqliteRequiresFile));
    }

    #[test]
    fn test_postgres_requires_url() {
        let manifest = parse(
            r#"
            [database]
            type = "postgres"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            "#,
        );

        assert!(validate(&manifest).has_code(ErrorCode::PostgresRequiresUrl));
    }

    #[test]
    fn test_protected_requires_auth() {
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [auth]
            enabled = false

            [[entities]]
            name = "Post"
            protected = "all"
            [entities.fields.title]
            type = "text"
            "#,
        );

        assert!(validate(&manifest).has_code(ErrorCode::AuthRequiredForProtected));
    }

    #[test]
    fn test_explicitly_relaxed_policy_allowed_without_auth() {
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            protected = "none"
            [entities.fields.title]
            type = "text"
            "#,
        );

        let report = validate(&manifest);
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn test_unknown_enumeration_values() {
        let manifest = parse(
            r#"
            [mode]
            type = "watch"

            [database]
            type = "oracle"

            [auth]
            enabled = true
            provider = "ldap"

            [[entities]]
            name = "Post"
            protected = "everyone"

            [entities.fields.title]
            type = "blob"

            [entities.relations.author]
            type = "linkedTo"
            entity = "Post"
            "#,
        );

        let report = validate(&manifest);
        assert!(report.has_code(ErrorCode::InvalidMode));
        assert!(report.has_code(ErrorCode::InvalidDatabaseType));
        assert!(report.has_code(ErrorCode::InvalidProvider));
        assert!(report.has_code(ErrorCode::InvalidProtectedValue));
        assert!(report.has_code(ErrorCode::InvalidFieldType));
        assert!(report.has_code(ErrorCode::InvalidRelationType));
    }

    #[test]
    fn test_entity_without_fields() {
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            "#,
        );

        assert!(validate(&manifest).has_code(ErrorCode::MissingEntityFields));
    }

    #[test]
    fn test_external_source_requires_base_url() {
        let manifest = parse(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Weather"
            [entities.fields.summary]
            type = "text"
            [entities.source]
            path = "/v1/weather"
            "#,
        );

        assert!(validate(&manifest).has_code(ErrorCode::ExternalSourceInvalid));
    }

    #[test]
    fn test_unknown_include_category_warns() {
        let manifest = parse(
            r#"
            [mode]
            type = "headless"
            include = ["validation", "widgets"]

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            "#,
        );

        let report = validate(&manifest);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("widgets"));
    }
}
