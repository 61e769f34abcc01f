//! Structural checks: entity shape, closed enumerations, relation targets.

use std::collections::HashSet;

use crate::{
    Check, ErrorCode, ManifestDescriptor, ValidationError, ValidationReport,
    manifest::{FieldKind, RelationKind},
};

/// Checks structural rules that don't depend on configuration coupling:
/// duplicate entities, missing fields, field/relation kinds inside their
/// closed enumerations, and relation targets resolving to declared entities.
pub struct Structure;

impl Check for Structure {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn run(&self, manifest: &ManifestDescriptor, report: &mut ValidationReport) {
        // Exact string match only; case-insensitive collisions pass.
        let mut seen: HashSet<&str> = HashSet::new();
        let declared: HashSet<&str> = manifest.entities.iter().map(|e| e.name.as_str()).collect();

        for entity in &manifest.entities {
            if !seen.insert(&entity.name) {
                report.error(ValidationError::new(
                    ErrorCode::DuplicateEntity,
                    format!("entities.{}", entity.name),
                    format!("entity '{}' is declared more than once", entity.name),
                ));
            }

            if entity.fields.is_empty() {
                report.error(ValidationError::new(
                    ErrorCode::MissingEntityFields,
                    format!("entities.{}", entity.name),
                    format!("entity '{}' declares no fields", entity.name),
                ));
            }

            for (field_name, field) in &entity.fields {
                if let FieldKind::Unknown(kind) = &field.kind {
                    report.error(ValidationError::new(
                        ErrorCode::InvalidFieldType,
                        format!("entities.{}.fields.{}", entity.name, field_name),
                        format!(
                            "unknown field type '{kind}'; valid types are: {}",
                            FieldKind::VALID.join(", ")
                        ),
                    ));
                }
            }

            for (relation_name, relation) in &entity.relations {
                let path = format!("entities.{}.relations.{}", entity.name, relation_name);

                if let RelationKind::Unknown(kind) = &relation.kind {
                    report.error(ValidationError::new(
                        ErrorCode::InvalidRelationType,
                        path.clone(),
                        format!(
                            "unknown relation type '{kind}'; valid types are: {}",
                            RelationKind::VALID.join(", ")
                        ),
                    ));
                }

                if matches!(relation.kind, RelationKind::BelongsToMany)
                    && relation.entity == entity.name
                {
                    // The synthesized join table would carry the same key
                    // column on both sides.
                    report.error(ValidationError::new(
                        ErrorCode::SelfReferentialJoin,
                        path.clone(),
                        format!(
                            "relation '{}' declares a belongsToMany onto '{}' itself",
                            relation_name, entity.name
                        ),
                    ));
                }

                if !declared.contains(relation.entity.as_str()) {
                    report.error(ValidationError::new(
                        ErrorCode::RelationTargetNotFound,
                        path.clone(),
                        format!(
                            "relation '{}' targets undeclared entity '{}'",
                            relation_name, relation.entity
                        ),
                    ));
                }

                for (pivot_name, pivot) in &relation.pivot {
                    if let FieldKind::Unknown(kind) = &pivot.kind {
                        report.error(ValidationError::new(
                            ErrorCode::InvalidFieldType,
                            format!("{path}.pivot.{pivot_name}"),
                            format!(
                                "unknown field type '{kind}'; valid types are: {}",
                                FieldKind::VALID.join(", ")
                            ),
                        ));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_relation_resolves() {
        let manifest: ManifestDescriptor = r#"
            [mode]
            type = "headless"

            [[entities]]
            name = "Category"
            [entities.fields.title]
            type = "text"
            [entities.relations.parent]
            type = "hasOne"
            entity = "Category"
        "#
        .parse()
        .unwrap();

        let mut report = ValidationReport::new();
        Structure.run(&manifest, &mut report);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
    }

    #[test]
    fn test_self_referential_join_rejected() {
        let manifest: ManifestDescriptor = r#"
            [mode]
            type = "headless"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            [entities.relations.related]
            type = "belongsToMany"
            entity = "Post"
        "#
        .parse()
        .unwrap();

        let mut report = ValidationReport::new();
        Structure.run(&manifest, &mut report);
        assert!(report.has_code(ErrorCode::SelfReferentialJoin));
        assert!(report.errors[0].path.ends_with("relations.related"));
    }

    #[test]
    fn test_pivot_field_kinds_checked() {
        let manifest: ManifestDescriptor = r#"
            [mode]
            type = "headless"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            [entities.relations.tags]
            type = "belongsToMany"
            entity = "Tag"
            [entities.relations.tags.pivot.weight]
            type = "decimal"

            [[entities]]
            name = "Tag"
            [entities.fields.label]
            type = "text"
        "#
        .parse()
        .unwrap();

        let mut report = ValidationReport::new();
        Structure.run(&manifest, &mut report);
        assert!(report.has_code(ErrorCode::InvalidFieldType));
        assert!(
            report.errors[0].path.ends_with("pivot.weight"),
            "{}",
            report.errors[0].path
        );
    }
}
