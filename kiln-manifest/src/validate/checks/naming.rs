//! Name-shape checks: entity PascalCase, field and relation camelCase.

use kiln_core::{is_camel_case, is_pascal_case, to_camel_case, to_pascal_case};

use crate::{
    Check, ErrorCode, ManifestDescriptor, ValidationError, ValidationReport,
};

/// Checks that every declared name follows the required casing, attaching a
/// corrected spelling as the suggestion.
pub struct NamingShape;

impl Check for NamingShape {
    fn name(&self) -> &'static str {
        "naming-shape"
    }

    fn run(&self, manifest: &ManifestDescriptor, report: &mut ValidationReport) {
        for entity in &manifest.entities {
            if !is_pascal_case(&entity.name) {
                report.error(
                    ValidationError::new(
                        ErrorCode::InvalidEntityName,
                        format!("entities.{}", entity.name),
                        format!("entity name '{}' is not PascalCase", entity.name),
                    )
                    .with_suggestion(to_pascal_case(&entity.name)),
                );
            }

            for field_name in entity.fields.keys() {
                if !is_camel_case(field_name) {
                    report.error(
                        ValidationError::new(
                            ErrorCode::InvalidFieldName,
                            format!("entities.{}.fields.{}", entity.name, field_name),
                            format!("field name '{field_name}' is not camelCase"),
                        )
                        .with_suggestion(to_camel_case(field_name)),
                    );
                }
            }

            for relation_name in entity.relations.keys() {
                if !is_camel_case(relation_name) {
                    report.error(
                        ValidationError::new(
                            ErrorCode::InvalidFieldName,
                            format!("entities.{}.relations.{}", entity.name, relation_name),
                            format!("relation name '{relation_name}' is not camelCase"),
                        )
                        .with_suggestion(to_camel_case(relation_name)),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_name_shape_checked() {
        let manifest: ManifestDescriptor = r#"
            [mode]
            type = "headless"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            [entities.relations.Author]
            type = "hasOne"
            entity = "Post"
        "#
        .parse()
        .unwrap();

        let mut report = ValidationReport::new();
        NamingShape.run(&manifest, &mut report);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, ErrorCode::InvalidFieldName);
        assert_eq!(report.errors[0].suggestion.as_deref(), Some("author"));
    }
}
