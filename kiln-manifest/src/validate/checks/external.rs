//! External-source checks.

use crate::{Check, ErrorCode, ManifestDescriptor, ValidationError, ValidationReport};

/// Checks that every external-source descriptor carries a base URL.
pub struct ExternalSources;

impl Check for ExternalSources {
    fn name(&self) -> &'static str {
        "external-sources"
    }

    fn run(&self, manifest: &ManifestDescriptor, report: &mut ValidationReport) {
        for entity in &manifest.entities {
            if let Some(source) = &entity.source
                && source.base_url.as_deref().is_none_or(str::is_empty)
            {
                report.error(ValidationError::new(
                    ErrorCode::ExternalSourceInvalid,
                    format!("entities.{}.source", entity.name),
                    format!(
                        "external source on entity '{}' requires a baseUrl",
                        entity.name
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_source_with_base_url_passes() {
        let manifest: ManifestDescriptor = r#"
            [[entities]]
            name = "Weather"
            [entities.fields.summary]
            type = "text"
            [entities.source]
            baseUrl = "https://api.example.com"
        "#
        .parse()
        .unwrap();

        let mut report = ValidationReport::new();
        ExternalSources.run(&manifest, &mut report);
        assert!(report.errors.is_empty());
    }
}
