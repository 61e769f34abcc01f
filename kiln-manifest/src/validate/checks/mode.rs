//! Mode shape checks.

use super::KNOWN_CATEGORIES;
use crate::{
    Check, ErrorCode, ManifestDescriptor, ValidationError, ValidationReport, ValidationWarning,
    manifest::ModeKind,
};

/// Checks the mode kind and warns about include-list entries with no known
/// category mapping. Unknown categories stay included at generation time
/// (fail-open), so the warning is the only signal the caller gets.
pub struct ModeShape;

impl Check for ModeShape {
    fn name(&self) -> &'static str {
        "mode-shape"
    }

    fn run(&self, manifest: &ManifestDescriptor, report: &mut ValidationReport) {
        if let ModeKind::Unknown(kind) = &manifest.mode.kind {
            report.error(ValidationError::new(
                ErrorCode::InvalidMode,
                "mode.type",
                format!(
                    "unknown mode '{kind}'; valid modes are: {}",
                    ModeKind::VALID.join(", ")
                ),
            ));
        }

        if let Some(include) = &manifest.mode.include {
            for category in include {
                if !KNOWN_CATEGORIES.contains(&category.as_str()) {
                    report.warning(ValidationWarning::new(
                        "mode.include",
                        format!(
                            "'{category}' is not a known category; generators in unknown \
                             categories are always included"
                        ),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_accepted_silently() {
        let manifest: ManifestDescriptor = r#"
            [mode]
            type = "headless"
            include = ["validation", "api", "services", "client"]
        "#
        .parse()
        .unwrap();

        let mut report = ValidationReport::new();
        ModeShape.run(&manifest, &mut report);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }
}
