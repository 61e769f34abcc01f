//! Artifact categories and mode filtering.

use kiln_ir::Mode;

/// Artifact categories with a known mode mapping.
///
/// Every generator name maps to at most one category; generators without a
/// mapping are always included, in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Storage schema (migrations, DDL).
    Schema,
    /// Runtime validation schema.
    Validation,
    /// API layer.
    Api,
    /// Data-access service layer.
    Services,
    /// Client data-access layer.
    Client,
}

impl Category {
    /// Parse a category name. Unknown names have no mapping.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "schema" => Some(Self::Schema),
            "validation" => Some(Self::Validation),
            "api" => Some(Self::Api),
            "services" => Some(Self::Services),
            "client" => Some(Self::Client),
            _ => None,
        }
    }

    /// The canonical category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Validation => "validation",
            Self::Api => "api",
            Self::Services => "services",
            Self::Client => "client",
        }
    }
}

/// Decide whether a generator in `category` runs under `mode`.
///
/// Fail-open by design: a generator with no category mapping is included
/// under every mode, and include-list entries that don't parse as a known
/// category simply select nothing. New categories therefore stay visible
/// until a mode explicitly learns about them.
pub fn category_included(mode: &Mode, category: Option<Category>) -> bool {
    let Some(category) = category else {
        return true;
    };

    match mode {
        Mode::Full => true,
        Mode::Headless { include } => {
            // Storage schema is always excluded under headless.
            if category == Category::Schema {
                return false;
            }
            match include {
                Some(list) => list.iter().any(|name| Category::parse(name) == Some(category)),
                None => true,
            }
        }
        // Fixed set regardless of include-list.
        Mode::ApiOnly => matches!(
            category,
            Category::Schema | Category::Validation | Category::Api | Category::Services
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_includes_everything() {
        assert!(category_included(&Mode::Full, Some(Category::Schema)));
        assert!(category_included(&Mode::Full, Some(Category::Client)));
        assert!(category_included(&Mode::Full, None));
    }

    #[test]
    fn test_headless_never_runs_schema() {
        let unrestricted = Mode::Headless { include: None };
        assert!(!category_included(&unrestricted, Some(Category::Schema)));

        // Even an include-list naming "schema" cannot bring it back.
        let explicit = Mode::Headless {
            include: Some(vec!["schema".into(), "api".into()]),
        };
        assert!(!category_included(&explicit, Some(Category::Schema)));
        assert!(category_included(&explicit, Some(Category::Api)));
    }

    #[test]
    fn test_headless_include_list_restricts() {
        let mode = Mode::Headless {
            include: Some(vec!["validation".into()]),
        };
        assert!(category_included(&mode, Some(Category::Validation)));
        assert!(!category_included(&mode, Some(Category::Api)));
        assert!(!category_included(&mode, Some(Category::Client)));
    }

    #[test]
    fn test_unmapped_generator_fails_open() {
        let mode = Mode::Headless {
            include: Some(vec!["validation".into()]),
        };
        assert!(category_included(&mode, None));
        assert!(category_included(&Mode::ApiOnly, None));
    }

    #[test]
    fn test_api_only_fixed_set() {
        for category in [
            Category::Schema,
            Category::Validation,
            Category::Api,
            Category::Services,
        ] {
            assert!(category_included(&Mode::ApiOnly, Some(category)));
        }
        assert!(!category_included(&Mode::ApiOnly, Some(Category::Client)));
    }

    #[test]
    fn test_category_parse_round_trip() {
        for name in ["schema", "validation", "api", "services", "client"] {
            let category = Category::parse(name).unwrap();
            assert_eq!(category.as_str(), name);
        }
        assert!(Category::parse("widgets").is_none());
    }
}
