//! Structured validation output.
//!
//! The report is the complete error surface for manifest problems. It is
//! machine-parseable (serializes to JSON) so automated callers can fix every
//! violation in a single round trip; the `suggestion` field exists for that
//! closed-loop correction.

use serde::Serialize;

/// Stable validation error codes.
///
/// This enumeration is closed and backward compatible by addition only:
/// existing codes never change meaning or disappear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidEntityName,
    DuplicateEntity,
    MissingEntityFields,
    InvalidFieldType,
    InvalidFieldName,
    RelationTargetNotFound,
    InvalidRelationType,
    SelfReferentialJoin,
    DatabaseRequired,
    InvalidDatabaseType,
    SqliteRequiresFile,
    PostgresRequiresUrl,
    AuthRequiredForProtected,
    InvalidProvider,
    InvalidMode,
    InvalidProtectedValue,
    ExternalSourceInvalid,
}

impl ErrorCode {
    /// The wire spelling of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidEntityName => "INVALID_ENTITY_NAME",
            Self::DuplicateEntity => "DUPLICATE_ENTITY",
            Self::MissingEntityFields => "MISSING_ENTITY_FIELDS",
            Self::InvalidFieldType => "INVALID_FIELD_TYPE",
            Self::InvalidFieldName => "INVALID_FIELD_NAME",
            Self::RelationTargetNotFound => "RELATION_TARGET_NOT_FOUND",
            Self::InvalidRelationType => "INVALID_RELATION_TYPE",
            Self::SelfReferentialJoin => "SELF_REFERENTIAL_JOIN",
            Self::DatabaseRequired => "DATABASE_REQUIRED",
            Self::InvalidDatabaseType => "INVALID_DATABASE_TYPE",
            Self::SqliteRequiresFile => "SQLITE_REQUIRES_FILE",
            Self::PostgresRequiresUrl => "POSTGRES_REQUIRES_URL",
            Self::AuthRequiredForProtected => "AUTH_REQUIRED_FOR_PROTECTED",
            Self::InvalidProvider => "INVALID_PROVIDER",
            Self::InvalidMode => "INVALID_MODE",
            Self::InvalidProtectedValue => "INVALID_PROTECTED_VALUE",
            Self::ExternalSourceInvalid => "EXTERNAL_SOURCE_INVALID",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation error.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Stable error code.
    pub code: ErrorCode,
    /// Dotted path into the manifest (e.g., "entities.Post.fields.title").
    pub path: String,
    /// Human-readable message.
    pub message: String,
    /// A corrected value the caller can apply directly, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a suggested correction.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// A non-fatal validation warning.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// Dotted path into the manifest.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a new warning.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// The complete result of validating a manifest.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// True when no errors were found.
    pub valid: bool,
    /// All errors, in check order.
    pub errors: Vec<ValidationError>,
    /// All warnings, in check order.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Create an empty (valid) report.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record an error. Marks the report invalid.
    pub fn error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Record a warning.
    pub fn warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// All error codes, in order, for quick branching by callers.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|e| e.code).collect()
    }

    /// Whether a specific code was reported.
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_tracks_validity() {
        let mut report = ValidationReport::new();
        assert!(report.valid);

        report.warning(ValidationWarning::new("mode", "just a warning"));
        assert!(report.valid);

        report.error(ValidationError::new(
            ErrorCode::DuplicateEntity,
            "entities.Post",
            "duplicate entity 'Post'",
        ));
        assert!(!report.valid);
        assert!(report.has_code(ErrorCode::DuplicateEntity));
    }

    #[test]
    fn test_code_wire_spelling() {
        assert_eq!(
            ErrorCode::AuthRequiredForProtected.to_string(),
            "AUTH_REQUIRED_FOR_PROTECTED"
        );
    }

    #[test]
    fn test_report_serializes_for_machines() {
        let mut report = ValidationReport::new();
        report.error(
            ValidationError::new(
                ErrorCode::InvalidEntityName,
                "entities.user",
                "entity name 'user' is not PascalCase",
            )
            .with_suggestion("User"),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["code"], "INVALID_ENTITY_NAME");
        assert_eq!(json["errors"][0]["suggestion"], "User");
    }
}
