//! Entity, field, and relation descriptors.

use indexmap::IndexMap;
use serde::Deserialize;

/// A declared entity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    /// Entity name (expected PascalCase).
    pub name: String,

    /// Declared fields, in declaration order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldDescriptor>,

    /// Declared relations, in declaration order.
    #[serde(default)]
    pub relations: IndexMap<String, RelationDescriptor>,

    /// Inject created/updated marker fields.
    #[serde(default)]
    pub timestamps: bool,

    /// Inject a nullable deletion marker and turn removes into updates.
    #[serde(default)]
    pub soft_delete: bool,

    /// Flag the entity for the external audit collaborator.
    #[serde(default)]
    pub audit: bool,

    /// Access-protection policy. Absence means the safest applicable
    /// behavior; an explicit value requires auth to be enabled.
    #[serde(default)]
    pub protected: Option<ProtectedPolicy>,

    /// External-source backing instead of local storage.
    #[serde(default)]
    pub source: Option<ExternalSource>,
}

/// A declared field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Primitive kind.
    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Required and non-null unless explicitly marked optional
    /// (presence-as-intent).
    #[serde(default = "default_true")]
    pub required: bool,

    /// Use this declared field as the primary key instead of injecting one.
    #[serde(default)]
    pub primary: bool,

    /// Unique constraint.
    #[serde(default)]
    pub unique: bool,

    /// Minimum value / length.
    #[serde(default)]
    pub min: Option<f64>,

    /// Maximum value / length.
    #[serde(default)]
    pub max: Option<f64>,

    /// Must be a valid email address (text fields).
    #[serde(default)]
    pub email: bool,

    /// Must be a valid URL (text fields).
    #[serde(default)]
    pub url: bool,

    /// Closed set of allowed values.
    #[serde(default)]
    pub one_of: Option<Vec<String>>,

    /// Whole numbers only (number fields).
    #[serde(default)]
    pub integer: bool,

    /// Strictly positive (number fields).
    #[serde(default)]
    pub positive: bool,

    /// Default value.
    #[serde(default)]
    pub default: Option<toml::Value>,

    /// Human-facing label.
    #[serde(default)]
    pub label: Option<String>,
}

/// A declared relation.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationDescriptor {
    /// Relation kind.
    #[serde(rename = "type")]
    pub kind: RelationKind,

    /// Target entity name.
    pub entity: String,

    /// Explicit key field name; derived from the relation name when absent.
    #[serde(default)]
    pub key: Option<String>,

    /// Whether the association is required. An optional hasOne yields a
    /// nullable foreign key.
    #[serde(default = "default_true")]
    pub required: bool,

    /// Explicit pivot fields for belongsToMany join entities.
    #[serde(default)]
    pub pivot: IndexMap<String, FieldDescriptor>,
}

/// External HTTP source configuration for an entity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSource {
    /// Base URL of the upstream service. Required.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Path prefix under the base URL.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Primitive field kinds. Unknown spellings are preserved for the validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Date,
    Unknown(String),
}

impl From<String> for FieldKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" => Self::Text,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            _ => Self::Unknown(s),
        }
    }
}

impl FieldKind {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static [&'static str] = &["text", "number", "boolean", "date"];

    /// True when the kind is in the closed enumeration.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// Relation kinds. Unknown spellings are preserved for the validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RelationKind {
    HasOne,
    HasMany,
    BelongsToMany,
    Unknown(String),
}

impl From<String> for RelationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "hasOne" => Self::HasOne,
            "hasMany" => Self::HasMany,
            "belongsToMany" => Self::BelongsToMany,
            _ => Self::Unknown(s),
        }
    }
}

impl RelationKind {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static [&'static str] = &["hasOne", "hasMany", "belongsToMany"];

    /// True when the kind is in the closed enumeration.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// Access-protection policies. Unknown spellings are preserved for the
/// validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ProtectedPolicy {
    /// Every operation requires auth.
    All,
    /// Reads require auth.
    Read,
    /// Mutations require auth.
    Write,
    /// Explicitly relaxed: nothing requires auth.
    None,
    Unknown(String),
}

impl From<String> for ProtectedPolicy {
    fn from(s: String) -> Self {
        match s.as_str() {
            "all" => Self::All,
            "read" => Self::Read,
            "write" => Self::Write,
            "none" => Self::None,
            _ => Self::Unknown(s),
        }
    }
}

impl ProtectedPolicy {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static [&'static str] = &["all", "read", "write", "none"];

    /// True when the policy is in the closed enumeration.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// True when the policy actually protects something.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::All | Self::Read | Self::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_spellings() {
        assert_eq!(FieldKind::from("text".to_string()), FieldKind::Text);
        assert_eq!(FieldKind::from("date".to_string()), FieldKind::Date);
        assert!(!FieldKind::from("Text".to_string()).is_known());
    }

    #[test]
    fn test_relation_kind_spellings() {
        assert_eq!(
            RelationKind::from("belongsToMany".to_string()),
            RelationKind::BelongsToMany
        );
        assert!(!RelationKind::from("has_one".to_string()).is_known());
    }

    #[test]
    fn test_protected_policy() {
        assert!(ProtectedPolicy::All.requires_auth());
        assert!(ProtectedPolicy::Read.requires_auth());
        assert!(!ProtectedPolicy::None.requires_auth());
        assert!(!ProtectedPolicy::Unknown("everyone".into()).requires_auth());
    }

    #[test]
    fn test_presence_as_intent_defaults() {
        let field: FieldDescriptor = toml::from_str(r#"type = "text""#).unwrap();
        assert!(field.required);
        assert!(!field.unique);
        assert!(!field.primary);

        let relation: RelationDescriptor = toml::from_str(
            r#"
            type = "hasOne"
            entity = "User"
            "#,
        )
        .unwrap();
        assert!(relation.required);
    }
}
