//! Resolved entity, field, and relation types.

use serde::Serialize;

/// A fully resolved entity: declared fields plus every injected field
/// (primary key, foreign keys, behavior markers), in a stable order.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEntity {
    /// PascalCase entity name.
    pub name: String,
    /// Derived table name (pluralized snake_case).
    pub table: String,
    /// Ordered fields: primary key, declared fields, injected foreign keys,
    /// behavior fields.
    pub fields: Vec<ResolvedField>,
    /// Resolved relations. Targets are referenced by name, never by pointer,
    /// so the IR stays cycle-free.
    pub relations: Vec<ResolvedRelation>,
    /// Resolved access policy.
    pub access: Access,
    /// Remove semantics: update the deletion marker instead of a physical
    /// delete. Downstream generators must honor this.
    pub soft_delete: bool,
    /// Entity is flagged for the external audit collaborator. No fields are
    /// injected for this.
    pub audit: bool,
    /// Present when the entity is backed by an external HTTP source rather
    /// than local storage.
    pub external: Option<crate::ExternalSourceInfo>,
}

impl ResolvedEntity {
    /// The entity's primary key field.
    pub fn primary_key(&self) -> &ResolvedField {
        self.fields
            .iter()
            .find(|f| matches!(f.origin, FieldOrigin::PrimaryKey))
            .expect("resolved entity always carries a primary key")
    }

    /// Fields a caller supplies on create/update: declared fields and
    /// foreign keys, excluding the primary key and behavior markers.
    pub fn input_fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter(|f| {
            matches!(
                f.origin,
                FieldOrigin::Declared | FieldOrigin::ForeignKey { .. }
            )
        })
    }
}

/// A single resolved field.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedField {
    /// camelCase field name.
    pub name: String,
    /// Derived column name (snake_case).
    pub column: String,
    /// Field type.
    pub ty: FieldType,
    /// Where this field came from.
    pub origin: FieldOrigin,
    /// Non-null unless explicitly optional (presence-as-intent).
    pub required: bool,
    /// Unique constraint.
    pub unique: bool,
    /// Default value, if any.
    pub default: Option<DefaultValue>,
    /// Human-facing label.
    pub label: Option<String>,
    /// Validation constraints carried through to the validation-schema
    /// generators.
    pub constraints: Constraints,
}

/// Field type in the IR. `Id` is the opaque key type used for primary and
/// foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Id,
    Text,
    Number,
    Boolean,
    Date,
}

/// Provenance of a resolved field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldOrigin {
    /// Declared in the manifest.
    Declared,
    /// Injected opaque primary key.
    PrimaryKey,
    /// Injected (or repurposed) foreign key referencing the target entity's
    /// primary key.
    ForeignKey { target: String },
    /// Injected by the `timestamps` behavior.
    CreatedAt,
    /// Injected by the `timestamps` behavior.
    UpdatedAt,
    /// Injected by the `softDelete` behavior; always nullable.
    DeletedAt,
}

/// Validation constraints attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub email: bool,
    pub url: bool,
    pub one_of: Option<Vec<String>>,
    pub integer: bool,
    pub positive: bool,
}

impl Constraints {
    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A field default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DefaultValue {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl DefaultValue {
    /// Render as a SQL literal.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Number(n) => n.to_string(),
            Self::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }

    /// Render as a JavaScript literal.
    pub fn to_js_literal(&self) -> String {
        match self {
            Self::Text(s) => format!("\"{}\"", s.replace('"', "\\\"")),
            Self::Number(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }
}

/// Relation cardinality kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationKind {
    HasOne,
    HasMany,
    BelongsToMany,
}

impl RelationKind {
    /// True for collection-valued relations.
    pub fn is_many(&self) -> bool {
        matches!(self, Self::HasMany | Self::BelongsToMany)
    }
}

/// A resolved relation on an entity.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRelation {
    /// Declared relation name (camelCase).
    pub name: String,
    /// Derived accessor name: camelCase, pluralized iff cardinality is many.
    pub accessor: String,
    /// Relation kind.
    pub kind: RelationKind,
    /// Target entity name. By name, not pointer.
    pub target: String,
    /// Concrete key field name carrying the association: on the declaring
    /// entity for hasOne, on the target for hasMany, on the join entity for
    /// belongsToMany.
    pub key: String,
}

/// One side of a synthesized join entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinKey {
    /// Referenced entity name.
    pub entity: String,
    /// camelCase key field name on the join entity.
    pub field: String,
    /// snake_case column name.
    pub column: String,
}

/// Synthesized pseudo-entity for a many-to-many association.
///
/// Shape is canonical: sides are ordered alphabetically by entity name, so
/// which side declared the relation never changes the result.
#[derive(Debug, Clone, Serialize)]
pub struct JoinEntity {
    /// PascalCase name formed from both entity names in alphabetical order.
    pub name: String,
    /// Derived table name.
    pub table: String,
    /// Key referencing the alphabetically first entity.
    pub left: JoinKey,
    /// Key referencing the alphabetically second entity.
    pub right: JoinKey,
    /// Explicit pivot fields, empty unless supplied on the relation.
    pub fields: Vec<ResolvedField>,
}

/// Resolved access policy for an entity's operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Access {
    /// No authentication required.
    Public,
    /// Reads require authentication.
    Read,
    /// Mutations require authentication.
    Write,
    /// Every operation requires authentication.
    All,
}

impl Access {
    /// True if read operations need authentication.
    pub fn protects_reads(&self) -> bool {
        matches!(self, Self::Read | Self::All)
    }

    /// True if mutating operations need authentication.
    pub fn protects_writes(&self) -> bool {
        matches!(self, Self::Write | Self::All)
    }
}
