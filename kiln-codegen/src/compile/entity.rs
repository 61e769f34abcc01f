//! Entity lowering: descriptor fields into resolved fields.

use kiln_ir::{
    Access, Constraints, DefaultValue, ExternalSourceInfo, FieldOrigin, FieldType, NamingContext,
    ResolvedEntity, ResolvedField, ResolvedRelation,
};
use kiln_manifest::{EntityDescriptor, FieldDescriptor, FieldKind, ProtectedPolicy};

/// An injected foreign key together with the relation that injected it, so
/// reciprocal declarations can be detected and reported instead of injecting
/// twice.
pub(crate) struct ForeignKeyField {
    pub field: ResolvedField,
    pub injected_by: String,
}

/// Accumulates an entity's resolved parts while relations are being
/// resolved across the whole manifest, then emits the final field order:
/// primary key, declared fields, injected foreign keys, behavior fields.
pub(crate) struct EntityBuilder {
    name: String,
    table: String,
    access: Access,
    timestamps: bool,
    soft_delete: bool,
    audit: bool,
    external: Option<ExternalSourceInfo>,
    primary: ResolvedField,
    declared: Vec<ResolvedField>,
    foreign: Vec<ForeignKeyField>,
    relations: Vec<ResolvedRelation>,
}

impl EntityBuilder {
    pub fn new(entity: &EntityDescriptor, naming: &NamingContext, auth_enabled: bool) -> Self {
        let mut declared = Vec::new();
        let mut primary = None;

        for (name, field) in &entity.fields {
            let mut resolved = lower_field(name, field, naming);
            if field.primary && primary.is_none() {
                resolved.origin = FieldOrigin::PrimaryKey;
                resolved.required = true;
                primary = Some(resolved);
            } else {
                declared.push(resolved);
            }
        }

        // Implicit opaque primary key unless one was explicitly declared.
        let primary = primary.unwrap_or_else(|| ResolvedField {
            name: "id".to_string(),
            column: "id".to_string(),
            ty: FieldType::Id,
            origin: FieldOrigin::PrimaryKey,
            required: true,
            unique: false,
            default: None,
            label: None,
            constraints: Constraints::default(),
        });

        Self {
            name: entity.name.clone(),
            table: naming.table_name(&entity.name),
            access: resolve_access(entity.protected.as_ref(), auth_enabled),
            timestamps: entity.timestamps,
            soft_delete: entity.soft_delete,
            audit: entity.audit,
            external: entity.source.as_ref().map(|source| ExternalSourceInfo {
                // Validated manifests always carry a base URL here.
                base_url: source.base_url.clone().unwrap_or_default(),
                path: source.path.clone(),
            }),
            primary,
            declared,
            foreign: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Whether any field (primary, declared, or injected) has this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.primary.name == name
            || self.declared.iter().any(|f| f.name == name)
            || self.foreign.iter().any(|f| f.field.name == name)
    }

    /// A declared field by name, for repurposing as an explicit key.
    pub fn declared_mut(&mut self, name: &str) -> Option<&mut ResolvedField> {
        self.declared.iter_mut().find(|f| f.name == name)
    }

    /// An injected foreign key by name.
    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKeyField> {
        self.foreign.iter().find(|f| f.field.name == name)
    }

    pub fn add_foreign_key(&mut self, field: ResolvedField, injected_by: String) {
        self.foreign.push(ForeignKeyField { field, injected_by });
    }

    pub fn add_relation(&mut self, relation: ResolvedRelation) {
        self.relations.push(relation);
    }

    pub fn finish(self) -> ResolvedEntity {
        let mut fields = Vec::with_capacity(self.declared.len() + self.foreign.len() + 4);
        fields.push(self.primary);
        fields.extend(self.declared);
        fields.extend(self.foreign.into_iter().map(|f| f.field));

        if self.timestamps {
            fields.push(behavior_field("createdAt", FieldOrigin::CreatedAt, true));
            fields.push(behavior_field("updatedAt", FieldOrigin::UpdatedAt, true));
        }
        if self.soft_delete {
            fields.push(behavior_field("deletedAt", FieldOrigin::DeletedAt, false));
        }

        ResolvedEntity {
            name: self.name,
            table: self.table,
            fields,
            relations: self.relations,
            access: self.access,
            soft_delete: self.soft_delete,
            audit: self.audit,
            external: self.external,
        }
    }
}

fn behavior_field(name: &str, origin: FieldOrigin, required: bool) -> ResolvedField {
    ResolvedField {
        name: name.to_string(),
        column: kiln_core::to_snake_case(name),
        ty: FieldType::Date,
        origin,
        required,
        unique: false,
        default: None,
        label: None,
        constraints: Constraints::default(),
    }
}

/// Lower one declared field.
pub(crate) fn lower_field(
    name: &str,
    field: &FieldDescriptor,
    naming: &NamingContext,
) -> ResolvedField {
    ResolvedField {
        name: name.to_string(),
        column: naming.column_name(name),
        ty: lower_field_kind(&field.kind),
        origin: FieldOrigin::Declared,
        required: field.required,
        unique: field.unique,
        default: field.default.as_ref().and_then(lower_default_value),
        label: field.label.clone(),
        constraints: Constraints {
            min: field.min,
            max: field.max,
            email: field.email,
            url: field.url,
            one_of: field.one_of.clone(),
            integer: field.integer,
            positive: field.positive,
        },
    }
}

fn lower_field_kind(kind: &FieldKind) -> FieldType {
    match kind {
        FieldKind::Text => FieldType::Text,
        FieldKind::Number => FieldType::Number,
        FieldKind::Boolean => FieldType::Boolean,
        FieldKind::Date => FieldType::Date,
        // Validated manifests never reach here; text is the neutral fallback.
        FieldKind::Unknown(_) => FieldType::Text,
    }
}

fn lower_default_value(value: &toml::Value) -> Option<DefaultValue> {
    match value {
        toml::Value::String(s) => Some(DefaultValue::Text(s.clone())),
        toml::Value::Integer(i) => Some(DefaultValue::Number(*i as f64)),
        toml::Value::Float(f) => Some(DefaultValue::Number(*f)),
        toml::Value::Boolean(b) => Some(DefaultValue::Boolean(*b)),
        // Arrays and tables are not supported as defaults.
        _ => None,
    }
}

fn resolve_access(policy: Option<&ProtectedPolicy>, auth_enabled: bool) -> Access {
    match policy {
        Some(ProtectedPolicy::All) => Access::All,
        Some(ProtectedPolicy::Read) => Access::Read,
        Some(ProtectedPolicy::Write) => Access::Write,
        Some(ProtectedPolicy::None) => Access::Public,
        // Validated manifests never carry Unknown; treat as unset.
        Some(ProtectedPolicy::Unknown(_)) | None => {
            // Presence-as-intent: with auth configured, an entity that says
            // nothing gets the safest behavior. Without auth there is
            // nothing to protect with.
            if auth_enabled { Access::All } else { Access::Public }
        }
    }
}
