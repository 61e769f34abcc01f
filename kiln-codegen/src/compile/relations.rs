//! Relation resolution: foreign-key injection and join-entity synthesis.

use indexmap::IndexMap;
use kiln_ir::{
    Constraints, FieldOrigin, FieldType, JoinEntity, JoinKey, NamingContext, RelationKind,
    ResolvedField, ResolvedRelation,
};
use kiln_manifest::{EntityDescriptor, ManifestDescriptor, RelationKind as DeclaredKind};

use super::CompileWarning;
use super::entity::EntityBuilder;

/// Resolve every declared relation across the manifest.
///
/// Mutates the entity builders in place (foreign-key injection, relation
/// lists) and returns the synthesized join entities. Declaration order
/// decides ties: the first relation to claim a foreign-key slot or a join
/// entity wins, and later reciprocal declarations are reported as warnings
/// instead of injecting twice.
pub(crate) fn resolve(
    manifest: &ManifestDescriptor,
    builders: &mut IndexMap<String, EntityBuilder>,
    naming: &NamingContext,
    warnings: &mut Vec<CompileWarning>,
) -> Vec<JoinEntity> {
    let mut joins: IndexMap<String, JoinEntity> = IndexMap::new();

    for entity in &manifest.entities {
        for (name, relation) in &entity.relations {
            let path = format!("entities.{}.relations.{}", entity.name, name);
            match &relation.kind {
                DeclaredKind::HasOne => {
                    resolve_has_one(entity, name, relation, &path, builders, naming, warnings);
                }
                DeclaredKind::HasMany => {
                    resolve_has_many(entity, name, relation, &path, builders, naming, warnings);
                }
                DeclaredKind::BelongsToMany => {
                    resolve_belongs_to_many(
                        entity, name, relation, builders, naming, &mut joins, warnings, &path,
                    );
                }
                // Gated out by validation; nothing sensible to resolve.
                DeclaredKind::Unknown(_) => {}
            }
        }
    }

    joins.into_values().collect()
}

/// hasOne: the declaring entity carries the foreign key.
fn resolve_has_one(
    entity: &EntityDescriptor,
    name: &str,
    relation: &kiln_manifest::RelationDescriptor,
    path: &str,
    builders: &mut IndexMap<String, EntityBuilder>,
    naming: &NamingContext,
    warnings: &mut Vec<CompileWarning>,
) {
    let key = relation
        .key
        .clone()
        .unwrap_or_else(|| naming.foreign_key_field(name));

    let Some(builder) = builders.get_mut(&entity.name) else {
        return;
    };

    if let Some(field) = builder.declared_mut(&key) {
        // An explicitly declared key field is repurposed, keeping its
        // declared type so text primary keys on the target line up.
        field.origin = FieldOrigin::ForeignKey {
            target: relation.entity.clone(),
        };
        field.required = relation.required;
    } else if let Some(existing) = builder.foreign_key(&key) {
        warnings.push(CompileWarning {
            path: path.to_string(),
            message: format!(
                "foreign key '{}.{}' was already injected by '{}'; keeping the earlier definition",
                entity.name, key, existing.injected_by
            ),
        });
    } else {
        builder.add_foreign_key(
            foreign_key_field(&key, &relation.entity, relation.required, naming),
            path.to_string(),
        );
    }

    builder.add_relation(ResolvedRelation {
        name: name.to_string(),
        accessor: naming.accessor_name(name, false),
        kind: RelationKind::HasOne,
        target: relation.entity.clone(),
        key,
    });
}

/// hasMany: the target entity carries the foreign key back to the declarer.
fn resolve_has_many(
    entity: &EntityDescriptor,
    name: &str,
    relation: &kiln_manifest::RelationDescriptor,
    path: &str,
    builders: &mut IndexMap<String, EntityBuilder>,
    naming: &NamingContext,
    warnings: &mut Vec<CompileWarning>,
) {
    let key = relation
        .key
        .clone()
        .unwrap_or_else(|| naming.foreign_key_field(&entity.name));

    if let Some(target) = builders.get_mut(&relation.entity) {
        if let Some(field) = target.declared_mut(&key) {
            field.origin = FieldOrigin::ForeignKey {
                target: entity.name.clone(),
            };
            field.required = relation.required;
        } else if let Some(existing) = target.foreign_key(&key) {
            // A reciprocal hasOne already put the column there; injecting
            // again would duplicate it.
            warnings.push(CompileWarning {
                path: path.to_string(),
                message: format!(
                    "foreign key '{}.{}' was already injected by '{}'; keeping the earlier definition",
                    relation.entity, key, existing.injected_by
                ),
            });
        } else if !target.has_field(&key) {
            target.add_foreign_key(
                foreign_key_field(&key, &entity.name, relation.required, naming),
                path.to_string(),
            );
        }
    }

    if let Some(builder) = builders.get_mut(&entity.name) {
        builder.add_relation(ResolvedRelation {
            name: name.to_string(),
            accessor: naming.accessor_name(name, true),
            kind: RelationKind::HasMany,
            target: relation.entity.clone(),
            key,
        });
    }
}

/// belongsToMany: both sides share one canonical join entity.
#[allow(clippy::too_many_arguments)]
fn resolve_belongs_to_many(
    entity: &EntityDescriptor,
    name: &str,
    relation: &kiln_manifest::RelationDescriptor,
    builders: &mut IndexMap<String, EntityBuilder>,
    naming: &NamingContext,
    joins: &mut IndexMap<String, JoinEntity>,
    warnings: &mut Vec<CompileWarning>,
    path: &str,
) {
    let join_name = naming.join_entity_name(&entity.name, &relation.entity);

    if joins.contains_key(&join_name) {
        if !relation.pivot.is_empty() {
            warnings.push(CompileWarning {
                path: path.to_string(),
                message: format!(
                    "join entity '{}' was already synthesized; pivot fields on '{}' are ignored",
                    join_name, path
                ),
            });
        }
    } else {
        let (left_name, right_name) = if entity.name <= relation.entity {
            (entity.name.as_str(), relation.entity.as_str())
        } else {
            (relation.entity.as_str(), entity.name.as_str())
        };

        joins.insert(
            join_name.clone(),
            JoinEntity {
                name: join_name.clone(),
                table: naming.table_name(&join_name),
                left: join_key(left_name, naming),
                right: join_key(right_name, naming),
                fields: relation
                    .pivot
                    .iter()
                    .map(|(field_name, field)| super::entity::lower_field(field_name, field, naming))
                    .collect(),
            },
        );
    }

    if let Some(builder) = builders.get_mut(&entity.name) {
        builder.add_relation(ResolvedRelation {
            name: name.to_string(),
            accessor: naming.accessor_name(name, true),
            kind: RelationKind::BelongsToMany,
            target: relation.entity.clone(),
            // The join-side key referencing the declaring entity.
            key: naming.foreign_key_field(&entity.name),
        });
    }
}

fn join_key(entity: &str, naming: &NamingContext) -> JoinKey {
    let field = naming.foreign_key_field(entity);
    JoinKey {
        entity: entity.to_string(),
        column: naming.column_name(&field),
        field,
    }
}

fn foreign_key_field(
    name: &str,
    target: &str,
    required: bool,
    naming: &NamingContext,
) -> ResolvedField {
    ResolvedField {
        name: name.to_string(),
        column: naming.column_name(name),
        ty: FieldType::Id,
        origin: FieldOrigin::ForeignKey {
            target: target.to_string(),
        },
        required,
        unique: false,
        default: None,
        label: None,
        constraints: Constraints::default(),
    }
}
