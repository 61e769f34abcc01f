//! The generator lineup for the node template.

mod api;
mod client;
mod schema;
mod services;
mod validation;

pub use api::ExpressApi;
pub use client::FetchClient;
pub use schema::SqlSchema;
pub use services::Services;
pub use validation::ZodSchemas;

use kiln_core::to_pascal_case;
use kiln_ir::{ManifestIR, NamingContext, RelationKind, ResolvedEntity};

/// File stem for an entity's generated module ("Post" -> "post",
/// "OrderItem" -> "order_item").
pub(crate) fn module_stem(naming: &NamingContext, entity: &str) -> String {
    naming.column_name(entity)
}

/// A collection-valued relation accessor shared by the services, API, and
/// client generators, so all three layers expose it under the same name.
pub(crate) struct ManyAccessor {
    /// Function name ("listPostTags").
    pub fn_name: String,
    /// Route segment, the relation's derived accessor ("tags").
    pub accessor: String,
    /// Target entity name in PascalCase.
    pub target_pascal: String,
    /// Target schema module stem.
    pub target_stem: String,
    /// Lookup query used by the service layer.
    pub sql: String,
}

/// Collection accessors for an entity's hasMany and belongsToMany
/// relations. Relations onto external entities have no local rows to query
/// and are skipped.
pub(crate) fn many_accessors(entity: &ResolvedEntity, ir: &ManifestIR) -> Vec<ManyAccessor> {
    let mut accessors = Vec::new();

    for relation in entity.relations.iter().filter(|r| r.kind.is_many()) {
        let Some(target) = ir.entity(&relation.target) else {
            continue;
        };
        if target.external.is_some() {
            continue;
        }

        let alive = if target.soft_delete {
            " AND t.deleted_at IS NULL"
        } else {
            ""
        };
        let sql = match relation.kind {
            RelationKind::HasMany => format!(
                "SELECT t.* FROM {} t WHERE t.{} = ?{alive}",
                target.table,
                ir.naming.column_name(&relation.key)
            ),
            RelationKind::BelongsToMany => {
                let join_name = ir.naming.join_entity_name(&entity.name, &target.name);
                let Some(join) = ir.join(&join_name) else {
                    continue;
                };
                let (own, other) = if join.left.entity == entity.name {
                    (&join.left, &join.right)
                } else {
                    (&join.right, &join.left)
                };
                format!(
                    "SELECT t.* FROM {} t JOIN {} j ON j.{} = t.{} WHERE j.{} = ?{alive}",
                    target.table,
                    join.table,
                    other.column,
                    target.primary_key().column,
                    own.column
                )
            }
            RelationKind::HasOne => continue,
        };

        accessors.push(ManyAccessor {
            fn_name: format!(
                "list{}{}",
                to_pascal_case(&entity.name),
                to_pascal_case(&ir.naming.column_name(&relation.accessor))
            ),
            accessor: relation.accessor.clone(),
            target_pascal: to_pascal_case(&target.name),
            target_stem: module_stem(&ir.naming, &target.name),
            sql,
        });
    }

    accessors
}
