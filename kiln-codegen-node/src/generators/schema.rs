//! SQL schema generator.

use eyre::Result;
use kiln_codegen::{Category, GenContext, Generator};
use kiln_core::{CodeBuilder, GeneratedFile};
use kiln_ir::{DatabaseKind, FieldOrigin, JoinEntity, ManifestIR, ResolvedEntity, ResolvedField};

use crate::type_map::sql_type;

/// Emits one `CREATE TABLE` script covering every locally stored entity and
/// every synthesized join table. Externally sourced entities have no local
/// storage and are skipped.
pub struct SqlSchema;

impl Generator for SqlSchema {
    fn name(&self) -> &'static str {
        "sql-schema"
    }

    fn category(&self) -> Option<Category> {
        Some(Category::Schema)
    }

    fn generate(&self, ir: &ManifestIR, _ctx: &GenContext) -> Result<Vec<GeneratedFile>> {
        let engine = ir
            .database
            .as_ref()
            .map(|db| db.kind)
            .unwrap_or(DatabaseKind::Sqlite);

        let mut builder = CodeBuilder::sql()
            .line("-- Generated storage schema. Do not edit by hand.")
            .blank();

        for entity in ir.entities.iter().filter(|e| e.external.is_none()) {
            builder = entity_table(builder, entity, ir, engine).blank();
        }
        for join in &ir.joins {
            builder = join_table(builder, join, ir, engine).blank();
        }

        Ok(vec![GeneratedFile::new(
            "migrations/schema.sql",
            builder.build(),
        )])
    }
}

fn entity_table(
    builder: CodeBuilder,
    entity: &ResolvedEntity,
    ir: &ManifestIR,
    engine: DatabaseKind,
) -> CodeBuilder {
    let mut defs: Vec<String> = entity
        .fields
        .iter()
        .map(|f| column_def(f, engine))
        .collect();

    for field in &entity.fields {
        if let Some(reference) = foreign_key_clause(field, ir) {
            defs.push(reference);
        }
    }

    table(builder, &entity.table, defs)
}

fn join_table(
    builder: CodeBuilder,
    join: &JoinEntity,
    ir: &ManifestIR,
    engine: DatabaseKind,
) -> CodeBuilder {
    let mut defs = Vec::new();
    for key in [&join.left, &join.right] {
        // Key columns take the referenced primary key's type so the
        // FOREIGN KEY clauses stay valid under every engine.
        let ty = ir
            .entity(&key.entity)
            .map(|target| sql_type(target.primary_key(), engine))
            .unwrap_or("TEXT");
        defs.push(format!("{} {ty} NOT NULL", key.column));
    }
    for field in &join.fields {
        defs.push(column_def(field, engine));
    }
    defs.push(format!(
        "PRIMARY KEY ({}, {})",
        join.left.column, join.right.column
    ));
    for key in [&join.left, &join.right] {
        if let Some(target) = ir.entity(&key.entity) {
            defs.push(format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                key.column,
                target.table,
                target.primary_key().column
            ));
        }
    }

    table(builder, &join.table, defs)
}

fn table(builder: CodeBuilder, name: &str, defs: Vec<String>) -> CodeBuilder {
    let last = defs.len().saturating_sub(1);
    builder.block(&format!("CREATE TABLE {name} ("), ");", |b| {
        b.each(defs.iter().enumerate(), |b, (i, def)| {
            if i == last {
                b.line(def)
            } else {
                b.line(&format!("{def},"))
            }
        })
    })
}

fn column_def(field: &ResolvedField, engine: DatabaseKind) -> String {
    let mut def = format!("{} {}", field.column, sql_type(field, engine));
    if matches!(field.origin, FieldOrigin::PrimaryKey) {
        def.push_str(" PRIMARY KEY");
        return def;
    }
    if field.required {
        def.push_str(" NOT NULL");
    }
    if field.unique {
        def.push_str(" UNIQUE");
    }
    if let Some(default) = &field.default {
        def.push_str(&format!(" DEFAULT {}", default.to_sql_literal()));
    }
    def
}

fn foreign_key_clause(field: &ResolvedField, ir: &ManifestIR) -> Option<String> {
    let FieldOrigin::ForeignKey { target } = &field.origin else {
        return None;
    };
    let target = ir.entity(target)?;
    Some(format!(
        "FOREIGN KEY ({}) REFERENCES {}({})",
        field.column,
        target.table,
        target.primary_key().column
    ))
}
