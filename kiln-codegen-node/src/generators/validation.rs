//! Zod validation-schema generator.

use eyre::Result;
use kiln_codegen::{Category, GenContext, Generator};
use kiln_core::{CodeBuilder, GeneratedFile, to_pascal_case};
use kiln_ir::{ManifestIR, ResolvedEntity};

use crate::type_map::zod_expr;

use super::module_stem;

/// Emits one Zod module per entity: a full record schema, a create-input
/// schema covering caller-supplied fields, and the inferred types.
pub struct ZodSchemas;

impl Generator for ZodSchemas {
    fn name(&self) -> &'static str {
        "zod-schemas"
    }

    fn category(&self) -> Option<Category> {
        Some(Category::Validation)
    }

    fn generate(&self, ir: &ManifestIR, _ctx: &GenContext) -> Result<Vec<GeneratedFile>> {
        Ok(ir
            .entities
            .iter()
            .map(|entity| {
                GeneratedFile::new(
                    format!("src/schemas/{}.ts", module_stem(&ir.naming, &entity.name)),
                    render(entity),
                )
            })
            .collect())
    }
}

fn render(entity: &ResolvedEntity) -> String {
    let pascal = to_pascal_case(&entity.name);

    let mut builder = CodeBuilder::typescript()
        .line("import { z } from \"zod\";")
        .blank()
        .block(
            &format!("export const {pascal}Schema = z.object({{"),
            "});",
            |b| {
                b.each(&entity.fields, |b, field| {
                    b.line(&format!("{}: {},", field.name, zod_expr(field)))
                })
            },
        )
        .blank()
        .block(
            &format!("export const {pascal}CreateSchema = z.object({{"),
            "});",
            |b| {
                b.each(entity.input_fields(), |b, field| {
                    b.line(&format!("{}: {},", field.name, zod_expr(field)))
                })
            },
        )
        .blank()
        .line(&format!(
            "export const {pascal}UpdateSchema = {pascal}CreateSchema.partial();"
        ))
        .blank()
        .line(&format!(
            "export type {pascal} = z.infer<typeof {pascal}Schema>;"
        ))
        .line(&format!(
            "export type {pascal}Create = z.infer<typeof {pascal}CreateSchema>;"
        ));

    if entity.fields.iter().any(|f| f.label.is_some()) {
        // Labels feed form scaffolding downstream; surface them as a map.
        builder = builder.blank().block(
            &format!("export const {pascal}Labels = {{"),
            "} as const;",
            |b| {
                b.each(
                    entity.fields.iter().filter(|f| f.label.is_some()),
                    |b, field| {
                        let label = field.label.as_deref().unwrap_or_default();
                        b.line(&format!("{}: \"{}\",", field.name, label))
                    },
                )
            },
        );
    }

    builder.build()
}
