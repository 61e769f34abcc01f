//! Data-access service generator.

use eyre::Result;
use kiln_codegen::{Category, GenContext, Generator};
use kiln_core::{CodeBuilder, GeneratedFile, to_pascal_case};
use kiln_ir::{ManifestIR, ResolvedEntity};

use super::{many_accessors, module_stem};

/// Emits one service module per entity. Locally stored entities get
/// SQL-backed accessors; externally sourced entities get fetch-backed ones
/// with the same signatures, so the API layer never knows the difference.
pub struct Services;

impl Generator for Services {
    fn name(&self) -> &'static str {
        "services"
    }

    fn category(&self) -> Option<Category> {
        Some(Category::Services)
    }

    fn generate(&self, ir: &ManifestIR, ctx: &GenContext) -> Result<Vec<GeneratedFile>> {
        Ok(ir
            .entities
            .iter()
            .map(|entity| {
                let stem = module_stem(&ir.naming, &entity.name);
                let content = match &entity.external {
                    Some(source) => render_external(entity, &stem, ctx, &source.base_url, source.path.as_deref()),
                    None => render_local(entity, &stem, ctx, ir),
                };
                GeneratedFile::new(format!("src/services/{stem}.ts"), content)
            })
            .collect())
    }
}

fn render_local(entity: &ResolvedEntity, stem: &str, ctx: &GenContext, ir: &ManifestIR) -> String {
    let pascal = to_pascal_case(&entity.name);
    let plural = to_pascal_case(&entity.table);
    let table = &entity.table;
    let pk = &entity.primary_key().column;
    let schemas = ctx.imports().resolve(&format!("@schemas/{stem}"));

    let columns: Vec<&str> = entity
        .input_fields()
        .map(|f| f.column.as_str())
        .collect();
    let placeholders = vec!["?"; columns.len() + 1].join(", ");
    let args: Vec<String> = entity
        .input_fields()
        .map(|f| format!("data.{}", f.name))
        .collect();

    let insert = if columns.is_empty() {
        format!("await db.run(`INSERT INTO {table} ({pk}) VALUES (?)`, id);")
    } else {
        format!(
            "await db.run(`INSERT INTO {table} ({pk}, {}) VALUES ({placeholders})`, id, {});",
            columns.join(", "),
            args.join(", ")
        )
    };

    let alive = if entity.soft_delete {
        " WHERE deleted_at IS NULL"
    } else {
        ""
    };
    let alive_and = if entity.soft_delete {
        " AND deleted_at IS NULL"
    } else {
        ""
    };

    let accessors = many_accessors(entity, ir);
    let mut related: Vec<(&str, &str)> = accessors
        .iter()
        .filter(|a| a.target_pascal != pascal)
        .map(|a| (a.target_pascal.as_str(), a.target_stem.as_str()))
        .collect();
    related.sort_unstable();
    related.dedup();

    let builder = CodeBuilder::typescript()
        .line("import { randomUUID } from \"node:crypto\";")
        .line("import { db } from \"../db\";")
        .line(&format!(
            "import {{ type {pascal}, type {pascal}Create, {pascal}CreateSchema, {pascal}UpdateSchema }} from \"{schemas}\";"
        ))
        .each(&related, |b, (target, target_stem)| {
            let module = ctx.imports().resolve(&format!("@schemas/{target_stem}"));
            b.line(&format!("import {{ type {target} }} from \"{module}\";"))
        })
        .when(entity.audit, |b| b.line("import { audit } from \"../audit\";"))
        .blank()
        .block(
            &format!("export async function list{plural}(): Promise<{pascal}[]> {{"),
            "}",
            |b| b.line(&format!("return db.all(`SELECT * FROM {table}{alive}`);")),
        )
        .blank()
        .block(
            &format!("export async function get{pascal}(id: string): Promise<{pascal} | null> {{"),
            "}",
            |b| {
                b.line(&format!(
                    "return db.get(`SELECT * FROM {table} WHERE {pk} = ?{alive_and}`, id);"
                ))
            },
        )
        .blank()
        .block(
            &format!("export async function create{pascal}(input: {pascal}Create): Promise<{pascal}> {{"),
            "}",
            |b| {
                let mut b = b
                    .line(&format!("const data = {pascal}CreateSchema.parse(input);"))
                    .line("const id = randomUUID();")
                    .line(&insert);
                if entity.audit {
                    b = b.line(&format!("await audit.record(\"{stem}.created\", id);"));
                }
                b.line(&format!("return (await get{pascal}(id))!;"))
            },
        )
        .blank()
        .block(
            &format!(
                "export async function update{pascal}(id: string, input: unknown): Promise<{pascal} | null> {{"
            ),
            "}",
            |b| {
                // The update schema is partial: only fields present in the
                // parsed body make it into the SET clause.
                let mut b = b
                    .line(&format!("const data = {pascal}UpdateSchema.parse(input);"))
                    .line("const assignments: string[] = [];")
                    .line("const args: unknown[] = [];")
                    .each(entity.input_fields(), |b, field| {
                        b.block(
                            &format!("if (data.{} !== undefined) {{", field.name),
                            "}",
                            |b| {
                                b.line(&format!("assignments.push(\"{} = ?\");", field.column))
                                    .line(&format!("args.push(data.{});", field.name))
                            },
                        )
                    })
                    .block("if (assignments.length > 0) {", "}", |b| {
                        b.line(&format!(
                            "await db.run(`UPDATE {table} SET ${{assignments.join(\", \")}} WHERE {pk} = ?{alive_and}`, ...args, id);"
                        ))
                    });
                if entity.audit {
                    b = b.line(&format!("await audit.record(\"{stem}.updated\", id);"));
                }
                b.line(&format!("return get{pascal}(id);"))
            },
        )
        .blank()
        .block(
            &format!("export async function delete{pascal}(id: string): Promise<void> {{"),
            "}",
            |b| {
                let b = if entity.soft_delete {
                    b.line(&format!(
                        "await db.run(`UPDATE {table} SET deleted_at = CURRENT_TIMESTAMP WHERE {pk} = ?{alive_and}`, id);"
                    ))
                } else {
                    b.line(&format!(
                        "await db.run(`DELETE FROM {table} WHERE {pk} = ?`, id);"
                    ))
                };
                if entity.audit {
                    b.line(&format!("await audit.record(\"{stem}.deleted\", id);"))
                } else {
                    b
                }
            },
        )
        .each(&accessors, |b, accessor| {
            b.blank().block(
                &format!(
                    "export async function {}(id: string): Promise<{}[]> {{",
                    accessor.fn_name, accessor.target_pascal
                ),
                "}",
                |b| b.line(&format!("return db.all(`{}`, id);", accessor.sql)),
            )
        });

    builder.build()
}

fn render_external(
    entity: &ResolvedEntity,
    stem: &str,
    ctx: &GenContext,
    base_url: &str,
    path: Option<&str>,
) -> String {
    let pascal = to_pascal_case(&entity.name);
    let plural = to_pascal_case(&entity.table);
    let schemas = ctx.imports().resolve(&format!("@schemas/{stem}"));
    let endpoint = match path {
        Some(path) => format!("{}{}", base_url.trim_end_matches('/'), path),
        None => format!("{}/{}", base_url.trim_end_matches('/'), entity.table),
    };

    CodeBuilder::typescript()
        .line(&format!(
            "import {{ type {pascal}, {pascal}Schema }} from \"{schemas}\";"
        ))
        .blank()
        .line(&format!("const ENDPOINT = \"{endpoint}\";"))
        .blank()
        .block(
            "async function request(url: string): Promise<unknown> {",
            "}",
            |b| {
                b.line("const res = await fetch(url);")
                    .block("if (!res.ok) {", "}", |b| {
                        b.line("throw new Error(`upstream request failed: ${res.status}`);")
                    })
                    .line("return res.json();")
            },
        )
        .blank()
        .block(
            &format!("export async function list{plural}(): Promise<{pascal}[]> {{"),
            "}",
            |b| {
                b.line("const data = await request(ENDPOINT);")
                    .line(&format!("return {pascal}Schema.array().parse(data);"))
            },
        )
        .blank()
        .block(
            &format!("export async function get{pascal}(id: string): Promise<{pascal} | null> {{"),
            "}",
            |b| {
                b.line("const data = await request(`${ENDPOINT}/${id}`);")
                    .line(&format!("return {pascal}Schema.parse(data);"))
            },
        )
        .build()
}
