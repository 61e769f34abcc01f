//! Typed fetch-client generator.

use eyre::Result;
use kiln_codegen::{Category, GenContext, Generator};
use kiln_core::{CodeBuilder, GeneratedFile, to_pascal_case};
use kiln_ir::{ManifestIR, ResolvedEntity};

use super::{many_accessors, module_stem};

/// Emits one typed fetch wrapper per entity, mirroring the API surface so
/// front-end code talks to the generated routes through the same names.
pub struct FetchClient;

impl Generator for FetchClient {
    fn name(&self) -> &'static str {
        "fetch-client"
    }

    fn category(&self) -> Option<Category> {
        Some(Category::Client)
    }

    fn generate(&self, ir: &ManifestIR, ctx: &GenContext) -> Result<Vec<GeneratedFile>> {
        Ok(ir
            .entities
            .iter()
            .map(|entity| {
                let stem = module_stem(&ir.naming, &entity.name);
                GeneratedFile::new(
                    format!("src/client/{stem}.ts"),
                    render(entity, &stem, ctx, ir),
                )
            })
            .collect())
    }
}

fn render(entity: &ResolvedEntity, stem: &str, ctx: &GenContext, ir: &ManifestIR) -> String {
    let pascal = to_pascal_case(&entity.name);
    let plural = to_pascal_case(&entity.table);
    let schemas = ctx.imports().resolve(&format!("@schemas/{stem}"));
    let external = entity.external.is_some();

    let accessors = if external {
        Vec::new()
    } else {
        many_accessors(entity, ir)
    };
    let mut related: Vec<(&str, &str)> = accessors
        .iter()
        .filter(|a| a.target_pascal != pascal)
        .map(|a| (a.target_pascal.as_str(), a.target_stem.as_str()))
        .collect();
    related.sort_unstable();
    related.dedup();

    let mut builder = CodeBuilder::typescript()
        .line(&format!(
            "import type {{ {pascal}, {pascal}Create }} from \"{schemas}\";"
        ))
        .each(&related, |b, (target, target_stem)| {
            let module = ctx.imports().resolve(&format!("@schemas/{target_stem}"));
            b.line(&format!("import type {{ {target} }} from \"{module}\";"))
        })
        .blank()
        .line(&format!("const BASE = \"/api/{}\";", entity.table))
        .blank()
        .block(
            "async function request<T>(url: string, init?: RequestInit): Promise<T> {",
            "}",
            |b| {
                b.line("const res = await fetch(url, init);")
                    .block("if (!res.ok) {", "}", |b| {
                        b.line("throw new Error(`request failed: ${res.status}`);")
                    })
                    .line("return res.status === 204 ? (undefined as T) : res.json();")
            },
        )
        .blank()
        .block(
            &format!("export function list{plural}(): Promise<{pascal}[]> {{"),
            "}",
            |b| b.line("return request(BASE);"),
        )
        .blank()
        .block(
            &format!("export function get{pascal}(id: string): Promise<{pascal}> {{"),
            "}",
            |b| b.line("return request(`${BASE}/${id}`);"),
        );

    if !external {
        builder = builder
            .blank()
            .block(
                &format!("export function create{pascal}(input: {pascal}Create): Promise<{pascal}> {{"),
                "}",
                |b| {
                    b.block("return request(BASE, {", "});", |b| {
                        b.line("method: \"POST\",")
                            .line("headers: { \"content-type\": \"application/json\" },")
                            .line("body: JSON.stringify(input),")
                    })
                },
            )
            .blank()
            .block(
                &format!(
                    "export function update{pascal}(id: string, input: Partial<{pascal}Create>): Promise<{pascal}> {{"
                ),
                "}",
                |b| {
                    b.block("return request(`${BASE}/${id}`, {", "});", |b| {
                        b.line("method: \"PUT\",")
                            .line("headers: { \"content-type\": \"application/json\" },")
                            .line("body: JSON.stringify(input),")
                    })
                },
            )
            .blank()
            .block(
                &format!("export function delete{pascal}(id: string): Promise<void> {{"),
                "}",
                |b| b.line("return request(`${BASE}/${id}`, { method: \"DELETE\" });"),
            );
    }

    builder = builder.each(&accessors, |b, accessor| {
        b.blank().block(
            &format!(
                "export function {}(id: string): Promise<{}[]> {{",
                accessor.fn_name, accessor.target_pascal
            ),
            "}",
            |b| {
                b.line(&format!(
                    "return request(`${{BASE}}/${{id}}/{}`);",
                    accessor.accessor
                ))
            },
        )
    });

    builder.build()
}
