//! Express API generator.

use eyre::Result;
use kiln_codegen::{Category, GenContext, Generator};
use kiln_core::{CodeBuilder, GeneratedFile, to_camel_case, to_pascal_case};
use kiln_ir::{Access, ManifestIR, ResolvedEntity};

use super::{many_accessors, module_stem};

/// Emits one Express router per entity plus a root router mounting them
/// under their table names. Protected entities get `requireAuth` applied to
/// exactly the scope their access policy covers.
pub struct ExpressApi;

impl Generator for ExpressApi {
    fn name(&self) -> &'static str {
        "express-api"
    }

    fn category(&self) -> Option<Category> {
        Some(Category::Api)
    }

    fn generate(&self, ir: &ManifestIR, ctx: &GenContext) -> Result<Vec<GeneratedFile>> {
        let mut files: Vec<GeneratedFile> = ir
            .entities
            .iter()
            .map(|entity| {
                let stem = module_stem(&ir.naming, &entity.name);
                GeneratedFile::new(
                    format!("src/api/{stem}.ts"),
                    render_router(entity, &stem, ctx, ir),
                )
            })
            .collect();

        files.push(GeneratedFile::new("src/api/router.ts", render_root(ir)));
        if ir.entities.iter().any(|e| e.access != Access::Public) {
            files.push(GeneratedFile::new(
                "src/api/middleware.ts",
                render_middleware(),
            ));
        }

        Ok(files)
    }
}

fn render_router(entity: &ResolvedEntity, stem: &str, ctx: &GenContext, ir: &ManifestIR) -> String {
    let pascal = to_pascal_case(&entity.name);
    let plural = to_pascal_case(&entity.table);
    let camel = to_camel_case(&entity.name);
    let services = ctx.imports().resolve(&format!("@services/{stem}"));
    let external = entity.external.is_some();

    let read_guard = if entity.access.protects_reads() {
        "requireAuth, "
    } else {
        ""
    };
    let write_guard = if entity.access.protects_writes() {
        "requireAuth, "
    } else {
        ""
    };

    // External entities get read-only routers with no parse call, so the
    // ZodError import only appears when mutation handlers do.
    let mut builder = CodeBuilder::typescript()
        .line("import { Router } from \"express\";")
        .when(!external, |b| {
            b.line("import { ZodError } from \"zod\";")
        })
        .line(&format!("import * as service from \"{services}\";"));
    if entity.access != Access::Public {
        builder = builder.line("import { requireAuth } from \"./middleware\";");
    }

    builder = builder
        .blank()
        .line(&format!("export const {camel}Router = Router();"))
        .blank()
        .block(
            &format!("{camel}Router.get(\"/\", {read_guard}async (_req, res) => {{"),
            "});",
            |b| b.line(&format!("res.json(await service.list{plural}());")),
        )
        .blank()
        .block(
            &format!("{camel}Router.get(\"/:id\", {read_guard}async (req, res) => {{"),
            "});",
            |b| {
                b.line(&format!(
                    "const record = await service.get{pascal}(req.params.id);"
                ))
                .block("if (record === null) {", "}", |b| {
                    b.line("res.status(404).json({ error: \"not found\" });").line("return;")
                })
                .line("res.json(record);")
            },
        );

    // Externally sourced entities are read-only through the API.
    if !external {
        for accessor in many_accessors(entity, ir) {
            builder = builder.blank().block(
                &format!(
                    "{camel}Router.get(\"/:id/{}\", {read_guard}async (req, res) => {{",
                    accessor.accessor
                ),
                "});",
                |b| {
                    b.line(&format!(
                        "res.json(await service.{}(req.params.id));",
                        accessor.fn_name
                    ))
                },
            );
        }

        builder = builder
            .blank()
            .block(
                &format!("{camel}Router.post(\"/\", {write_guard}async (req, res) => {{"),
                "});",
                |b| {
                    b.block("try {", "} catch (err) {", |b| {
                        b.line(&format!(
                            "res.status(201).json(await service.create{pascal}(req.body));"
                        ))
                    })
                    .indent()
                    .block("if (err instanceof ZodError) {", "}", |b| {
                        b.line("res.status(422).json({ error: err.issues });").line("return;")
                    })
                    .line("throw err;")
                    .dedent()
                    .line("}")
                },
            )
            .blank()
            .block(
                &format!("{camel}Router.put(\"/:id\", {write_guard}async (req, res) => {{"),
                "});",
                |b| {
                    b.block("try {", "} catch (err) {", |b| {
                        b.line(&format!(
                            "const record = await service.update{pascal}(req.params.id, req.body);"
                        ))
                        .block("if (record === null) {", "}", |b| {
                            b.line("res.status(404).json({ error: \"not found\" });").line("return;")
                        })
                        .line("res.json(record);")
                    })
                    .indent()
                    .block("if (err instanceof ZodError) {", "}", |b| {
                        b.line("res.status(422).json({ error: err.issues });").line("return;")
                    })
                    .line("throw err;")
                    .dedent()
                    .line("}")
                },
            )
            .blank()
            .block(
                &format!("{camel}Router.delete(\"/:id\", {write_guard}async (req, res) => {{"),
                "});",
                |b| {
                    b.line(&format!("await service.delete{pascal}(req.params.id);"))
                        .line("res.status(204).end();")
                },
            );
    }

    builder.build()
}

fn render_root(ir: &ManifestIR) -> String {
    let mut builder = CodeBuilder::typescript().line("import { Router } from \"express\";");
    for entity in &ir.entities {
        let stem = module_stem(&ir.naming, &entity.name);
        let camel = to_camel_case(&entity.name);
        builder = builder.line(&format!(
            "import {{ {camel}Router }} from \"./{stem}\";"
        ));
    }

    builder = builder.blank().line("export const apiRouter = Router();");
    for entity in &ir.entities {
        let camel = to_camel_case(&entity.name);
        builder = builder.line(&format!(
            "apiRouter.use(\"/{}\", {camel}Router);",
            entity.table
        ));
    }

    builder.build()
}

fn render_middleware() -> String {
    CodeBuilder::typescript()
        .line("import type { NextFunction, Request, Response } from \"express\";")
        .blank()
        .block(
            "export function requireAuth(req: Request, res: Response, next: NextFunction): void {",
            "}",
            |b| {
                b.block("if (req.headers.authorization === undefined) {", "}", |b| {
                    b.line("res.status(401).json({ error: \"authentication required\" });")
                        .line("return;")
                })
                .line("next();")
            },
        )
        .build()
}
