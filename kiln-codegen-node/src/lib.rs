//! Node/TypeScript generator bundle for the Kiln entity compiler.
//!
//! The `node` template turns a [`kiln_ir::ManifestIR`] into a runnable
//! Express + Zod project skeleton: a SQL schema, per-entity validation
//! schemas, routers, data-access services, a typed fetch client, and a
//! barrel index assembled from whatever the generation mode let through.

mod generators;
mod index;
mod type_map;

use std::collections::BTreeMap;

use kiln_codegen::{OutputConfig, Template, TemplateRegistry};

pub use generators::{ExpressApi, FetchClient, Services, SqlSchema, ZodSchemas};
pub use index::IndexAssembler;

/// Template id used in the registry.
pub const TEMPLATE_ID: &str = "node";

/// Build the node template with its full generator lineup.
pub fn template() -> Template {
    Template::new(TEMPLATE_ID, "Express + Zod TypeScript project")
        .with_config(OutputConfig {
            base_dir: String::new(),
            aliases: BTreeMap::from([
                ("@schemas".to_string(), "../schemas".to_string()),
                ("@services".to_string(), "../services".to_string()),
            ]),
        })
        .with_generator(SqlSchema)
        .with_generator(ZodSchemas)
        .with_generator(ExpressApi)
        .with_generator(Services)
        .with_generator(FetchClient)
        .with_post_generate(IndexAssembler)
}

/// Register the node template.
pub fn register(registry: &mut TemplateRegistry) {
    registry.register(TEMPLATE_ID, template);
}
