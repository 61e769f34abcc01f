//! Barrel-file assembly.

use eyre::Result;
use kiln_codegen::{GenContext, PostGenerate};
use kiln_core::{CodeBuilder, GeneratedFile, to_camel_case};
use kiln_ir::ManifestIR;

/// Assembles `src/index.ts` from whatever the run actually produced.
///
/// Runs over the buffered output rather than the IR, so modules skipped by
/// the generation mode never appear in the barrel. Each module is exported
/// under a namespace ("postApi", "postServices") to keep the re-exports
/// collision-free.
pub struct IndexAssembler;

impl PostGenerate for IndexAssembler {
    fn name(&self) -> &'static str {
        "index"
    }

    fn assemble(
        &self,
        _ir: &ManifestIR,
        _ctx: &GenContext,
        files: &[GeneratedFile],
    ) -> Result<Vec<GeneratedFile>> {
        let mut builder = CodeBuilder::typescript();

        for file in files {
            let Some(module) = file.path.strip_prefix("src/") else {
                continue;
            };
            let Some(module) = module.strip_suffix(".ts") else {
                continue;
            };
            let Some((dir, stem)) = module.split_once('/') else {
                continue;
            };
            builder = builder.line(&format!(
                "export * as {} from \"./{module}\";",
                namespace(dir, stem)
            ));
        }

        Ok(vec![GeneratedFile::new("src/index.ts", builder.build())])
    }
}

/// Namespace alias for a module: entity first, directory last
/// ("schemas/post" -> "postSchemas", "api/router" -> "routerApi").
fn namespace(dir: &str, stem: &str) -> String {
    to_camel_case(&format!("{stem}_{dir}"))
}
