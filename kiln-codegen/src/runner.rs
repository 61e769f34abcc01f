//! Template runner: mode filtering, ordered execution, buffered persistence.

use std::path::PathBuf;

use eyre::{Result, WrapErr};
use kiln_core::{FileSink, GeneratedFile};
use kiln_ir::ManifestIR;

use crate::{GenContext, Template, category_included};

/// Options for a single run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Output root; generated paths land under `out_dir`/`base_dir`.
    pub out_dir: PathBuf,
    /// Execute everything but skip persistence.
    pub dry_run: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Every buffered file, in generation order.
    pub files: Vec<GeneratedFile>,
    /// Names of generators that ran.
    pub executed: Vec<String>,
    /// Names of generators filtered out by mode.
    pub skipped: Vec<String>,
    /// Number of files persisted; zero under dry-run.
    pub written: usize,
}

/// Drives one template against one IR.
///
/// Output is buffered: nothing reaches the sink until every generator and
/// the post-generate hook have succeeded, so a mid-run failure leaves no
/// partial tree behind.
pub struct Runner {
    template: Template,
}

impl Runner {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Run every mode-included generator in declaration order, then the
    /// post-generate hook, then persist.
    pub fn run(
        &self,
        ir: &ManifestIR,
        options: &RunOptions,
        sink: &mut dyn FileSink,
    ) -> Result<RunReport> {
        let ctx = GenContext::new(&self.template.config);
        let mut report = RunReport::default();

        for generator in &self.template.generators {
            if !category_included(&ir.mode, generator.category()) {
                report.skipped.push(generator.name().to_string());
                continue;
            }

            let files = generator
                .generate(ir, &ctx)
                .wrap_err_with(|| format!("generator '{}' failed", generator.name()))?;
            report.files.extend(files);
            report.executed.push(generator.name().to_string());
        }

        if let Some(hook) = &self.template.post_generate {
            let extra = hook
                .assemble(ir, &ctx, &report.files)
                .wrap_err_with(|| format!("post-generate hook '{}' failed", hook.name()))?;
            report.files.extend(extra);
        }

        if !options.dry_run {
            let base = options.out_dir.join(&self.template.config.base_dir);
            for file in &report.files {
                let path = base.join(&file.path);
                sink.write(&path, &file.content)
                    .wrap_err_with(|| format!("failed to persist '{}'", file.path))?;
                report.written += 1;
            }
        }

        Ok(report)
    }
}
