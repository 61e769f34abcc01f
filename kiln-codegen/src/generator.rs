//! Generator and template contracts.

use std::collections::BTreeMap;

use eyre::Result;
use kiln_core::GeneratedFile;
use kiln_ir::ManifestIR;

use crate::{Category, GenContext};

/// A single artifact generator.
///
/// Generators are pure: they read the IR and the context and return file
/// payloads. They never touch the filesystem and never re-derive names the
/// compiler already derived.
pub trait Generator {
    /// Stable generator name, used in run reports.
    fn name(&self) -> &'static str;

    /// The artifact category this generator belongs to. `None` means no
    /// mapping, which keeps the generator included under every mode.
    fn category(&self) -> Option<Category> {
        None
    }

    /// Produce file payloads for the given IR.
    fn generate(&self, ir: &ManifestIR, ctx: &GenContext) -> Result<Vec<GeneratedFile>>;
}

/// A post-generation hook that sees every buffered file from the run and may
/// append more, typically a barrel/index file tying the outputs together.
pub trait PostGenerate {
    /// Hook name for run reports.
    fn name(&self) -> &'static str;

    /// Produce additional files from the full buffered output.
    fn assemble(
        &self,
        ir: &ManifestIR,
        ctx: &GenContext,
        files: &[GeneratedFile],
    ) -> Result<Vec<GeneratedFile>>;
}

/// Template identity, surfaced in registries and reports.
#[derive(Debug, Clone)]
pub struct TemplateMeta {
    /// Stable template id ("node").
    pub id: String,
    /// Human-readable description.
    pub description: String,
}

/// Output layout configuration shared by every generator in a template.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Directory prefix applied to every generated path.
    pub base_dir: String,
    /// Import aliases: alias prefix → directory, used when one generated
    /// file imports from another.
    pub aliases: BTreeMap<String, String>,
}

/// An ordered bundle of generators plus an optional post-generate hook.
///
/// Generator order is declaration order and the runner never reorders it.
pub struct Template {
    /// Identity.
    pub meta: TemplateMeta,
    /// Output layout.
    pub config: OutputConfig,
    /// Generators, in execution order.
    pub generators: Vec<Box<dyn Generator>>,
    /// Optional hook running after every generator succeeded.
    pub post_generate: Option<Box<dyn PostGenerate>>,
}

impl Template {
    /// Start a template with the given id and description.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta: TemplateMeta {
                id: id.into(),
                description: description.into(),
            },
            config: OutputConfig::default(),
            generators: Vec::new(),
            post_generate: None,
        }
    }

    /// Set the output layout.
    pub fn with_config(mut self, config: OutputConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a generator. Order of calls is execution order.
    pub fn with_generator(mut self, generator: impl Generator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    /// Set the post-generate hook.
    pub fn with_post_generate(mut self, hook: impl PostGenerate + 'static) -> Self {
        self.post_generate = Some(Box::new(hook));
        self
    }
}
