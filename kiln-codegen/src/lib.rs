//! Compilation and generation pipeline for the Kiln entity compiler.
//!
//! This crate turns a validated manifest into a [`kiln_ir::ManifestIR`] and
//! drives pluggable generator bundles against it:
//!
//! ```text
//! manifest → validate (gate) → compile → ManifestIR
//!                                           │
//!                  Template ──filter by mode─┤
//!                                           ▼
//!                        generators, strictly in declared order
//!                                           │
//!                            buffered files ─→ FileSink
//! ```
//!
//! The compiler is the only place names are derived; the runner is the only
//! place files are persisted. Everything in between is pure and
//! deterministic, which is what makes repeated runs byte-identical.

mod category;
mod compile;
mod context;
mod generator;
mod registry;
mod runner;

pub use category::{Category, category_included};
pub use compile::{
    CompileOutput, CompileWarning, compile, compile_with_naming, naming_with_irregulars,
};
pub use context::{GenContext, ImportResolver};
pub use generator::{Generator, OutputConfig, PostGenerate, Template, TemplateMeta};
pub use registry::TemplateRegistry;
pub use runner::{RunOptions, RunReport, Runner};
