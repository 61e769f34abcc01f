//! Core types shared across the Kiln workspace.
//!
//! This crate holds what every other crate agrees on: the [`GeneratedFile`]
//! output contract with its [`FileSink`] persistence boundary, the
//! case-conversion utilities the naming deriver and the validator both rely
//! on, and the [`CodeBuilder`] generators render text through.

mod code;
mod file;
mod utils;

pub use code::{CodeBuilder, Indent};
pub use file::{FileSink, FsSink, GeneratedFile, MemorySink};
pub use utils::{is_camel_case, is_pascal_case, to_camel_case, to_pascal_case, to_snake_case};
