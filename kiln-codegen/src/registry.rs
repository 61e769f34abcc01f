//! Template registry.

use std::collections::BTreeMap;

use crate::Template;

/// Registry of template builders keyed by template id.
///
/// Registration stores a constructor rather than a built template, so
/// templates are built lazily per run and never share generator state.
#[derive(Default)]
pub struct TemplateRegistry {
    builders: BTreeMap<String, fn() -> Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template constructor under its id. Re-registering an id
    /// replaces the previous constructor.
    pub fn register(&mut self, id: impl Into<String>, builder: fn() -> Template) {
        self.builders.insert(id.into(), builder);
    }

    /// Whether a template id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.builders.contains_key(id)
    }

    /// Build a fresh template instance by id.
    pub fn build(&self, id: &str) -> Option<Template> {
        self.builders.get(id).map(|builder| builder())
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }
}
