//! Shared generation context.

use std::collections::BTreeMap;

use crate::OutputConfig;

/// Context handed to every generator in a run.
///
/// Carries the template's output layout so generators can emit imports that
/// line up with where sibling generators place their files.
#[derive(Debug, Clone)]
pub struct GenContext {
    base_dir: String,
    imports: ImportResolver,
}

impl GenContext {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            imports: ImportResolver::new(config.aliases.clone()),
        }
    }

    /// Directory prefix the runner applies to every generated path.
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// The import resolver for cross-file references.
    pub fn imports(&self) -> &ImportResolver {
        &self.imports
    }
}

/// Resolves aliased import specifiers to concrete paths.
///
/// Aliases keep generators decoupled from the template's directory layout:
/// a generator imports from "@schemas/post" and the template decides that
/// "@schemas" means "./schemas".
#[derive(Debug, Clone, Default)]
pub struct ImportResolver {
    aliases: BTreeMap<String, String>,
}

impl ImportResolver {
    pub fn new(aliases: BTreeMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Resolve a specifier. The longest matching alias prefix wins;
    /// specifiers without a matching alias pass through untouched.
    pub fn resolve(&self, spec: &str) -> String {
        let mut best: Option<(&str, &str)> = None;
        for (alias, target) in &self.aliases {
            if let Some(rest) = spec.strip_prefix(alias.as_str())
                && (rest.is_empty() || rest.starts_with('/'))
                && best.is_none_or(|(a, _)| alias.len() > a.len())
            {
                best = Some((alias, target));
            }
        }

        match best {
            Some((alias, target)) => format!("{}{}", target, &spec[alias.len()..]),
            None => spec.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ImportResolver {
        ImportResolver::new(BTreeMap::from([
            ("@schemas".to_string(), "./schemas".to_string()),
            ("@schemas/gen".to_string(), "./generated/schemas".to_string()),
        ]))
    }

    #[test]
    fn test_alias_resolution() {
        let r = resolver();
        assert_eq!(r.resolve("@schemas/post"), "./schemas/post");
        assert_eq!(r.resolve("@schemas"), "./schemas");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let r = resolver();
        assert_eq!(r.resolve("@schemas/gen/post"), "./generated/schemas/post");
    }

    #[test]
    fn test_unaliased_passes_through() {
        let r = resolver();
        assert_eq!(r.resolve("./services/post"), "./services/post");
        // A prefix match mid-segment is not an alias match.
        assert_eq!(r.resolve("@schemasx/post"), "@schemasx/post");
    }
}
