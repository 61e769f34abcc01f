//! Centralized name derivation.
//!
//! Every identifier in every generated artifact comes through this module,
//! exactly once, at compile time. Generators read derived names off the IR
//! instead of re-deriving them, which is what keeps the storage schema, the
//! API layer, and the client layer agreeing with each other.

use std::collections::BTreeMap;

use kiln_core::{to_camel_case, to_pascal_case, to_snake_case};
use serde::Serialize;

/// Irregular plural forms that the suffix rules get wrong.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Pluralizer with regular English rules plus a configurable irregular-word
/// table.
///
/// The table is explicit configuration rather than module state so tests can
/// substitute their own entries deterministically.
#[derive(Debug, Clone, Serialize)]
pub struct Pluralizer {
    irregulars: BTreeMap<String, String>,
}

impl Default for Pluralizer {
    fn default() -> Self {
        Self {
            irregulars: IRREGULAR_PLURALS
                .iter()
                .map(|(s, p)| (s.to_string(), p.to_string()))
                .collect(),
        }
    }
}

impl Pluralizer {
    /// Create a pluralizer with the default irregular-word table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pluralizer with a custom irregular-word table.
    pub fn with_irregulars(irregulars: BTreeMap<String, String>) -> Self {
        Self { irregulars }
    }

    /// Add an irregular singular → plural pair.
    pub fn add_irregular(&mut self, singular: impl Into<String>, plural: impl Into<String>) {
        self.irregulars.insert(singular.into(), plural.into());
    }

    /// Pluralize a word. For multi-segment snake_case input only the final
    /// segment is pluralized ("order_item" -> "order_items").
    pub fn pluralize(&self, word: &str) -> String {
        match word.rsplit_once('_') {
            Some((head, tail)) => format!("{}_{}", head, self.pluralize_word(tail)),
            None => self.pluralize_word(word),
        }
    }

    fn pluralize_word(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }
        if let Some(plural) = self.irregulars.get(word) {
            return plural.clone();
        }
        if word.ends_with("ss")
            || word.ends_with("ch")
            || word.ends_with("sh")
            || word.ends_with('x')
            || word.ends_with('z')
        {
            return format!("{word}es");
        }
        // A trailing lone 's' is treated as already plural ("posts").
        if word.ends_with('s') {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix('y') {
            let penultimate = stem.chars().last();
            if penultimate.is_some_and(|c| !"aeiou".contains(c)) {
                return format!("{stem}ies");
            }
        }
        format!("{word}s")
    }
}

/// Shared naming context: the single source of truth for derived names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NamingContext {
    pluralizer: Pluralizer,
}

impl NamingContext {
    /// Create a context with the default pluralizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom pluralizer.
    pub fn with_pluralizer(pluralizer: Pluralizer) -> Self {
        Self { pluralizer }
    }

    /// The pluralizer instance used for every plural form.
    pub fn pluralizer(&self) -> &Pluralizer {
        &self.pluralizer
    }

    /// Entity name → table name: pluralized snake_case ("OrderItem" -> "order_items").
    pub fn table_name(&self, entity: &str) -> String {
        self.pluralizer.pluralize(&to_snake_case(entity))
    }

    /// Field name → column name: snake_case ("authorId" -> "author_id").
    pub fn column_name(&self, field: &str) -> String {
        to_snake_case(field)
    }

    /// Relation name → accessor name: camelCase, pluralized iff the
    /// cardinality is "many".
    pub fn accessor_name(&self, relation: &str, many: bool) -> String {
        let camel = to_camel_case(relation);
        if many {
            to_camel_case(&self.pluralizer.pluralize(&to_snake_case(&camel)))
        } else {
            camel
        }
    }

    /// Default foreign-key field name for a relation or target entity
    /// ("author" -> "authorId").
    pub fn foreign_key_field(&self, name: &str) -> String {
        format!("{}Id", to_camel_case(name))
    }

    /// Join entity name for a many-to-many pair, canonical alphabetical
    /// order regardless of which side declared the relation.
    pub fn join_entity_name(&self, a: &str, b: &str) -> String {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        format!("{}{}", to_pascal_case(left), to_pascal_case(right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let p = Pluralizer::new();
        assert_eq!(p.pluralize("post"), "posts");
        assert_eq!(p.pluralize("category"), "categories");
        assert_eq!(p.pluralize("box"), "boxes");
        assert_eq!(p.pluralize("class"), "classes");
        assert_eq!(p.pluralize("day"), "days");
    }

    #[test]
    fn test_irregular_plurals() {
        let p = Pluralizer::new();
        assert_eq!(p.pluralize("person"), "people");
        assert_eq!(p.pluralize("child"), "children");
    }

    #[test]
    fn test_already_plural_kept() {
        let p = Pluralizer::new();
        assert_eq!(p.pluralize("posts"), "posts");
        assert_eq!(p.pluralize("users"), "users");
    }

    #[test]
    fn test_last_segment_pluralized() {
        let p = Pluralizer::new();
        assert_eq!(p.pluralize("order_item"), "order_items");
        assert_eq!(p.pluralize("team_person"), "team_people");
    }

    #[test]
    fn test_custom_irregular_table() {
        let mut p = Pluralizer::new();
        p.add_irregular("cactus", "cacti");
        assert_eq!(p.pluralize("cactus"), "cacti");
    }

    #[test]
    fn test_table_name() {
        let naming = NamingContext::new();
        assert_eq!(naming.table_name("User"), "users");
        assert_eq!(naming.table_name("OrderItem"), "order_items");
        assert_eq!(naming.table_name("Category"), "categories");
        assert_eq!(naming.table_name("Person"), "people");
    }

    #[test]
    fn test_column_name() {
        let naming = NamingContext::new();
        assert_eq!(naming.column_name("email"), "email");
        assert_eq!(naming.column_name("authorId"), "author_id");
    }

    #[test]
    fn test_accessor_name() {
        let naming = NamingContext::new();
        assert_eq!(naming.accessor_name("author", false), "author");
        assert_eq!(naming.accessor_name("tag", true), "tags");
        // Relations the user already named in plural stay stable.
        assert_eq!(naming.accessor_name("posts", true), "posts");
    }

    #[test]
    fn test_foreign_key_field() {
        let naming = NamingContext::new();
        assert_eq!(naming.foreign_key_field("author"), "authorId");
        assert_eq!(naming.foreign_key_field("User"), "userId");
    }

    #[test]
    fn test_join_entity_name_is_canonical() {
        let naming = NamingContext::new();
        assert_eq!(naming.join_entity_name("Post", "Tag"), "PostTag");
        assert_eq!(naming.join_entity_name("Tag", "Post"), "PostTag");
    }
}
