//! Manifest → IR compilation.
//!
//! Compilation refuses invalid input: [`compile`] runs the full validation
//! pass first and fails listing every error code when the report is not
//! clean. Past that gate, lowering is infallible and deterministic, so the
//! same manifest always yields the same IR.

mod entity;
mod mode;
mod relations;

use eyre::{Result, bail};
use indexmap::IndexMap;
use kiln_ir::{ManifestIR, NamingContext, Pluralizer};
use kiln_manifest::{ManifestDescriptor, validate};

use entity::EntityBuilder;

/// A non-fatal observation made during compilation, such as a reciprocal
/// relation declaration that resolved to an already-injected foreign key.
#[derive(Debug, Clone)]
pub struct CompileWarning {
    /// Dotted path to the manifest element.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

/// Result of a successful compilation.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// The resolved IR.
    pub ir: ManifestIR,
    /// Non-fatal warnings, in discovery order.
    pub warnings: Vec<CompileWarning>,
}

/// Compile a manifest into IR with the default naming rules.
pub fn compile(manifest: &ManifestDescriptor) -> Result<CompileOutput> {
    compile_with_naming(manifest, NamingContext::new())
}

/// Compile a manifest with a custom naming context, for callers that carry
/// their own irregular-plural table.
pub fn compile_with_naming(
    manifest: &ManifestDescriptor,
    naming: NamingContext,
) -> Result<CompileOutput> {
    let report = validate(manifest);
    if !report.valid {
        let codes: Vec<&str> = report.errors.iter().map(|e| e.code.as_str()).collect();
        bail!(
            "manifest failed validation with {} error(s): {}",
            report.errors.len(),
            codes.join(", ")
        );
    }

    let auth_enabled = manifest.auth_enabled();
    let mut warnings = Vec::new();

    let mut builders: IndexMap<String, EntityBuilder> = manifest
        .entities
        .iter()
        .map(|e| {
            (
                e.name.clone(),
                EntityBuilder::new(e, &naming, auth_enabled),
            )
        })
        .collect();

    let joins = relations::resolve(manifest, &mut builders, &naming, &mut warnings);

    let resolved_mode = mode::resolve_mode(&manifest.mode);
    let database = mode::resolve_database(manifest.database.as_ref(), &resolved_mode);

    let ir = ManifestIR {
        database,
        mode: resolved_mode,
        entities: builders.into_values().map(EntityBuilder::finish).collect(),
        joins,
        naming,
    };

    Ok(CompileOutput { ir, warnings })
}

/// Convenience: compile with an extra set of irregular plurals.
pub fn naming_with_irregulars<I, S>(irregulars: I) -> NamingContext
where
    I: IntoIterator<Item = (S, S)>,
    S: Into<String>,
{
    let mut pluralizer = Pluralizer::new();
    for (singular, plural) in irregulars {
        pluralizer.add_irregular(singular, plural);
    }
    NamingContext::with_pluralizer(pluralizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_ir::{Access, FieldOrigin, FieldType, Mode, RelationKind};

    fn manifest(src: &str) -> ManifestDescriptor {
        src.parse().expect("manifest should parse")
    }

    const BLOG: &str = r#"
        [database]
        type = "sqlite"
        file = "./app.db"

        [[entities]]
        name = "User"
        timestamps = true

        [entities.fields.email]
        type = "text"
        unique = true
        email = true

        [entities.relations.posts]
        type = "hasMany"
        entity = "Post"

        [[entities]]
        name = "Post"
        timestamps = true
        softDelete = true

        [entities.fields.title]
        type = "text"
        min = 3

        [entities.relations.author]
        type = "hasOne"
        entity = "User"
        key = "userId"
    "#;

    #[test]
    fn test_compile_blog_manifest() {
        let output = compile(&manifest(BLOG)).unwrap();
        let ir = output.ir;

        assert_eq!(ir.mode, Mode::Full);
        assert_eq!(ir.database.as_ref().unwrap().file.as_deref(), Some("./app.db"));

        let user = ir.entity("User").unwrap();
        assert_eq!(user.table, "users");
        assert_eq!(user.primary_key().name, "id");
        assert_eq!(user.relations[0].accessor, "posts");
        assert_eq!(user.relations[0].kind, RelationKind::HasMany);
        assert_eq!(user.relations[0].key, "userId");

        // The hasMany injected userId into Post; the reciprocal hasOne with
        // the same explicit key reused it instead of injecting twice.
        let post = ir.entity("Post").unwrap();
        let fk = post
            .fields
            .iter()
            .find(|f| f.name == "userId")
            .expect("foreign key should be injected");
        assert_eq!(fk.ty, FieldType::Id);
        assert_eq!(
            fk.origin,
            FieldOrigin::ForeignKey {
                target: "User".into()
            }
        );
        assert_eq!(
            post.fields.iter().filter(|f| f.name == "userId").count(),
            1
        );
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(
            output.warnings[0].path,
            "entities.Post.relations.author"
        );
    }

    #[test]
    fn test_field_order_is_stable() {
        let output = compile(&manifest(BLOG)).unwrap();
        let post = output.ir.entity("Post").unwrap();
        let names: Vec<_> = post.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["id", "title", "userId", "createdAt", "updatedAt", "deletedAt"]
        );
    }

    #[test]
    fn test_compile_is_deterministic() {
        let m = manifest(BLOG);
        let a = compile(&m).unwrap();
        let b = compile(&m).unwrap();
        let tables_a: Vec<_> = a.ir.entities.iter().map(|e| e.table.clone()).collect();
        let tables_b: Vec<_> = b.ir.entities.iter().map(|e| e.table.clone()).collect();
        assert_eq!(tables_a, tables_b);
        assert_eq!(a.warnings.len(), b.warnings.len());
    }

    #[test]
    fn test_invalid_manifest_refused() {
        let err = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "blog_post"
            [entities.fields.title]
            type = "text"
            "#,
        ))
        .unwrap_err();

        assert!(err.to_string().contains("INVALID_ENTITY_NAME"));
    }

    #[test]
    fn test_protected_without_auth_refused() {
        let err = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Account"
            protected = "all"
            [entities.fields.alias]
            type = "text"
            "#,
        ))
        .unwrap_err();

        assert!(err.to_string().contains("AUTH_REQUIRED_FOR_PROTECTED"));
    }

    #[test]
    fn test_has_one_injects_foreign_key_from_relation_name() {
        let output = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "User"
            [entities.fields.email]
            type = "text"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            [entities.relations.author]
            type = "hasOne"
            entity = "User"
            "#,
        ))
        .unwrap();

        let post = output.ir.entity("Post").unwrap();
        let fk = post.fields.iter().find(|f| f.name == "authorId").unwrap();
        assert_eq!(fk.column, "author_id");
        assert_eq!(post.relations[0].key, "authorId");
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_optional_has_one_yields_nullable_foreign_key() {
        let output = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Team"
            [entities.fields.label]
            type = "text"

            [[entities]]
            name = "Player"
            [entities.fields.alias]
            type = "text"
            [entities.relations.team]
            type = "hasOne"
            entity = "Team"
            required = false
            "#,
        ))
        .unwrap();

        let player = output.ir.entity("Player").unwrap();
        let fk = player.fields.iter().find(|f| f.name == "teamId").unwrap();
        assert!(!fk.required);
    }

    #[test]
    fn test_belongs_to_many_is_canonical_from_either_side() {
        let declared_on_post = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            [entities.relations.tags]
            type = "belongsToMany"
            entity = "Tag"

            [[entities]]
            name = "Tag"
            [entities.fields.label]
            type = "text"
            "#,
        ))
        .unwrap();

        let declared_on_tag = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"

            [[entities]]
            name = "Tag"
            [entities.fields.label]
            type = "text"
            [entities.relations.posts]
            type = "belongsToMany"
            entity = "Post"
            "#,
        ))
        .unwrap();

        let a = &declared_on_post.ir.joins[0];
        let b = &declared_on_tag.ir.joins[0];
        assert_eq!(a.name, "PostTag");
        assert_eq!(a.name, b.name);
        assert_eq!(a.table, b.table);
        assert_eq!(a.left, b.left);
        assert_eq!(a.right, b.right);
        assert_eq!(a.left.entity, "Post");
        assert_eq!(a.left.field, "postId");
        assert_eq!(a.right.column, "tag_id");
    }

    #[test]
    fn test_belongs_to_many_declared_on_both_sides_synthesizes_once() {
        let output = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            [entities.relations.tags]
            type = "belongsToMany"
            entity = "Tag"

            [[entities]]
            name = "Tag"
            [entities.fields.label]
            type = "text"
            [entities.relations.posts]
            type = "belongsToMany"
            entity = "Post"
            "#,
        ))
        .unwrap();

        assert_eq!(output.ir.joins.len(), 1);
        // Each side still gets its own accessor.
        assert_eq!(output.ir.entity("Post").unwrap().relations[0].accessor, "tags");
        assert_eq!(output.ir.entity("Tag").unwrap().relations[0].accessor, "posts");
    }

    #[test]
    fn test_pivot_fields_carried_onto_join() {
        let output = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            [entities.relations.tags]
            type = "belongsToMany"
            entity = "Tag"
            [entities.relations.tags.pivot.sortOrder]
            type = "number"
            integer = true

            [[entities]]
            name = "Tag"
            [entities.fields.label]
            type = "text"
            "#,
        ))
        .unwrap();

        let join = output.ir.join("PostTag").unwrap();
        assert_eq!(join.fields.len(), 1);
        assert_eq!(join.fields[0].name, "sortOrder");
        assert_eq!(join.fields[0].column, "sort_order");
        assert!(join.fields[0].constraints.integer);
    }

    #[test]
    fn test_headless_ir_has_no_database() {
        let output = compile(&manifest(
            r#"
            [mode]
            type = "headless"

            [database]
            type = "sqlite"
            file = "./app.db"

            [[entities]]
            name = "Post"
            [entities.fields.title]
            type = "text"
            "#,
        ))
        .unwrap();

        assert!(output.ir.database.is_none());
        assert_eq!(output.ir.mode, Mode::Headless { include: None });
    }

    #[test]
    fn test_protected_entities_resolve_access() {
        let output = compile(&manifest(
            r#"
            [database]
            type = "sqlite"
            file = "./app.db"

            [auth]
            enabled = true
            provider = "jwt"

            [[entities]]
            name = "Account"
            protected = "write"
            [entities.fields.alias]
            type = "text"

            [[entities]]
            name = "Page"
            protected = "none"
            [entities.fields.title]
            type = "text"

            [[entities]]
            name = "Note"
            [entities.fields.body]
            type = "text"
            "#,
        ))
        .unwrap();

        assert_eq!(output.ir.entity("Account").unwrap().access, Access::Write);
        assert_eq!(output.ir.entity("Page").unwrap().access, Access::Public);
        // Unspecified under enabled auth defaults to fully protected.
        assert_eq!(output.ir.entity("Note").unwrap().access, Access::All);
    }

    #[test]
    fn test_custom_irregulars_flow_into_tables() {
        let naming = naming_with_irregulars([("schema", "schemata")]);
        let output = compile_with_naming(
            &manifest(
                r#"
                [database]
                type = "sqlite"
                file = "./app.db"

                [[entities]]
                name = "Schema"
                [entities.fields.title]
                type = "text"
                "#,
            ),
            naming,
        )
        .unwrap();

        assert_eq!(output.ir.entities[0].table, "schemata");
    }
}
