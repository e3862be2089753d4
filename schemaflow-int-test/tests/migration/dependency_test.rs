use schemaflow::common::FIRST_MIGRATION;
use schemaflow::errors::ErrorKind;
use schemaflow::migration::{swappable_dependency, Migration, MigrationDefinition, MigrationKey};
use schemaflow_int_test::test_util::{CreateTable, ProjectState, RecordingEditor};

#[test]
fn test_swappable_dependency_model_reference() {
    let dependency = swappable_dependency("myapp.User").expect("Failed to build dependency");
    assert_eq!(dependency, MigrationKey::new("myapp", "__first__"));
}

#[test]
fn test_swappable_dependency_uses_first_segment_only() {
    let dependency = swappable_dependency("a.b.c").expect("Failed to build dependency");
    assert_eq!(dependency.app_label(), "a");
    assert_eq!(dependency.name(), FIRST_MIGRATION);
}

#[test]
fn test_swappable_dependency_rejects_bare_name() {
    let error = swappable_dependency("User").unwrap_err();
    assert_eq!(error.kind(), &ErrorKind::InvalidDependency);
}

#[test]
fn test_swappable_dependency_in_definition() {
    let definition = MigrationDefinition::new()
        .depends_on_key(swappable_dependency("accounts.Member").unwrap())
        .depends_on("blog", "0001_initial")
        .operation(CreateTable::new("membership"));
    let migration: Migration<ProjectState, RecordingEditor> =
        Migration::new("0002_membership", "blog", &definition);

    let first = &migration.dependencies()[0];
    assert!(first.is_first());
    assert_eq!(first.to_string(), "accounts.__first__");
    assert!(!migration.dependencies()[1].is_first());
}

#[test]
fn test_run_before_and_replaces_are_kept() {
    let definition: MigrationDefinition<ProjectState, RecordingEditor> = MigrationDefinition::new()
        .run_before("shop", "0001_initial")
        .replaces("blog", "0001_initial")
        .replaces("blog", "0002_post");
    let migration = Migration::new("0001_squashed_0002", "blog", &definition);

    assert_eq!(migration.run_before(), &[MigrationKey::new("shop", "0001_initial")]);
    assert_eq!(
        migration.replaces(),
        &[
            MigrationKey::new("blog", "0001_initial"),
            MigrationKey::new("blog", "0002_post"),
        ]
    );
}
