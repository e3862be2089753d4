use schemaflow::migration::{Migration, MigrationDefinition, MigrationExecutor, SchemaEditor};
use schemaflow_int_test::test_util::{
    AddColumn, CreateTable, ProjectState, RecordingEditor, RunCode,
};

type BlogMigration = Migration<ProjectState, RecordingEditor>;

fn blog_plan() -> Vec<BlogMigration> {
    let initial = MigrationDefinition::new()
        .operation(CreateTable::new("post"))
        .operation(AddColumn::new("post", "title"));
    let comments = MigrationDefinition::new()
        .depends_on("blog", "0001_initial")
        .operation(CreateTable::new("comment"))
        .operation(RunCode::new("copy legacy comments"))
        .operation(AddColumn::new("comment", "body"));

    vec![
        Migration::new("0001_initial", "blog", &initial),
        Migration::new("0002_comment", "blog", &comments),
    ]
}

#[test]
fn test_apply_plan_and_back() {
    let executor = MigrationExecutor::builder().build().expect("Failed to build executor");
    let plan = blog_plan();
    let mut editor = RecordingEditor::new();

    let after = executor
        .apply_plan(&plan, ProjectState::new(), &mut editor)
        .expect("Failed to apply plan");
    assert_eq!(after, executor.plan_state(&plan, &ProjectState::new()).unwrap());
    assert_eq!(after.table_names(), vec!["blog_post", "blog_comment"]);

    let before = executor
        .unapply_plan(&plan, ProjectState::new(), &mut editor)
        .expect("Failed to unapply plan");
    assert_eq!(before, ProjectState::new());

    assert_eq!(
        editor.executed(),
        &[
            "CREATE TABLE blog_post ();".to_string(),
            "ALTER TABLE blog_post ADD COLUMN title;".to_string(),
            "CREATE TABLE blog_comment ();".to_string(),
            "RUN copy legacy comments".to_string(),
            "ALTER TABLE blog_comment ADD COLUMN body;".to_string(),
            "ALTER TABLE blog_comment DROP COLUMN body;".to_string(),
            "UNDO copy legacy comments".to_string(),
            "DROP TABLE blog_comment;".to_string(),
            "ALTER TABLE blog_post DROP COLUMN title;".to_string(),
            "DROP TABLE blog_post;".to_string(),
        ]
    );
}

#[test]
fn test_collect_sql_plan() {
    let executor = MigrationExecutor::builder()
        .collect_sql(true)
        .build()
        .expect("Failed to build executor");
    let plan = blog_plan();
    let mut editor = RecordingEditor::collecting();

    let state = executor
        .apply_plan(&plan, ProjectState::new(), &mut editor)
        .expect("Failed to collect SQL");

    assert!(state.notes().is_empty());
    assert!(editor.executed().is_empty());
    assert_eq!(editor.collected_sql().len(), 8);
    assert_eq!(editor.collected_sql()[5], "-- copy legacy comments");
}

#[test]
fn test_empty_plan_is_identity() {
    let executor = MigrationExecutor::builder().build().unwrap();
    let mut editor = RecordingEditor::new();
    let plan: Vec<BlogMigration> = Vec::new();

    let state = executor.apply_plan(&plan, ProjectState::new(), &mut editor).unwrap();
    assert_eq!(state, ProjectState::new());
    assert!(editor.executed().is_empty());
}
