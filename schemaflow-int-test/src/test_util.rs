//! In-memory collaborators for exercising the migration engine: a table and
//! column schema state, an editor that records the SQL it is given, and a
//! handful of concrete operations.

use indexmap::IndexMap;
use schemaflow::errors::{ErrorKind, SchemaflowError, SchemaflowResult};
use schemaflow::migration::{Operation, SchemaEditor};

/// Logical schema: tables keyed by `app_table`, in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectState {
    tables: IndexMap<String, Vec<String>>,
    notes: Vec<String>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_table(&self, app_label: &str, table: &str) -> bool {
        self.tables.contains_key(&db_table(app_label, table))
    }

    pub fn columns(&self, app_label: &str, table: &str) -> Option<&[String]> {
        self.tables.get(&db_table(app_label, table)).map(|c| c.as_slice())
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(|k| k.as_str()).collect()
    }

    /// Notes left by [`RunCode`] operations.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    fn create_table(&mut self, name: String) -> SchemaflowResult<()> {
        if self.tables.contains_key(&name) {
            return Err(SchemaflowError::new(
                &format!("Table {} already exists", name),
                ErrorKind::StateError,
            ));
        }
        self.tables.insert(name, Vec::new());
        Ok(())
    }

    fn table_mut(&mut self, name: &str) -> SchemaflowResult<&mut Vec<String>> {
        self.tables.get_mut(name).ok_or_else(|| {
            SchemaflowError::new(&format!("Table {} does not exist", name), ErrorKind::StateError)
        })
    }
}

fn db_table(app_label: &str, table: &str) -> String {
    format!("{}_{}", app_label, table)
}

/// Editor that executes nothing and remembers every statement instead.
///
/// In collecting mode statements go to the SQL buffer, otherwise to the
/// executed log. A statement can be set up to fail to simulate a backend
/// error.
#[derive(Debug, Default)]
pub struct RecordingEditor {
    collecting: bool,
    executed: Vec<String>,
    collected_sql: Vec<String>,
    fail_on: Option<String>,
}

impl RecordingEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collecting() -> Self {
        RecordingEditor {
            collecting: true,
            ..Default::default()
        }
    }

    pub fn failing_on(statement: &str) -> Self {
        RecordingEditor {
            fail_on: Some(statement.to_string()),
            ..Default::default()
        }
    }

    pub fn execute(&mut self, statement: String) -> SchemaflowResult<()> {
        if self.fail_on.as_deref() == Some(statement.as_str()) {
            log::error!("Statement failed: {}", statement);
            return Err(SchemaflowError::new(
                &format!("Failed to execute {}", statement),
                ErrorKind::BackendError,
            ));
        }

        if self.collecting {
            self.collected_sql.push(statement);
        } else {
            self.executed.push(statement);
        }
        Ok(())
    }

    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl SchemaEditor for RecordingEditor {
    fn collected_sql(&self) -> &[String] {
        &self.collected_sql
    }

    fn collect_sql(&mut self, line: String) {
        self.collected_sql.push(line);
    }
}

pub struct CreateTable {
    table: String,
}

impl CreateTable {
    pub fn new(table: &str) -> Self {
        CreateTable { table: table.to_string() }
    }
}

impl Operation<ProjectState, RecordingEditor> for CreateTable {
    fn state_forwards(&self, app_label: &str, state: &mut ProjectState) -> SchemaflowResult<()> {
        state.create_table(db_table(app_label, &self.table))
    }

    fn database_forwards(
        &self,
        app_label: &str,
        editor: &mut RecordingEditor,
        _from_state: &ProjectState,
        to_state: &ProjectState,
    ) -> SchemaflowResult<()> {
        let columns = to_state.columns(app_label, &self.table).unwrap_or_default().join(", ");
        editor.execute(format!("CREATE TABLE {} ({});", db_table(app_label, &self.table), columns))
    }

    fn database_backwards(
        &self,
        app_label: &str,
        editor: &mut RecordingEditor,
        _from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> SchemaflowResult<()> {
        editor.execute(format!("DROP TABLE {};", db_table(app_label, &self.table)))
    }

    fn describe(&self) -> String {
        format!("Create table {}", self.table)
    }
}

pub struct AddColumn {
    table: String,
    column: String,
}

impl AddColumn {
    pub fn new(table: &str, column: &str) -> Self {
        AddColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

impl Operation<ProjectState, RecordingEditor> for AddColumn {
    fn state_forwards(&self, app_label: &str, state: &mut ProjectState) -> SchemaflowResult<()> {
        state.table_mut(&db_table(app_label, &self.table))?.push(self.column.clone());
        Ok(())
    }

    fn database_forwards(
        &self,
        app_label: &str,
        editor: &mut RecordingEditor,
        _from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> SchemaflowResult<()> {
        editor.execute(format!(
            "ALTER TABLE {} ADD COLUMN {};",
            db_table(app_label, &self.table),
            self.column
        ))
    }

    fn database_backwards(
        &self,
        app_label: &str,
        editor: &mut RecordingEditor,
        _from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> SchemaflowResult<()> {
        editor.execute(format!(
            "ALTER TABLE {} DROP COLUMN {};",
            db_table(app_label, &self.table),
            self.column
        ))
    }

    fn describe(&self) -> String {
        format!("Add column {} to {}", self.column, self.table)
    }
}

/// Application code run during a migration; it has no SQL form.
pub struct RunCode {
    description: String,
    reversible: bool,
}

impl RunCode {
    pub fn new(description: &str) -> Self {
        RunCode {
            description: description.to_string(),
            reversible: true,
        }
    }

    pub fn irreversible(description: &str) -> Self {
        RunCode {
            description: description.to_string(),
            reversible: false,
        }
    }
}

impl Operation<ProjectState, RecordingEditor> for RunCode {
    fn state_forwards(&self, _app_label: &str, state: &mut ProjectState) -> SchemaflowResult<()> {
        state.notes.push(self.description.clone());
        Ok(())
    }

    fn database_forwards(
        &self,
        _app_label: &str,
        editor: &mut RecordingEditor,
        _from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> SchemaflowResult<()> {
        editor.execute(format!("RUN {}", self.description))
    }

    fn database_backwards(
        &self,
        _app_label: &str,
        editor: &mut RecordingEditor,
        _from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> SchemaflowResult<()> {
        editor.execute(format!("UNDO {}", self.description))
    }

    fn reversible(&self) -> bool {
        self.reversible
    }

    fn reduces_to_sql(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// Raw SQL with an optional reverse statement.
pub struct RunSql {
    sql: String,
    reverse_sql: Option<String>,
}

impl RunSql {
    pub fn new(sql: &str, reverse_sql: Option<&str>) -> Self {
        RunSql {
            sql: sql.to_string(),
            reverse_sql: reverse_sql.map(|s| s.to_string()),
        }
    }
}

impl Operation<ProjectState, RecordingEditor> for RunSql {
    fn state_forwards(&self, _app_label: &str, _state: &mut ProjectState) -> SchemaflowResult<()> {
        Ok(())
    }

    fn database_forwards(
        &self,
        _app_label: &str,
        editor: &mut RecordingEditor,
        _from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> SchemaflowResult<()> {
        editor.execute(self.sql.clone())
    }

    fn database_backwards(
        &self,
        _app_label: &str,
        editor: &mut RecordingEditor,
        _from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> SchemaflowResult<()> {
        match &self.reverse_sql {
            Some(sql) => editor.execute(sql.clone()),
            None => Err(SchemaflowError::new(
                "Raw SQL has no reverse statement",
                ErrorKind::InvalidOperation,
            )),
        }
    }

    fn reversible(&self) -> bool {
        self.reverse_sql.is_some()
    }

    fn describe(&self) -> String {
        "Raw SQL operation".to_string()
    }
}
