use crate::common::{NON_SQL_OPERATION_NOTICE, SQL_COMMENT_SEPARATOR};
use crate::errors::SchemaflowResult;

/// Database editing backend a migration is applied against.
///
/// Physical changes are made by the operations themselves through
/// [`Operation::database_forwards`] and [`Operation::database_backwards`]; the
/// engine only needs the editor's SQL buffer, which it appends comment lines
/// to when an operation is skipped in SQL-collection mode.
pub trait SchemaEditor {
    /// Returns the SQL collected so far, in the order it was appended.
    fn collected_sql(&self) -> &[String];

    /// Appends a line to the collected SQL buffer.
    fn collect_sql(&mut self, line: String);
}

/// One schema change step of a migration.
///
/// `S` is the schema state snapshot and `E` the database editor. The engine
/// always hands `state_forwards` a fresh clone it owns, and hands the database
/// methods frozen snapshots it will not mutate again.
///
/// # Usage
///
/// ```ignore
/// struct CreateTable { table: String }
///
/// impl Operation<TableState, SqlEditor> for CreateTable {
///     fn state_forwards(&self, _app_label: &str, state: &mut TableState) -> SchemaflowResult<()> {
///         state.create_table(&self.table)
///     }
///
///     fn database_forwards(&self, _app_label: &str, editor: &mut SqlEditor,
///                          _from: &TableState, _to: &TableState) -> SchemaflowResult<()> {
///         editor.execute(format!("CREATE TABLE {}", self.table))
///     }
///
///     fn database_backwards(&self, _app_label: &str, editor: &mut SqlEditor,
///                           _from: &TableState, _to: &TableState) -> SchemaflowResult<()> {
///         editor.execute(format!("DROP TABLE {}", self.table))
///     }
///
///     fn describe(&self) -> String {
///         format!("Create table {}", self.table)
///     }
/// }
/// ```
pub trait Operation<S, E>: Send + Sync {
    /// Applies the logical effect of this operation to `state` in place.
    fn state_forwards(&self, app_label: &str, state: &mut S) -> SchemaflowResult<()>;

    /// Performs the physical change moving the database from `from_state` to
    /// `to_state`.
    fn database_forwards(
        &self,
        app_label: &str,
        editor: &mut E,
        from_state: &S,
        to_state: &S,
    ) -> SchemaflowResult<()>;

    /// Undoes the physical change. `from_state` is the later snapshot (after
    /// this operation) and `to_state` the earlier one.
    fn database_backwards(
        &self,
        app_label: &str,
        editor: &mut E,
        from_state: &S,
        to_state: &S,
    ) -> SchemaflowResult<()>;

    /// Whether [`database_backwards`](Operation::database_backwards) can undo
    /// this operation.
    fn reversible(&self) -> bool {
        true
    }

    /// Whether this operation can be expressed as SQL text.
    fn reduces_to_sql(&self) -> bool {
        true
    }

    /// Human readable description, used in SQL comments and error messages.
    fn describe(&self) -> String;
}

/// Writes the comment block that stands in for an operation without an SQL
/// representation.
pub(crate) fn collect_non_sql_notice<E: SchemaEditor>(editor: &mut E, description: &str) {
    editor.collect_sql(SQL_COMMENT_SEPARATOR.to_string());
    editor.collect_sql(NON_SQL_OPERATION_NOTICE.to_string());
    editor.collect_sql(format!("{} {}", SQL_COMMENT_SEPARATOR, description));
    editor.collect_sql(SQL_COMMENT_SEPARATOR.to_string());
}
