use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::definition::MigrationDefinition;
use super::dependency::MigrationKey;
use super::operation::{collect_non_sql_notice, Operation, SchemaEditor};
use crate::errors::{SchemaflowError, SchemaflowResult};

/// A named, ordered batch of operations belonging to one app.
///
/// # Characteristics
/// - Identity is `(app_label, name)`: equality and hashing ignore operations
///   and edges, so migrations can key maps and sets by identity alone
/// - Owns independent copies of the lists of the definition it was built from
/// - Renders as `app_label.name` for both `Display` and `Debug`
///
/// # State threading
/// Every transition clones the incoming state and mutates the clone, so each
/// operation sees an untouched "before" snapshot next to its "after" snapshot.
/// [`mutate_state`](Migration::mutate_state) projects state only,
/// [`apply`](Migration::apply) and [`unapply`](Migration::unapply) also drive
/// the editor.
pub struct Migration<S, E> {
    name: String,
    app_label: String,
    operations: Vec<Arc<dyn Operation<S, E>>>,
    dependencies: Vec<MigrationKey>,
    run_before: Vec<MigrationKey>,
    replaces: Vec<MigrationKey>,
}

/// One recorded forward step, replayed backwards by `unapply`.
struct UndoStep<S, E> {
    operation: Arc<dyn Operation<S, E>>,
    before: Arc<S>,
    after: Arc<S>,
}

impl<S, E> Migration<S, E> {
    /// Instantiates the migration `app_label.name` from a definition.
    ///
    /// The operation, dependency, run-before and replaces lists are copied, so
    /// the instance can be edited (for example by a graph builder rewriting
    /// dependencies) without affecting `definition`.
    pub fn new(name: &str, app_label: &str, definition: &MigrationDefinition<S, E>) -> Self {
        Migration {
            name: name.to_string(),
            app_label: app_label.to_string(),
            operations: definition.operations.clone(),
            dependencies: definition.dependencies.clone(),
            run_before: definition.run_before.clone(),
            replaces: definition.replaces.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn app_label(&self) -> &str {
        &self.app_label
    }

    /// Returns the `(app_label, name)` identity of this migration.
    pub fn key(&self) -> MigrationKey {
        MigrationKey::new(&self.app_label, &self.name)
    }

    pub fn operations(&self) -> &[Arc<dyn Operation<S, E>>] {
        &self.operations
    }

    pub fn dependencies(&self) -> &[MigrationKey] {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut Vec<MigrationKey> {
        &mut self.dependencies
    }

    pub fn run_before(&self) -> &[MigrationKey] {
        &self.run_before
    }

    pub fn run_before_mut(&mut self) -> &mut Vec<MigrationKey> {
        &mut self.run_before
    }

    pub fn replaces(&self) -> &[MigrationKey] {
        &self.replaces
    }

    pub fn replaces_mut(&mut self) -> &mut Vec<MigrationKey> {
        &mut self.replaces
    }
}

impl<S: Clone, E> Migration<S, E> {
    /// Returns a new state with every operation's logical effect applied.
    ///
    /// The input is cloned once and all operations mutate that one clone in
    /// order. The editor is not involved.
    pub fn mutate_state(&self, project_state: &S) -> SchemaflowResult<S> {
        let mut new_state = project_state.clone();
        for operation in &self.operations {
            operation.state_forwards(&self.app_label, &mut new_state)?;
        }
        Ok(new_state)
    }
}

impl<S: Clone, E: SchemaEditor> Migration<S, E> {
    /// Applies the migration forwards.
    ///
    /// `project_state` is the state before this migration. Each operation gets
    /// its own cloned "after" state, and the editor receives both snapshots.
    /// Returns the state after the migration, ready to be passed to the next
    /// one.
    ///
    /// With `collect_sql` set, operations that cannot be written as SQL are
    /// replaced by a comment block in the editor's SQL buffer and skipped:
    /// they neither change the state nor reach the editor.
    pub fn apply(
        &self,
        project_state: S,
        editor: &mut E,
        collect_sql: bool,
    ) -> SchemaflowResult<S> {
        log::info!("Applying migration {}", self);

        let mut project_state = project_state;
        for operation in &self.operations {
            if collect_sql && !operation.reduces_to_sql() {
                self.skip_non_sql(operation.as_ref(), editor);
                continue;
            }

            let mut new_state = project_state.clone();
            operation.state_forwards(&self.app_label, &mut new_state)?;

            log::debug!("Running {} forwards in {}", operation.describe(), self);
            operation.database_forwards(&self.app_label, editor, &project_state, &new_state)?;

            project_state = new_state;
        }

        log::info!("Applied migration {}", self);
        Ok(project_state)
    }

    /// Applies the migration in reverse.
    ///
    /// `project_state` is the state this migration's forward application
    /// started from, not the state [`apply`](Migration::apply) returned. The
    /// operations are projected on top of it to rebuild the forward chain, so
    /// passing the applied state would project them a second time. Use
    /// [`mutate_state`](Migration::mutate_state) on earlier migrations to
    /// recover it when only the later state is at hand.
    ///
    /// The forward chain of states is computed first; if any operation is irreversible the call
    /// fails before the editor sees a single backward step. The recorded steps
    /// are then undone last-first, each editor call receiving the later state
    /// first and the earlier state second.
    ///
    /// Returns the state the migration started from. Backward steps run one
    /// at a time without a surrounding transaction: if the editor fails
    /// midway, the steps already undone stay undone.
    ///
    /// # Errors
    ///
    /// Returns `IrreversibleOperation` if an operation cannot be reversed;
    /// errors from operations and the editor are returned as-is.
    pub fn unapply(
        &self,
        project_state: S,
        editor: &mut E,
        collect_sql: bool,
    ) -> SchemaflowResult<S> {
        log::info!("Unapplying migration {}", self);

        let initial_state = Arc::new(project_state);
        let to_run = self.undo_stack(Arc::clone(&initial_state), editor, collect_sql)?;

        for step in to_run.iter().rev() {
            log::debug!("Running {} backwards in {}", step.operation.describe(), self);
            step.operation
                .database_backwards(&self.app_label, editor, &step.after, &step.before)?;
        }
        drop(to_run);

        log::info!("Unapplied migration {}", self);
        Ok(Arc::try_unwrap(initial_state).unwrap_or_else(|shared| (*shared).clone()))
    }

    /// Projects the operations forward and records each reversible step with
    /// its before and after states.
    fn undo_stack(
        &self,
        initial_state: Arc<S>,
        editor: &mut E,
        collect_sql: bool,
    ) -> SchemaflowResult<Vec<UndoStep<S, E>>> {
        let mut to_run = Vec::with_capacity(self.operations.len());
        let mut project_state = initial_state;

        for operation in &self.operations {
            if collect_sql && !operation.reduces_to_sql() {
                self.skip_non_sql(operation.as_ref(), editor);
                continue;
            }

            if !operation.reversible() {
                let description = operation.describe();
                log::error!("Operation {} in {} is not reversible", description, self);
                return Err(SchemaflowError::irreversible(&description, &self.to_string()));
            }

            let mut new_state = (*project_state).clone();
            operation.state_forwards(&self.app_label, &mut new_state)?;
            let new_state = Arc::new(new_state);

            to_run.push(UndoStep {
                operation: Arc::clone(operation),
                before: project_state,
                after: Arc::clone(&new_state),
            });
            project_state = new_state;
        }

        Ok(to_run)
    }

    fn skip_non_sql(&self, operation: &dyn Operation<S, E>, editor: &mut E) {
        let description = operation.describe();
        log::warn!("Operation {} in {} cannot be written as SQL, skipping", description, self);
        collect_non_sql_notice(editor, &description);
    }
}

impl<S, E> Clone for Migration<S, E> {
    fn clone(&self) -> Self {
        Migration {
            name: self.name.clone(),
            app_label: self.app_label.clone(),
            operations: self.operations.clone(),
            dependencies: self.dependencies.clone(),
            run_before: self.run_before.clone(),
            replaces: self.replaces.clone(),
        }
    }
}

impl<S, E> PartialEq for Migration<S, E> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.app_label == other.app_label
    }
}

impl<S, E> Eq for Migration<S, E> {}

impl<S, E> Hash for Migration<S, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.app_label.hash(state);
        self.name.hash(state);
    }
}

impl<S, E> Display for Migration<S, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.app_label, self.name)
    }
}

impl<S, E> Debug for Migration<S, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.app_label, self.name)
    }
}
