use std::sync::Arc;

use super::dependency::MigrationKey;
use super::operation::Operation;

/// Immutable template a [`Migration`](super::Migration) is instantiated from.
///
/// A definition describes one migration file: its operations in order, and the
/// edges relating it to other migrations. Instances copy every list out of the
/// definition, so later edits to an instance never reach the template.
///
/// # Usage
/// ```ignore
/// let definition = MigrationDefinition::new()
///     .depends_on("blog", "0001_initial")
///     .depends_on_key(swappable_dependency("accounts.User")?)
///     .operation(CreateTable::new("comment"))
///     .operation(AddColumn::new("comment", "body"));
///
/// let migration = Migration::new("0002_comment", "blog", &definition);
/// ```
pub struct MigrationDefinition<S, E> {
    pub(crate) operations: Vec<Arc<dyn Operation<S, E>>>,
    pub(crate) dependencies: Vec<MigrationKey>,
    pub(crate) run_before: Vec<MigrationKey>,
    pub(crate) replaces: Vec<MigrationKey>,
}

impl<S, E> MigrationDefinition<S, E> {
    pub fn new() -> Self {
        MigrationDefinition {
            operations: Vec::new(),
            dependencies: Vec::new(),
            run_before: Vec::new(),
            replaces: Vec::new(),
        }
    }

    /// Appends an operation; operations run in the order they are added.
    pub fn operation(mut self, operation: impl Operation<S, E> + 'static) -> Self {
        self.operations.push(Arc::new(operation));
        self
    }

    /// Appends an already shared operation.
    pub fn shared_operation(mut self, operation: Arc<dyn Operation<S, E>>) -> Self {
        self.operations.push(operation);
        self
    }

    /// Declares a migration that must run before this one.
    pub fn depends_on(self, app_label: &str, name: &str) -> Self {
        self.depends_on_key(MigrationKey::new(app_label, name))
    }

    /// Declares a dependency from a prepared key, e.g. one produced by
    /// [`swappable_dependency`](super::swappable_dependency).
    pub fn depends_on_key(mut self, key: MigrationKey) -> Self {
        self.dependencies.push(key);
        self
    }

    /// Declares a migration that must run after this one.
    pub fn run_before(mut self, app_label: &str, name: &str) -> Self {
        self.run_before.push(MigrationKey::new(app_label, name));
        self
    }

    /// Declares a migration this one supersedes.
    pub fn replaces(mut self, app_label: &str, name: &str) -> Self {
        self.replaces.push(MigrationKey::new(app_label, name));
        self
    }

    pub fn operations(&self) -> &[Arc<dyn Operation<S, E>>] {
        &self.operations
    }

    pub fn dependencies(&self) -> &[MigrationKey] {
        &self.dependencies
    }
}

impl<S, E> Default for MigrationDefinition<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> Clone for MigrationDefinition<S, E> {
    fn clone(&self) -> Self {
        MigrationDefinition {
            operations: self.operations.clone(),
            dependencies: self.dependencies.clone(),
            run_before: self.run_before.clone(),
            replaces: self.replaces.clone(),
        }
    }
}
