//! Migration units and the engine that applies them.
//!
//! A [`Migration`] is an ordered batch of [`Operation`]s owned by one app,
//! together with its dependency edges. The engine threads a schema state
//! snapshot through the operations:
//!
//! - [`Migration::mutate_state`] folds the logical effect of every operation
//!   into a new snapshot without touching a database
//! - [`Migration::apply`] walks the operations forwards, handing each one its
//!   before and after snapshots together with the [`SchemaEditor`]
//! - [`Migration::unapply`] projects the chain forwards first, refuses to start
//!   if any operation is irreversible, then undoes the steps last-first
//!
//! In SQL-collection mode, operations that cannot be expressed as SQL are
//! replaced by a comment block in the editor's SQL buffer and otherwise
//! skipped.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemaflow::migration::{Migration, MigrationDefinition, swappable_dependency};
//!
//! let definition = MigrationDefinition::new()
//!     .depends_on_key(swappable_dependency("accounts.User")?)
//!     .operation(CreateTable::new("post"))
//!     .operation(AddColumn::new("post", "title"));
//!
//! let migration = Migration::new("0001_initial", "blog", &definition);
//! let state = migration.apply(ProjectState::default(), &mut editor, false)?;
//! ```
//!
//! Choosing which migrations to run, and in which order, is left to the
//! caller; [`MigrationExecutor`] only runs a plan it is given.

mod definition;
mod dependency;
mod executor;
mod migration;
mod operation;

pub use definition::MigrationDefinition;
pub use dependency::{swappable_dependency, MigrationKey};
pub use executor::MigrationExecutor;
pub use migration::Migration;
pub use operation::{Operation, SchemaEditor};
