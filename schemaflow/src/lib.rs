//! # schemaflow - Migration Application Engine
//!
//! schemaflow applies schema migrations: given a migration's ordered list of
//! operations, it computes the resulting logical schema state and drives a
//! database editor (or an SQL collector) through the same operations,
//! forwards or in reverse.
//!
//! ## Key Features
//!
//! - **State threading**: every operation sees an untouched "before" snapshot
//!   and a freshly cloned "after" snapshot
//! - **Reversal**: migrations are undone last-operation-first, after checking
//!   that every operation is reversible
//! - **SQL collection**: operations without an SQL form become comments when
//!   collecting SQL text instead of changing a database
//! - **Pluggable collaborators**: schema state, operations and the editor are
//!   supplied by the caller through plain traits
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schemaflow::migration::{Migration, MigrationDefinition, MigrationExecutor};
//!
//! let initial = MigrationDefinition::new()
//!     .operation(CreateTable::new("post"))
//!     .operation(AddColumn::new("post", "title"));
//! let plan = vec![Migration::new("0001_initial", "blog", &initial)];
//!
//! let executor = MigrationExecutor::builder().build()?;
//! let state = executor.apply_plan(&plan, ProjectState::default(), &mut editor)?;
//! let state = executor.unapply_plan(&plan, ProjectState::default(), &mut editor)?;
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Shared constants and utilities
//! - [`errors`] - Error types and result definitions
//! - [`executor_builder`] - Builder for migration executors
//! - [`executor_config`] - Executor configuration
//! - [`migration`] - Migration units, operation traits and the executor

pub mod common;
pub mod errors;
pub mod executor_builder;
pub mod executor_config;
pub mod migration;
