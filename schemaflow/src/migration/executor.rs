use itertools::Itertools;

use super::migration::Migration;
use super::operation::SchemaEditor;
use crate::errors::SchemaflowResult;
use crate::executor_builder::ExecutorBuilder;
use crate::executor_config::ExecutorConfig;

/// Runs a caller-ordered plan of migrations against one editor.
///
/// The executor never reorders, filters or resolves migrations: the plan is
/// run exactly as given, one unit at a time, with the state returned by one
/// unit becoming the input of the next.
#[derive(Debug)]
pub struct MigrationExecutor {
    config: ExecutorConfig,
}

impl MigrationExecutor {
    /// Creates a builder for a new executor.
    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }

    pub(crate) fn new(config: ExecutorConfig) -> Self {
        config.initialize();
        MigrationExecutor { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Projects the state after the whole plan without touching a database.
    pub fn plan_state<S: Clone, E>(
        &self,
        plan: &[Migration<S, E>],
        state: &S,
    ) -> SchemaflowResult<S> {
        let mut state = state.clone();
        for migration in plan {
            state = migration.mutate_state(&state)?;
        }
        Ok(state)
    }

    /// Applies every migration of `plan` forwards, in order.
    ///
    /// `state` is the state before the first migration; the state after the
    /// last one is returned. Stops at the first error.
    pub fn apply_plan<S: Clone, E: SchemaEditor>(
        &self,
        plan: &[Migration<S, E>],
        state: S,
        editor: &mut E,
    ) -> SchemaflowResult<S> {
        log::info!("Applying plan [{}]", plan.iter().join(", "));

        let collect_sql = self.config.collect_sql();
        let mut state = state;
        for migration in plan {
            state = migration.apply(state, editor, collect_sql)?;
        }
        Ok(state)
    }

    /// Reverses every migration of `plan`, last first.
    ///
    /// `plan` lists the migrations in the order they were applied and `state`
    /// is the state before the first of them. The state each migration started
    /// from is recomputed by projection, then each migration is unapplied from
    /// it. Returns the state before the plan.
    ///
    /// A migration that cannot be reversed stops the walk; migrations later in
    /// the plan have already been unapplied by then.
    pub fn unapply_plan<S: Clone, E: SchemaEditor>(
        &self,
        plan: &[Migration<S, E>],
        state: S,
        editor: &mut E,
    ) -> SchemaflowResult<S> {
        log::info!("Unapplying plan [{}]", plan.iter().rev().join(", "));

        let Some((last, earlier)) = plan.split_last() else {
            return Ok(state);
        };

        let collect_sql = self.config.collect_sql();
        let mut pre_states = Vec::with_capacity(earlier.len());
        let mut current = state;
        for migration in earlier {
            let next = migration.mutate_state(&current)?;
            pre_states.push(std::mem::replace(&mut current, next));
        }

        let mut restored = last.unapply(current, editor, collect_sql)?;
        for (migration, pre_state) in earlier.iter().zip(pre_states).rev() {
            restored = migration.unapply(pre_state, editor, collect_sql)?;
        }
        Ok(restored)
    }
}
