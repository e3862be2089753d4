use crate::errors::{SchemaflowError, SchemaflowResult};
use crate::executor_config::ExecutorConfig;
use crate::migration::MigrationExecutor;

/// Builder for creating and configuring a [`MigrationExecutor`].
///
/// Errors raised while configuring are captured and reported by
/// [`build`](ExecutorBuilder::build), so the chain itself never fails.
///
/// # Examples
///
/// ```rust
/// use schemaflow::migration::MigrationExecutor;
///
/// let executor = MigrationExecutor::builder()
///     .collect_sql(true)
///     .build()
///     .unwrap();
/// assert!(executor.config().collect_sql());
/// ```
#[derive(Default)]
pub struct ExecutorBuilder {
    error: Option<SchemaflowError>,
    executor_config: ExecutorConfig,
}

impl ExecutorBuilder {
    /// Creates a new `ExecutorBuilder` with default configuration.
    ///
    /// By default plans run against the live database (no SQL collection).
    pub fn new() -> Self {
        ExecutorBuilder {
            error: None,
            executor_config: ExecutorConfig::new(),
        }
    }

    /// Starts from an existing configuration instead of the defaults.
    pub fn with_config(executor_config: ExecutorConfig) -> Self {
        ExecutorBuilder {
            error: None,
            executor_config,
        }
    }

    /// Selects SQL-collection mode: operations that cannot be written as SQL
    /// are replaced by comments in the editor's buffer.
    pub fn collect_sql(mut self, collect_sql: bool) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.executor_config.set_collect_sql(collect_sql) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Builds the executor, freezing its configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error captured while configuring.
    pub fn build(self) -> SchemaflowResult<MigrationExecutor> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(MigrationExecutor::new(self.executor_config))
    }
}
