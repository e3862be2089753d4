//! Configuration management for migration executors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{ErrorKind, SchemaflowError, SchemaflowResult};

/// Public interface for executor configuration.
///
/// Clones share the same settings. Once an executor has been built from a
/// configuration, the configuration is frozen and setters fail.
///
/// # Examples
///
/// ```rust
/// use schemaflow::executor_config::ExecutorConfig;
///
/// let config = ExecutorConfig::new();
/// config.set_collect_sql(true).unwrap();
/// assert!(config.collect_sql());
/// ```
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    /// The pointer to implementation. Uses Arc for cheap cloning and thread safety.
    inner: Arc<ExecutorConfigInner>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutorConfig {
    /// Creates a new configuration instance with default values.
    pub fn new() -> Self {
        ExecutorConfig {
            inner: Arc::new(ExecutorConfigInner::new()),
        }
    }

    /// Returns `true` if plans run in SQL-collection mode.
    pub fn collect_sql(&self) -> bool {
        self.inner.collect_sql()
    }

    /// Enables or disables SQL-collection mode.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is already in use by an executor.
    pub fn set_collect_sql(&self, collect_sql: bool) -> SchemaflowResult<()> {
        self.inner.set_collect_sql(collect_sql)
    }

    /// Returns `true` once an executor has been built from this configuration.
    pub fn is_configured(&self) -> bool {
        self.inner.configured.load(Ordering::Relaxed)
    }

    /// Freezes the configuration. Called when an executor takes ownership.
    pub(crate) fn initialize(&self) {
        self.inner.configured.store(true, Ordering::Relaxed);
    }
}

/// Private implementation of executor configuration.
#[derive(Debug)]
struct ExecutorConfigInner {
    /// Indicates whether this configuration has been handed to an executor
    configured: AtomicBool,
    /// Record SQL text instead of changing a live database
    collect_sql: AtomicBool,
}

impl ExecutorConfigInner {
    fn new() -> Self {
        ExecutorConfigInner {
            configured: AtomicBool::from(false),
            collect_sql: AtomicBool::from(false),
        }
    }

    fn collect_sql(&self) -> bool {
        self.collect_sql.load(Ordering::Relaxed)
    }

    fn set_collect_sql(&self, collect_sql: bool) -> SchemaflowResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("SQL collection mode cannot be changed after initialization");
            return Err(SchemaflowError::new(
                "SQL collection mode cannot be changed after initialization",
                ErrorKind::InvalidOperation,
            ));
        }
        self.collect_sql.store(collect_sql, Ordering::Relaxed);
        Ok(())
    }
}
