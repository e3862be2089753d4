use std::fmt::{Display, Formatter};

use crate::common::{DEPENDENCY_SEPARATOR, FIRST_MIGRATION};
use crate::errors::{ErrorKind, SchemaflowError, SchemaflowResult};

/// Identity of a migration: the owning app label plus the migration name.
///
/// Used for dependency, run-before and replaces edges. Renders as
/// `app_label.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MigrationKey {
    app_label: String,
    name: String,
}

impl MigrationKey {
    pub fn new(app_label: &str, name: &str) -> Self {
        MigrationKey {
            app_label: app_label.to_string(),
            name: name.to_string(),
        }
    }

    pub fn app_label(&self) -> &str {
        &self.app_label
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this edge points at the first migration of its app
    /// rather than a concrete migration.
    pub fn is_first(&self) -> bool {
        self.name == FIRST_MIGRATION
    }
}

impl Display for MigrationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.app_label, self.name)
    }
}

impl From<(&str, &str)> for MigrationKey {
    fn from((app_label, name): (&str, &str)) -> Self {
        MigrationKey::new(app_label, name)
    }
}

/// Turns a swappable setting value such as `"accounts.User"` into a dependency
/// on the first migration of the referenced app.
///
/// Only the segment before the first separator is used, so `"a.b.c"` yields a
/// dependency on `a.__first__`.
///
/// # Errors
///
/// Returns `InvalidDependency` if `value` contains no separator.
///
/// # Examples
///
/// ```rust
/// use schemaflow::migration::swappable_dependency;
///
/// let dependency = swappable_dependency("accounts.User").unwrap();
/// assert_eq!(dependency.app_label(), "accounts");
/// assert_eq!(dependency.name(), "__first__");
/// ```
pub fn swappable_dependency(value: &str) -> SchemaflowResult<MigrationKey> {
    match value.split_once(DEPENDENCY_SEPARATOR) {
        Some((app_label, _)) => Ok(MigrationKey::new(app_label, FIRST_MIGRATION)),
        None => {
            log::error!("Swappable reference {} has no app label separator", value);
            Err(SchemaflowError::new(
                &format!("Swappable reference {} must be of the form app_label.Name", value),
                ErrorKind::InvalidDependency,
            ))
        }
    }
}
