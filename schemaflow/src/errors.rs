use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for schemaflow operations
///
/// The engine itself raises only [`ErrorKind::IrreversibleOperation`] (and
/// [`ErrorKind::InvalidDependency`] / [`ErrorKind::InvalidOperation`] for
/// helper and configuration misuse). The remaining kinds exist so that
/// operation and editor implementations can report their own failures
/// through the same type; the engine propagates those unchanged.
///
/// # Examples
///
/// ```rust,ignore
/// use schemaflow::errors::{SchemaflowError, ErrorKind, SchemaflowResult};
///
/// fn example() -> SchemaflowResult<()> {
///     Err(SchemaflowError::new("Table already exists", ErrorKind::StateError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Reversal Errors - raised by the reverse application engine
    /// An operation of the unit being reversed cannot compute its own undo
    IrreversibleOperation {
        /// Description of the offending operation
        operation: String,
        /// Identity of the owning migration, as `app_label.name`
        migration: String,
    },

    // Dependency Errors - raised by the dependency helpers
    /// A dependency reference could not be turned into a dependency edge
    InvalidDependency,

    // Operation Errors - raised for invalid configuration use
    /// The operation is not valid in the current context
    InvalidOperation,

    // Collaborator Errors - available to operation and editor implementations
    /// Schema state could not be projected
    StateError,
    /// The database editing backend failed
    BackendError,

    // Extension Errors - allows collaborators to plug in their own categories
    // The String contains the extension name/category (e.g., "postgres", "sqlite")
    /// Error from an extension module
    Extension(String),

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::IrreversibleOperation { .. } => write!(f, "Irreversible operation"),
            ErrorKind::InvalidDependency => write!(f, "Invalid dependency"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::StateError => write!(f, "State error"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::Extension(name) => write!(f, "{} error", name),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom schemaflow error type.
///
/// `SchemaflowError` encapsulates the error message, kind, and optional cause.
/// It supports error chaining and carries the backtrace captured at creation.
///
/// # Examples
///
/// ```rust,ignore
/// use schemaflow::errors::{SchemaflowError, ErrorKind};
///
/// let err = SchemaflowError::new("Table not found", ErrorKind::StateError);
///
/// let cause = SchemaflowError::new("Connection reset", ErrorKind::BackendError);
/// let err =
///     SchemaflowError::new_with_cause("Create table failed", ErrorKind::BackendError, cause);
/// ```
#[derive(Clone)]
pub struct SchemaflowError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<SchemaflowError>>,
    backtrace: Atomic<Backtrace>,
}

impl SchemaflowError {
    /// Creates a new `SchemaflowError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        SchemaflowError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `SchemaflowError` with a cause error.
    ///
    /// The cause is preserved and reported through [`Error::source`].
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: SchemaflowError) -> Self {
        SchemaflowError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates the error raised when a migration cannot be reversed because
    /// one of its operations is not reversible.
    pub fn irreversible(operation: &str, migration: &str) -> Self {
        SchemaflowError::new(
            &format!("Operation {} in {} is not reversible", operation, migration),
            ErrorKind::IrreversibleOperation {
                operation: operation.to_string(),
                migration: migration.to_string(),
            },
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&SchemaflowError> {
        self.cause.as_deref()
    }

    /// Returns `true` if this error reports an irreversible operation.
    pub fn is_irreversible(&self) -> bool {
        matches!(self.error_kind, ErrorKind::IrreversibleOperation { .. })
    }
}

impl Display for SchemaflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for SchemaflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for SchemaflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for schemaflow operations.
///
/// `SchemaflowResult<T>` is shorthand for `Result<T, SchemaflowError>`. The
/// [`Operation`](crate::migration::Operation) trait returns it too, so
/// collaborator failures flow through the engine with `?` untouched.
pub type SchemaflowResult<T> = Result<T, SchemaflowError>;
