//! Database error types.

/// Database error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// Liveness probe or client construction failed
    #[display("Database connection error: {}", _0)]
    Connection(String),
    /// Repositories were requested before a successful connection
    #[display("Database is not connected")]
    NotConnected,
    /// Query or mutation failed after the connection was established
    #[display("Database query error: {}", _0)]
    Query(String),
    /// BSON serialization/deserialization error
    #[display("Serialization error: {}", _0)]
    Serialization(String),
    /// A document is missing a field the caller relies on
    #[display("Document is missing field '{}'", _0)]
    MissingField(String),
}

/// Database error with source location tracking.
///
/// # Examples
///
/// ```
/// use zbot_error::{DatabaseError, DatabaseErrorKind};
///
/// let err = DatabaseError::new(DatabaseErrorKind::NotConnected);
/// assert!(format!("{}", err).contains("not connected"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    /// The kind of error that occurred
    pub kind: DatabaseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DatabaseError {
    /// Create a new DatabaseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DatabaseErrorKind {
        &self.kind
    }
}

// Driver error conversions (only available with database feature)
#[cfg(feature = "database")]
impl From<mongodb::error::Error> for DatabaseError {
    #[track_caller]
    fn from(err: mongodb::error::Error) -> Self {
        DatabaseError::new(DatabaseErrorKind::Query(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<bson::ser::Error> for DatabaseError {
    #[track_caller]
    fn from(err: bson::ser::Error) -> Self {
        DatabaseError::new(DatabaseErrorKind::Serialization(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<bson::de::Error> for DatabaseError {
    #[track_caller]
    fn from(err: bson::de::Error) -> Self {
        DatabaseError::new(DatabaseErrorKind::Serialization(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<bson::document::ValueAccessError> for DatabaseError {
    #[track_caller]
    fn from(err: bson::document::ValueAccessError) -> Self {
        DatabaseError::new(DatabaseErrorKind::Serialization(err.to_string()))
    }
}
