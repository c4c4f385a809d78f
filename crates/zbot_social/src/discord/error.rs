//! Discord-specific error types.

use zbot_error::DatabaseError;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity API error (HTTP error, missing access, rate limit).
    #[display("Serenity API error: {_0}")]
    SerenityError(String),

    /// Database operation failed.
    #[display("Database error: {_0}")]
    DatabaseError(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    /// The kind of error that occurred
    pub kind: DiscordErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        Self::new(DiscordErrorKind::SerenityError(err.to_string()))
    }
}

impl From<DatabaseError> for DiscordError {
    #[track_caller]
    fn from(err: DatabaseError) -> Self {
        Self::new(DiscordErrorKind::DatabaseError(err.to_string()))
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;
