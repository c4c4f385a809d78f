//! Top-level error wrapper types.

use crate::{ConfigError, DatabaseError};

/// Every error condition the data layer can surface.
///
/// # Examples
///
/// ```
/// use zbot_error::{ConfigError, ZbotError};
///
/// let err: ZbotError = ConfigError::new("missing host").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ZbotErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// zbot error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("zbot Error: {}", _0)]
pub struct ZbotError(Box<ZbotErrorKind>);

impl ZbotError {
    /// Create a new error from a kind.
    pub fn new(kind: ZbotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ZbotErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ZbotErrorKind
impl<T> From<T> for ZbotError
where
    T: Into<ZbotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for zbot operations.
pub type ZbotResult<T> = std::result::Result<T, ZbotError>;
