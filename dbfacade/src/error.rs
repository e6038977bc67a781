//! Error module
use std::{borrow::Cow, fmt, io, num};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq)]
pub enum DatabaseConstraint {
    Index(String),
    CannotParse,
}

impl fmt::Display for DatabaseConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => index.fmt(f),
            Self::CannotParse => "(not available)".fmt(f),
        }
    }
}

#[derive(Debug, Error)]
/// The error types for database I/O, connection and statement construction.
pub struct Error {
    kind: ErrorKind,
    original_code: Option<String>,
    original_message: Option<String>,
}

pub(crate) struct ErrorBuilder {
    kind: ErrorKind,
    original_code: Option<String>,
    original_message: Option<String>,
}

impl ErrorBuilder {
    pub(crate) fn set_original_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.original_code = Some(code.into());
        self
    }

    pub(crate) fn set_original_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.original_message = Some(message.into());
        self
    }

    pub(crate) fn build(self) -> Error {
        Error {
            kind: self.kind,
            original_code: self.original_code,
            original_message: self.original_message,
        }
    }
}

impl Error {
    pub(crate) fn builder(kind: ErrorKind) -> ErrorBuilder {
        ErrorBuilder {
            kind,
            original_code: None,
            original_message: None,
        }
    }

    /// The error code sent by the database, if available.
    pub fn original_code(&self) -> Option<&str> {
        self.original_code.as_deref()
    }

    /// The original error message sent by the database, if available.
    pub fn original_message(&self) -> Option<&str> {
        self.original_message.as_deref()
    }

    /// A more specific error type for matching.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The session could not be established or was lost.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ConnectionError(_)
                | ErrorKind::AuthenticationFailed { .. }
                | ErrorKind::DatabaseAccessDenied { .. }
                | ErrorKind::ConnectTimeout(_)
                | ErrorKind::NotConnected
                | ErrorKind::DatabaseUrlIsInvalid(_)
                | ErrorKind::InvalidConnectionArguments(_)
                | ErrorKind::IoError(_)
        )
    }

    /// The database rejected or failed to execute a statement.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::QueryError(_)
                | ErrorKind::DatabaseDoesNotExist { .. }
                | ErrorKind::TableDoesNotExist { .. }
                | ErrorKind::ColumnNotFound { .. }
                | ErrorKind::UniqueConstraintViolation { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("Error querying the database: {}", _0)]
    QueryError(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("Database '{}' does not exist.", db_name)]
    DatabaseDoesNotExist { db_name: String },

    #[error("Access denied to database '{}'", db_name)]
    DatabaseAccessDenied { db_name: String },

    #[error("Authentication failed for user '{}'", user)]
    AuthenticationFailed { user: String },

    #[error("No such table: {}", table)]
    TableDoesNotExist { table: String },

    #[error("Unknown column: {}", column)]
    ColumnNotFound { column: String },

    #[error("Unique constraint failed: {}", constraint)]
    UniqueConstraintViolation { constraint: DatabaseConstraint },

    #[error("Expected {} values per row, got {}", expected, found)]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("Error creating a database connection.")]
    ConnectionError(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("Not connected to the database. Call `connect()` first.")]
    NotConnected,

    #[error("Error parsing connection string: {}", _0)]
    DatabaseUrlIsInvalid(String),

    #[error("The provided arguments are not supported: {}", _0)]
    InvalidConnectionArguments(String),

    #[error("Conversion failed: {}", _0)]
    ConversionError(Cow<'static, str>),

    #[error("Value out of range error. {}", message)]
    ValueOutOfRange { message: String },

    #[error("Error in an I/O operation: {0}")]
    IoError(io::Error),

    #[error("Connect timed out ({0})")]
    ConnectTimeout(String),
}

impl ErrorKind {
    pub(crate) fn value_out_of_range(msg: impl Into<String>) -> Self {
        Self::ValueOutOfRange { message: msg.into() }
    }

    pub(crate) fn conversion(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ConversionError(msg.into())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::builder(kind).build()
    }
}

impl From<Error> for ErrorKind {
    fn from(e: Error) -> Self {
        e.kind
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self::builder(ErrorKind::conversion("Problems writing AST into a query string.")).build()
    }
}

impl From<num::TryFromIntError> for Error {
    fn from(_: num::TryFromIntError) -> Self {
        Self::builder(ErrorKind::conversion(
            "Couldn't convert an integer (possible overflow).",
        ))
        .build()
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        let kind = ErrorKind::ConnectTimeout("tokio timeout".into());

        let mut builder = Error::builder(kind);
        builder.set_original_message("Connection timed out.");

        builder.build()
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        let kind = ErrorKind::DatabaseUrlIsInvalid(e.to_string());
        Error::builder(kind).build()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::builder(ErrorKind::IoError(e)).build()
    }
}
