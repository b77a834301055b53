//! Centralized error handling for the editing core.
//! Defines error kinds, severity, and a structured error type shared by every component.

use std::fmt;

/// Severity level of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational; not a failure.
    Info,
    /// Warning - operation can continue.
    Warning,
    /// Standard error - operation failed but the caller can continue.
    Error,
    /// Critical error - data may be lost or state corrupted.
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Category of the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Index or range outside a data structure's bounds.
    OutOfBounds,
    /// A range where `start > end`.
    InvalidRange,
    /// Bytes passed to `Rope::insert` are not well-formed UTF-8.
    InvalidUtf8,
    /// Allocation failed. Reserved; unreachable under the global allocator in practice.
    OutOfMemory,
    /// Filesystem or other I/O failure.
    Io,
    /// Internal logic or invariant violation.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "OutOfBounds"),
            Self::InvalidRange => write!(f, "InvalidRange"),
            Self::InvalidUtf8 => write!(f, "InvalidUtf8"),
            Self::OutOfMemory => write!(f, "OutOfMemory"),
            Self::Io => write!(f, "Io"),
            Self::Internal => write!(f, "Internal"),
        }
    }
}

/// A structured error produced by the editing core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub severity: ErrorSeverity,
    pub kind: ErrorKind,
    pub code: String,
    pub message: String,
}

impl CoreError {
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn critical(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn out_of_bounds(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfBounds, "OUT_OF_BOUNDS", message)
    }

    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRange, "INVALID_RANGE", message)
    }

    pub fn invalid_utf8(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUtf8, "INVALID_UTF8", message)
    }

    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for CoreError {}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, "IO_ERROR", err.to_string())
    }
}

/// Result alias used throughout the editing core.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
