//! Console error types

use crate::params::ParamError;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Unknown parameter name
    UnknownParam,
    /// E03: Invalid value format
    InvalidValue,
    /// E04: Missing required argument
    MissingArg,
    /// E05: Value out of allowed range
    OutOfRange,
    /// E06: String below minimum length
    TooShort,
    /// E07: Persistent store error
    StoreFailed,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::UnknownParam => "E02",
            Self::InvalidValue => "E03",
            Self::MissingArg => "E04",
            Self::OutOfRange => "E05",
            Self::TooShort => "E06",
            Self::StoreFailed => "E07",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::UnknownParam => "unknown parameter",
            Self::InvalidValue => "invalid value",
            Self::MissingArg => "missing argument",
            Self::OutOfRange => "out of range",
            Self::TooShort => "too short",
            Self::StoreFailed => "store error",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl From<ParamError> for ConsoleError {
    fn from(e: ParamError) -> Self {
        match e {
            ParamError::NotFound => Self::UnknownParam,
            ParamError::TypeMismatch => Self::InvalidValue,
            ParamError::OutOfRange => Self::OutOfRange,
            ParamError::TooShort => Self::TooShort,
            ParamError::StoreUnavailable => Self::StoreFailed,
        }
    }
}
