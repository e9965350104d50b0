//! Unified error codes for the Obra dashboard
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Filter errors (report window selection)
//! - 2xxx: Document store errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,

    // ==================== 1xxx: Filter ====================
    /// Unrecognized filter kind (tipoFiltro)
    InvalidFilterKind = 1001,
    /// Date is not a YYYY-MM-DD string
    InvalidDateFormat = 1002,
    /// Week is not a YYYY-Www string
    InvalidWeekFormat = 1003,
    /// Month is not a YYYY-MM string
    InvalidMonthFormat = 1004,
    /// Unrecognized worker category
    InvalidCategory = 1005,

    // ==================== 2xxx: Document store ====================
    /// No active store handle
    StoreUnavailable = 2001,
    /// Underlying read failed
    QueryFailure = 2002,
    /// Document not found
    DocumentNotFound = 2003,
    /// Document does not match the expected schema
    InvalidDocument = 2004,
    /// Query could not be constructed (bad field name, etc.)
    InvalidQuery = 2005,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",

            // Filter
            ErrorCode::InvalidFilterKind => "Unrecognized filter kind",
            ErrorCode::InvalidDateFormat => "Date must be formatted as YYYY-MM-DD",
            ErrorCode::InvalidWeekFormat => "Week must be formatted as YYYY-Www",
            ErrorCode::InvalidMonthFormat => "Month must be formatted as YYYY-MM",
            ErrorCode::InvalidCategory => "Unrecognized worker category",

            // Store
            ErrorCode::StoreUnavailable => "Document store is not available",
            ErrorCode::QueryFailure => "Document store query failed",
            ErrorCode::DocumentNotFound => "Document not found",
            ErrorCode::InvalidDocument => "Document does not match the expected schema",
            ErrorCode::InvalidQuery => "Invalid document query",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),

            // Filter
            1001 => Ok(ErrorCode::InvalidFilterKind),
            1002 => Ok(ErrorCode::InvalidDateFormat),
            1003 => Ok(ErrorCode::InvalidWeekFormat),
            1004 => Ok(ErrorCode::InvalidMonthFormat),
            1005 => Ok(ErrorCode::InvalidCategory),

            // Store
            2001 => Ok(ErrorCode::StoreUnavailable),
            2002 => Ok(ErrorCode::QueryFailure),
            2003 => Ok(ErrorCode::DocumentNotFound),
            2004 => Ok(ErrorCode::InvalidDocument),
            2005 => Ok(ErrorCode::InvalidQuery),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
