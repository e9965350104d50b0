//! Unified error system for the Obra dashboard
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Filter errors
//! - 2xxx: Document store errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::StoreUnavailable);
//! assert_eq!(err.code.code(), 2001);
//!
//! let err = AppError::invalid_filter_kind("trimestre").with_detail("source", "ui");
//! assert_eq!(err.code, ErrorCode::InvalidFilterKind);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
