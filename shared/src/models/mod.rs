//! Data models
//!
//! Documents are produced by the site batch job and field apps; the dashboard
//! only reads them. Each model decodes once at the ingestion boundary via
//! `from_document`, filling defaults and validating ranges.

pub mod activity;
pub mod filter;
pub mod kpi;
pub mod period_summary;
pub mod report;
pub mod serde_helpers;
pub mod worker;

// Re-exports
pub use activity::*;
pub use filter::*;
pub use kpi::*;
pub use period_summary::*;
pub use report::*;
pub use worker::*;

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult, ErrorCode};

/// Deserialize + validate a flat record document
pub(crate) fn decode_document<T>(kind: &str, document: Value) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let record: T = serde_json::from_value(document).map_err(|e| {
        AppError::with_message(
            ErrorCode::InvalidDocument,
            format!("Malformed {} document: {}", kind, e),
        )
    })?;
    record.validate().map_err(|e| {
        AppError::with_message(
            ErrorCode::InvalidDocument,
            format!("Invalid {} document: {}", kind, e),
        )
    })?;
    Ok(record)
}
