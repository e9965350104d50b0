//! Shared types for the Obra dashboard
//!
//! Document models (filters, period summaries, activities, workers, reports),
//! the aggregated KPI view-model and the unified error system.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
