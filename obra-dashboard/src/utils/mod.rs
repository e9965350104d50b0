//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - 日志、业务时区日期、金额精度工具

pub mod logger;
pub mod money;
pub mod time;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
