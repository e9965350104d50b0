//! 服务层
//!
//! - [`DashboardService`] - 周期 KPI、分析视图、报告列表

pub mod dashboard;

pub use dashboard::{AnalysisView, DashboardService, KpiSnapshot, TOP_WORKER_COUNT};
