//! 统计模块 - 周期汇总与派生指标
//!
//! Filter → [`range`] → [`query`] → store read → [`aggregator`] → KPI.
//! Analysis views recompute [`derived`] metrics from raw collections.

pub mod aggregator;
pub mod derived;
pub mod query;
pub mod range;
pub mod tariff;

pub use aggregator::{DailySummaryView, TrendPoint, aggregate, daily_view};
pub use query::{QuerySpec, RANGE_QUERY_LIMIT, build_query, build_query_for};
pub use range::{DateRange, MonthKey, ResolvedPeriod, WeekKey, resolve_range};
