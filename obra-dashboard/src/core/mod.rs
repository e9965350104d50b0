//! 核心模块 - 配置、状态和控制器
//!
//! # 模块结构
//!
//! - [`Config`] - 看板配置
//! - [`DashboardState`] / [`reduce`] - 状态与 reducer
//! - [`DashboardController`] - 可取消的数据加载

pub mod config;
pub mod controller;
pub mod state;

pub use config::{CollectionNames, Config, DataSource, DbEngine};
pub use controller::DashboardController;
pub use state::{DashboardAction, DashboardState, LoadStatus, reduce};
