//! Obra Dashboard - 工地运营看板核心
//!
//! # 架构概述
//!
//! 过滤条件驱动的周期聚合层：
//!
//! - **统计** (`statistics`): 日期范围解析、汇总查询构建、KPI 聚合、衍生指标
//! - **存储** (`store`): 文档存储抽象 (SurrealDB / 内存 / 演示数据)
//! - **数据库** (`db`): 嵌入式 SurrealDB 与类型化仓库
//! - **服务** (`services`): KPI、分析视图、报告列表
//! - **核心** (`core`): 配置、状态 reducer、可取消的加载控制器
//!
//! # 模块结构
//!
//! ```text
//! obra-dashboard/src/
//! ├── core/          # 配置、状态、控制器
//! ├── db/            # SurrealDB 连接与仓库
//! ├── services/      # 看板服务
//! ├── statistics/    # 范围 / 查询 / 聚合 / 衍生指标
//! ├── store/         # 文档存储适配器
//! └── utils/         # 日志、时间、金额
//! ```

pub mod core;
pub mod db;
pub mod services;
pub mod statistics;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, DashboardController, DashboardState, DataSource, LoadStatus};
pub use db::DbService;
pub use services::{AnalysisView, DashboardService, KpiSnapshot};
pub use store::{DocumentStore, MemoryStore, StoreHandle, SurrealStore};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 .env、读取并校验配置、初始化日志
pub fn setup_environment() -> AppResult<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.validate()?;

    let log_dir = config.log_dir.clone().or_else(|| {
        let dir = config.logs_dir();
        dir.exists().then(|| dir.to_string_lossy().into_owned())
    });
    init_logger_with_file(Some(&config.log_level), Some(config.log_json), log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        data_source = ?config.data_source,
        work_dir = %config.work_dir,
        "Obra dashboard environment ready"
    );
    Ok(config)
}
