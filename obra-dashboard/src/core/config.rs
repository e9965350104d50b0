use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::time::parse_timezone;
use crate::utils::{AppError, AppResult};

/// 数据源：真实存储 (live) 或内置演示数据 (mock)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    #[default]
    Live,
    Mock,
}

impl FromStr for DataSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "real" => Ok(Self::Live),
            "mock" | "demo" => Ok(Self::Mock),
            other => Err(AppError::config(format!("Unknown DATA_SOURCE: {}", other))),
        }
    }
}

/// 嵌入式数据库引擎
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DbEngine {
    #[default]
    RocksDb,
    Memory,
}

impl FromStr for DbEngine {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rocksdb" | "rocks" => Ok(Self::RocksDb),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(AppError::config(format!("Unknown DB_ENGINE: {}", other))),
        }
    }
}

/// 集合名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    pub summaries: String,
    pub activities: String,
    pub workers: String,
    pub reports: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            summaries: "resumenes".into(),
            activities: "actividades".into(),
            workers: "trabajadores".into(),
            reports: "reportes".into(),
        }
    }
}

/// 看板配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/obra/dashboard | 工作目录 (数据库、日志) |
/// | DATA_SOURCE | live | live \| mock |
/// | DB_ENGINE | rocksdb | rocksdb \| memory |
/// | DB_NAMESPACE | obra | SurrealDB namespace |
/// | DB_DATABASE | dashboard | SurrealDB database |
/// | SUMMARY_COLLECTION | resumenes | 周期汇总集合 |
/// | ACTIVITY_COLLECTION | actividades | 活动集合 |
/// | WORKER_COLLECTION | trabajadores | 工人集合 |
/// | REPORT_COLLECTION | reportes | 报告集合 |
/// | REPORT_LIST_LIMIT | 20 | 报告列表条数 |
/// | BUSINESS_TIMEZONE | (主机本地时区) | IANA 时区，例如 America/Lima |
/// | COST_PLACEHOLDER_ENABLED | true | 成本分布占位数据 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志 |
/// | LOG_DIR | (无) | 日志目录，未设置时输出到 stdout |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/obra DATA_SOURCE=mock BUSINESS_TIMEZONE=America/Lima
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    pub data_source: DataSource,
    pub db_engine: DbEngine,
    pub db_namespace: String,
    pub db_database: String,
    pub collections: CollectionNames,
    /// 报告列表最大条数
    pub report_list_limit: usize,
    /// 业务时区，None 时使用主机本地时区
    pub business_timezone: Option<Tz>,
    /// 成本分布只有 ≤1 个分组时是否显示占位数据
    pub cost_placeholder_enabled: bool,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let data_source = std::env::var("DATA_SOURCE")
            .ok()
            .and_then(|v| {
                v.parse::<DataSource>()
                    .map_err(|e| tracing::warn!("{}, using live", e))
                    .ok()
            })
            .unwrap_or_default();
        let db_engine = std::env::var("DB_ENGINE")
            .ok()
            .and_then(|v| {
                v.parse::<DbEngine>()
                    .map_err(|e| tracing::warn!("{}, using rocksdb", e))
                    .ok()
            })
            .unwrap_or_default();

        let defaults = CollectionNames::default();

        Self {
            work_dir: env_or("WORK_DIR", "/var/lib/obra/dashboard"),
            data_source,
            db_engine,
            db_namespace: env_or("DB_NAMESPACE", "obra"),
            db_database: env_or("DB_DATABASE", "dashboard"),
            collections: CollectionNames {
                summaries: env_or("SUMMARY_COLLECTION", &defaults.summaries),
                activities: env_or("ACTIVITY_COLLECTION", &defaults.activities),
                workers: env_or("WORKER_COLLECTION", &defaults.workers),
                reports: env_or("REPORT_COLLECTION", &defaults.reports),
            },
            report_list_limit: env_parse("REPORT_LIST_LIMIT", 20),
            business_timezone: std::env::var("BUSINESS_TIMEZONE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .and_then(|v| parse_timezone(&v)),
            cost_placeholder_enabled: env_parse("COST_PLACEHOLDER_ENABLED", true),
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
            environment: env_or("ENVIRONMENT", "development"),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(
        work_dir: impl Into<String>,
        data_source: DataSource,
        db_engine: DbEngine,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.data_source = data_source;
        config.db_engine = db_engine;
        config
    }

    /// 检查配置一致性
    pub fn validate(&self) -> AppResult<()> {
        if self.report_list_limit == 0 {
            return Err(AppError::config("REPORT_LIST_LIMIT must be positive"));
        }
        let names = [
            &self.collections.summaries,
            &self.collections.activities,
            &self.collections.workers,
            &self.collections.reports,
        ];
        for name in names {
            if crate::store::validate_identifier(name).is_err() {
                return Err(AppError::config(format!("Invalid collection name: {}", name)));
            }
        }
        Ok(())
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (LOG_DIR 优先，否则 work_dir/logs)
    pub fn logs_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&self.work_dir).join("logs"),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enums() {
        assert_eq!("MOCK".parse::<DataSource>().unwrap(), DataSource::Mock);
        assert_eq!("live".parse::<DataSource>().unwrap(), DataSource::Live);
        assert!("firebase".parse::<DataSource>().is_err());

        assert_eq!("memory".parse::<DbEngine>().unwrap(), DbEngine::Memory);
        assert_eq!("RocksDB".parse::<DbEngine>().unwrap(), DbEngine::RocksDb);
    }

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides("/tmp/obra-test", DataSource::Mock, DbEngine::Memory);
        assert_eq!(config.work_dir, "/tmp/obra-test");
        assert_eq!(config.data_source, DataSource::Mock);
        assert_eq!(config.db_engine, DbEngine::Memory);
        assert_eq!(
            config.database_dir(),
            PathBuf::from("/tmp/obra-test").join("database")
        );
    }

    #[test]
    fn test_validate_rejects_bad_collection() {
        let mut config = Config::with_overrides("/tmp/obra-test", DataSource::Mock, DbEngine::Memory);
        config.report_list_limit = 5;
        config.collections.reports = "reportes; REMOVE TABLE x".into();
        assert!(config.validate().is_err());

        config.collections = CollectionNames::default();
        assert!(config.validate().is_ok());
    }
}
