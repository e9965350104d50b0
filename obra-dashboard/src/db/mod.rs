//! Database Module
//!
//! Embedded SurrealDB connection and typed repositories over the document store

pub mod repository;

use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::config::{Config, DbEngine};
use crate::store::SurrealStore;
use crate::utils::{AppError, AppResult};

/// Owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open an on-disk RocksDB database at `path`
    pub async fn open_rocksdb(path: &Path, namespace: &str, database: &str) -> AppResult<Self> {
        std::fs::create_dir_all(path)
            .map_err(|e| AppError::database(format!("Failed to create database dir: {e}")))?;

        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::select(db, namespace, database).await
    }

    /// Open an ephemeral in-memory database
    pub async fn open_memory(namespace: &str, database: &str) -> AppResult<Self> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::select(db, namespace, database).await
    }

    /// Open according to `DB_ENGINE`
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        match config.db_engine {
            DbEngine::RocksDb => {
                let path = config.database_dir();
                let service =
                    Self::open_rocksdb(&path, &config.db_namespace, &config.db_database).await?;
                tracing::info!(path = %path.display(), "Database connection established (RocksDB)");
                Ok(service)
            }
            DbEngine::Memory => {
                let service = Self::open_memory(&config.db_namespace, &config.db_database).await?;
                tracing::info!("Database connection established (in-memory)");
                Ok(service)
            }
        }
    }

    async fn select(db: Surreal<Db>, namespace: &str, database: &str) -> AppResult<Self> {
        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace/database: {e}")))?;
        Ok(Self { db })
    }

    /// Document-store view over this database
    pub fn store(&self) -> SurrealStore {
        SurrealStore::new(self.db.clone())
    }
}
