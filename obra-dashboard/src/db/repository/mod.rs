//! Repository Module
//!
//! Typed readers over the document store. Every document is decoded and
//! validated once here; a document that fails fails the whole read.

pub mod activity;
pub mod period_summary;
pub mod report;
pub mod worker;

// Re-exports
pub use activity::ActivityRepository;
pub use period_summary::PeriodSummaryRepository;
pub use report::ReportRepository;
pub use worker::WorkerRepository;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::store::{DocumentQuery, StoreError, StoreHandle, StoredDocument};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid document {collection}/{id}: {source}")]
    InvalidDocument {
        collection: String,
        id: String,
        #[source]
        source: AppError,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Store(e) => e.into(),
            RepoError::InvalidDocument { collection, id, source } => AppError::with_message(
                ErrorCode::InvalidDocument,
                format!("Invalid document {}/{}: {}", collection, id, source.message),
            )
            .with_detail("collection", collection)
            .with_detail("id", id),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with store handle and collection name
#[derive(Clone)]
pub struct BaseRepository {
    store: StoreHandle,
    collection: String,
}

impl BaseRepository {
    pub fn new(store: StoreHandle, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Run a query and decode every row with `decode`
    pub async fn find_decoded<T, F>(&self, query: &DocumentQuery, decode: F) -> RepoResult<Vec<T>>
    where
        F: Fn(StoredDocument) -> Result<T, (String, AppError)>,
    {
        let rows = self.store.query(&self.collection, query).await?;
        rows.into_iter()
            .map(|row| {
                decode(row).map_err(|(id, source)| {
                    tracing::warn!(collection = %self.collection, id = %id, error = %source, "Rejected document");
                    RepoError::InvalidDocument {
                        collection: self.collection.clone(),
                        id,
                        source,
                    }
                })
            })
            .collect()
    }

    /// Fetch one document; `None` when it does not exist
    pub async fn get(&self, id: &str) -> RepoResult<Option<StoredDocument>> {
        match self.store.get_document(&self.collection, id).await {
            Ok(doc) => Ok(Some(doc)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
