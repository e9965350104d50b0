//! Period Summary Repository

use shared::models::PeriodSummary;

use super::{BaseRepository, RepoResult};
use crate::statistics::query::QuerySpec;
use crate::store::StoreHandle;

#[derive(Clone)]
pub struct PeriodSummaryRepository {
    base: BaseRepository,
}

impl PeriodSummaryRepository {
    pub fn new(store: StoreHandle, collection: impl Into<String>) -> Self {
        Self {
            base: BaseRepository::new(store, collection),
        }
    }

    /// Summaries matching `spec`, decoded and validated
    pub async fn find(&self, spec: &QuerySpec) -> RepoResult<Vec<PeriodSummary>> {
        let query = spec.to_document_query();
        let summaries = self
            .base
            .find_decoded(&query, |doc| {
                PeriodSummary::from_document(doc.fields).map_err(|e| (doc.id, e))
            })
            .await?;

        tracing::debug!(
            periodo = spec.period.as_str(),
            documents = summaries.len(),
            "Loaded period summaries"
        );
        Ok(summaries)
    }
}
