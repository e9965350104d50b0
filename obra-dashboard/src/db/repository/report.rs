//! Report Repository

use shared::models::{LocationFilter, Report};

use super::{BaseRepository, RepoError, RepoResult};
use crate::statistics::range::DateRange;
use crate::store::{DocumentQuery, SortOrder, StoreHandle};

#[derive(Clone)]
pub struct ReportRepository {
    base: BaseRepository,
}

impl ReportRepository {
    pub fn new(store: StoreHandle, collection: impl Into<String>) -> Self {
        Self {
            base: BaseRepository::new(store, collection),
        }
    }

    /// Most recent reports within `range`, newest first
    pub async fn list_recent(
        &self,
        range: &DateRange,
        location: &LocationFilter,
        limit: usize,
    ) -> RepoResult<Vec<Report>> {
        if limit == 0 {
            return Err(RepoError::Validation("limit must be positive".into()));
        }
        let mut query = DocumentQuery::new()
            .gte("fecha", range.inicio_str())
            .lte("fecha", range.fin_str());
        if let Some(ubicacion) = location.as_option() {
            query = query.eq("ubicacion", ubicacion);
        }
        let query = query.order_by("fecha", SortOrder::Desc).limit(limit);

        self.base
            .find_decoded(&query, |doc| {
                Report::from_document(&doc.id, doc.fields).map_err(|e| (doc.id, e))
            })
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Report>> {
        let Some(doc) = self.base.get(id).await? else {
            return Ok(None);
        };
        Report::from_document(&doc.id, doc.fields)
            .map(Some)
            .map_err(|source| RepoError::InvalidDocument {
                collection: self.base.collection().to_string(),
                id: id.to_string(),
                source,
            })
    }
}
