//! Activity Repository

use shared::models::{Activity, LocationFilter};

use super::{BaseRepository, RepoResult};
use crate::statistics::range::DateRange;
use crate::store::{DocumentQuery, SortOrder, StoreHandle};

#[derive(Clone)]
pub struct ActivityRepository {
    base: BaseRepository,
}

impl ActivityRepository {
    pub fn new(store: StoreHandle, collection: impl Into<String>) -> Self {
        Self {
            base: BaseRepository::new(store, collection),
        }
    }

    /// Activities dated within `range`, oldest first
    pub async fn find_in_range(
        &self,
        range: &DateRange,
        location: &LocationFilter,
    ) -> RepoResult<Vec<Activity>> {
        let mut query = DocumentQuery::new()
            .gte("fecha", range.inicio_str())
            .lte("fecha", range.fin_str());
        if let Some(ubicacion) = location.as_option() {
            query = query.eq("ubicacion", ubicacion);
        }
        let query = query.order_by("fecha", SortOrder::Asc);

        self.base
            .find_decoded(&query, |doc| {
                Activity::from_document(&doc.id, doc.fields).map_err(|e| (doc.id, e))
            })
            .await
    }
}
