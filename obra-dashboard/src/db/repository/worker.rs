//! Worker Repository

use shared::models::{CategoryFilter, LocationFilter, Worker};

use super::{BaseRepository, RepoResult};
use crate::store::{DocumentQuery, SortOrder, StoreHandle};

#[derive(Clone)]
pub struct WorkerRepository {
    base: BaseRepository,
}

impl WorkerRepository {
    pub fn new(store: StoreHandle, collection: impl Into<String>) -> Self {
        Self {
            base: BaseRepository::new(store, collection),
        }
    }

    /// Workers matching `categoria` / `ubicacion`, by name
    pub async fn find(
        &self,
        category: &CategoryFilter,
        location: &LocationFilter,
    ) -> RepoResult<Vec<Worker>> {
        let mut query = DocumentQuery::new();
        if let CategoryFilter::Only(categoria) = category {
            query = query.eq("categoria", categoria.as_str());
        }
        if let Some(ubicacion) = location.as_option() {
            query = query.eq("ubicacion", ubicacion);
        }
        let query = query.order_by("nombre", SortOrder::Asc);

        self.base
            .find_decoded(&query, |doc| {
                Worker::from_document(&doc.id, doc.fields).map_err(|e| (doc.id, e))
            })
            .await
    }
}
