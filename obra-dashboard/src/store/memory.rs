//! In-memory document store
//!
//! Same predicate / ordering / limit semantics as the SurrealDB adapter.
//! Backs the mock data source and unit tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::{DocumentQuery, DocumentStore, SortOrder, StoreError, StoreResult, StoredDocument, compare_values};

/// collection → (id → fields)
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(collection, id, fields)` triples
    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (String, String, Value)>,
    {
        let store = Self::new();
        for (collection, id, fields) in documents {
            store.insert(&collection, &id, fields);
        }
        store
    }

    /// Synchronous insert/replace
    pub fn insert(&self, collection: &str, id: &str, fields: Value) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.collections.read().values().all(|docs| docs.is_empty())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> StoreResult<Vec<StoredDocument>> {
        query.validate()?;

        let mut rows: Vec<StoredDocument> = {
            let guard = self.collections.read();
            let Some(docs) = guard.get(collection) else {
                return Ok(Vec::new());
            };
            docs.iter()
                .filter(|(_, fields)| query.predicates.iter().all(|p| p.matches(fields)))
                .map(|(id, fields)| StoredDocument {
                    id: id.clone(),
                    fields: fields.clone(),
                })
                .collect()
        };

        if let Some(order_by) = &query.order_by {
            // Missing / incomparable values sort first, like NONE in SurrealQL
            rows.sort_by(|a, b| {
                let ord = match (a.fields.get(&order_by.field), b.fields.get(&order_by.field)) {
                    (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                match order_by.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        tracing::debug!(collection = %collection, rows = rows.len(), "Memory store query");
        Ok(rows)
    }

    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<StoredDocument> {
        self.collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| StoredDocument {
                id: id.to_string(),
                fields: fields.clone(),
            })
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn put_document(&self, collection: &str, id: &str, fields: Value) -> StoreResult<()> {
        if !fields.is_object() {
            return Err(StoreError::InvalidDocument(format!(
                "{}/{} must be an object",
                collection, id
            )));
        }
        self.insert(collection, id, fields);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::from_documents([
            ("resumenes".into(), "d3".into(), json!({"periodo": "diario", "fecha": "2024-01-03"})),
            ("resumenes".into(), "d1".into(), json!({"periodo": "diario", "fecha": "2024-01-01"})),
            ("resumenes".into(), "d2".into(), json!({"periodo": "diario", "fecha": "2024-01-02"})),
            ("resumenes".into(), "w1".into(), json!({"periodo": "semanal", "fecha": "2024-01-01", "semana": 1})),
        ])
    }

    #[tokio::test]
    async fn test_query_filters_orders_and_limits() {
        let store = store();
        let query = DocumentQuery::new()
            .eq("periodo", "diario")
            .gte("fecha", "2024-01-01")
            .lte("fecha", "2024-01-31")
            .order_by("fecha", SortOrder::Asc)
            .limit(2);

        let rows = store.query("resumenes", &query).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2"]);
    }

    #[tokio::test]
    async fn test_query_descending() {
        let store = store();
        let query = DocumentQuery::new()
            .eq("periodo", "diario")
            .order_by("fecha", SortOrder::Desc);
        let rows = store.query("resumenes", &query).await.unwrap();
        assert_eq!(rows[0].id, "d3");
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_query_unknown_collection_is_empty() {
        let rows = store()
            .query("obreros", &DocumentQuery::new())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_query_rejects_bad_field() {
        let err = store()
            .query("resumenes", &DocumentQuery::new().eq("fecha = '' OR 1", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidField(_)));
    }

    #[tokio::test]
    async fn test_get_and_put() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get_document("reportes", "r1").await,
            Err(StoreError::NotFound { .. })
        ));

        store
            .put_document("reportes", "r1", json!({"fecha": "2024-01-01"}))
            .await
            .unwrap();
        let doc = store.get_document("reportes", "r1").await.unwrap();
        assert_eq!(doc.fields["fecha"], "2024-01-01");
        assert_eq!(store.len("reportes"), 1);

        assert!(store.put_document("reportes", "r2", json!(42)).await.is_err());
    }
}
