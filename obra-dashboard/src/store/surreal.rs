//! SurrealDB document store
//!
//! Collections map to tables, document ids to record keys. Table names and
//! predicate values are always bound parameters; field names are validated
//! identifiers before being interpolated.

use async_trait::async_trait;
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{DocumentQuery, DocumentStore, StoreError, StoreResult, StoredDocument};

/// Alias carrying the record key in every SELECT
const KEY_FIELD: &str = "doc_key";

#[derive(Clone)]
pub struct SurrealStore {
    db: Surreal<Db>,
}

impl SurrealStore {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// SurrealQL for a [`DocumentQuery`]; `$table` and `$p{i}` are bound by the caller
pub(crate) fn build_select(query: &DocumentQuery) -> StoreResult<String> {
    query.validate()?;

    let mut sql = format!("SELECT *, record::id(id) AS {KEY_FIELD} OMIT id FROM type::table($table)");

    if !query.predicates.is_empty() {
        let conditions: Vec<String> = query
            .predicates
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {} $p{}", p.field, p.op.as_operator(), i))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    if let Some(order_by) = &query.order_by {
        sql.push_str(&format!(
            " ORDER BY {} {}",
            order_by.field,
            order_by.order.as_keyword()
        ));
    }

    Ok(sql)
}

/// Split the `doc_key` alias back out of a selected row
fn into_document(row: Value) -> StoreResult<StoredDocument> {
    let mut fields = match row {
        Value::Object(fields) => fields,
        other => {
            return Err(StoreError::InvalidDocument(format!(
                "Expected object row, got {}",
                other
            )));
        }
    };
    let id = match fields.remove(KEY_FIELD) {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        other => {
            return Err(StoreError::InvalidDocument(format!(
                "Unsupported record key: {:?}",
                other
            )));
        }
    };
    Ok(StoredDocument {
        id,
        fields: Value::Object(fields),
    })
}

#[async_trait]
impl DocumentStore for SurrealStore {
    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> StoreResult<Vec<StoredDocument>> {
        let sql = build_select(query)?;

        let mut pending = self.db.query(sql).bind(("table", collection.to_string()));
        for (i, predicate) in query.predicates.iter().enumerate() {
            pending = pending.bind((format!("p{}", i), predicate.value.clone()));
        }

        let mut response = pending.await?;
        let rows: Vec<Value> = response.take(0)?;

        let mut documents = rows
            .into_iter()
            .map(into_document)
            .collect::<StoreResult<Vec<_>>>()?;

        // LIMIT is applied after the fetch: the embedded engine can drop the
        // first row when WHERE, ORDER BY and LIMIT are combined.
        if let Some(limit) = query.limit {
            documents.truncate(limit);
        }

        tracing::debug!(collection = %collection, rows = documents.len(), "SurrealDB query");
        Ok(documents)
    }

    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<StoredDocument> {
        let mut response = self
            .db
            .query(format!(
                "SELECT *, record::id(id) AS {KEY_FIELD} OMIT id FROM type::thing($table, $id)"
            ))
            .bind(("table", collection.to_string()))
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<Value> = response.take(0)?;

        match rows.into_iter().next() {
            Some(row) => into_document(row),
            None => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
        }
    }

    async fn put_document(&self, collection: &str, id: &str, fields: Value) -> StoreResult<()> {
        let Value::Object(mut content) = fields else {
            return Err(StoreError::InvalidDocument(format!(
                "{}/{} must be an object",
                collection, id
            )));
        };
        // The record key comes from `id`; a body `id` would conflict with it
        content.remove("id");
        content.remove(KEY_FIELD);

        self.db
            .query("UPSERT type::thing($table, $id) CONTENT $fields RETURN NONE")
            .bind(("table", collection.to_string()))
            .bind(("id", id.to_string()))
            .bind(("fields", Value::Object(content)))
            .await?
            .check()?;
        Ok(())
    }
}
